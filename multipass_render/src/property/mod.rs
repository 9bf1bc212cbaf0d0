//! Property module - named, typed, editable settings.
//!
//! Scenes expose their configuration as a static descriptor table plus
//! typed get/set by name, so tools can list and edit them generically.

mod property;

pub use property::{PropertyContainer, PropertyDesc, PropertyValue};
