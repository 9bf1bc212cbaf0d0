/// Property descriptors and the container trait.

use std::fmt;
use crate::error::Result;

/// Static description of one property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDesc {
    /// Key used by `get_property` / `set_property`
    pub name: &'static str,
    /// Human readable label
    pub label: &'static str,
    pub description: &'static str,
    /// Group the property is listed under
    pub group: &'static str,
}

/// Typed property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Float(f32),
    Int(i32),
}

impl PropertyValue {
    /// Name of the value type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Float(_) => "float",
            PropertyValue::Int(_) => "int",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
        }
    }
}

/// Object exposing a table of typed properties
pub trait PropertyContainer {
    /// Descriptor table, in display order
    fn properties(&self) -> &'static [PropertyDesc];

    /// Current value of a property, `None` for an unknown name
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    /// Change a property.
    ///
    /// # Errors
    ///
    /// - unknown property name
    /// - value of the wrong type
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()>;

    /// Descriptor of a property by name
    fn property_desc(&self, name: &str) -> Option<&'static PropertyDesc> {
        self.properties().iter().find(|desc| desc.name == name)
    }
}

#[cfg(test)]
#[path = "property_tests.rs"]
mod tests;
