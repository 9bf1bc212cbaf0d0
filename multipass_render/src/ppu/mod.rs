//! PPU module - post-processing unit graphs.
//!
//! A processor owns a DAG of units fed by a camera's output.

mod processor;
mod unit;

pub use processor::Processor;
pub use unit::{Unit, UnitKey, UnitKind};
