//! Error types for the multipass renderer
//!
//! This module defines the error types used throughout the crate,
//! covering scene construction, render targets and the PPU graph.

use std::fmt;

/// Result type for multipass renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Multipass renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Generic failure reported by a collaborator (scene graph, processor, etc.)
    BackendError(String),

    /// Invalid resource (camera, node, unit key that is no longer alive, etc.)
    InvalidResource(String),

    /// Scene construction failed (missing main camera, scene already built, etc.)
    InitializationFailed(String),

    /// PPU graph operation would break the graph (cycle, unknown unit)
    InvalidGraph(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidGraph(msg) => write!(f, "Invalid graph: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
