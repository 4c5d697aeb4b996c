//! Error types for cylinder control.

use thiserror::Error;

use crate::simulation::OperationMode;

/// Result type for cylinder control operations.
pub type CylinderResult<T> = Result<T, CylinderError>;

/// Errors that can occur while driving the cylinder.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CylinderError {
    /// Manual input that is not a finite percentage.
    #[error("Invalid extension: {value} is not a finite percentage")]
    InvalidExtension { value: f64 },

    /// Manual input while an automatic mode owns the extension.
    #[error("Manual input rejected while in {mode} mode")]
    NotManual { mode: OperationMode },

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },
}
