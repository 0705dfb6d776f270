//! # Error Types
//!
//! Structured error types for estimate_core. The engine itself only ever
//! raises [`EstimateError::InvalidConfiguration`]; every stage after the
//! normalizer is a total function over a validated [`ProjectConfig`].
//! The remaining variants cover loading presets and inputs from JSON.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_area(area: f64) -> EstimateResult<()> {
//!     if area <= 0.0 {
//!         return Err(EstimateError::invalid_configuration(
//!             "area",
//!             area.to_string(),
//!             "Built-up area must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! assert!(validate_area(-1.0).is_err());
//! ```
//!
//! [`ProjectConfig`]: crate::project::ProjectConfig

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// The raw project input cannot be normalized (bad area, floors, location, overrides)
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error (presets, raw inputs)
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error (reading an input or preset file)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl EstimateError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EstimateError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        EstimateError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(err: serde_json::Error) -> Self {
        EstimateError::serialization(err.to_string())
    }
}
