//! Errors raised by enrichment providers.
//!
//! None of these ever reach the caller of [`crate::enrich`]; they decide
//! which fallback is taken and what gets logged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use estimate_core::calculations::{InsightViolation, LayoutViolation};

#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EnrichmentError {
    /// The provider cannot serve this request (no credentials, disabled, offline)
    #[error("Enrichment unavailable: {reason}")]
    Unavailable { reason: String },

    /// The provider did not answer within the time budget
    #[error("Enrichment timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The backing service reported a failure
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// The response could not be parsed into the expected shape
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The response parsed but broke a layout or insight rule
    #[error("Schema violation: {message}")]
    SchemaViolation { message: String },
}

impl EnrichmentError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        EnrichmentError::Unavailable { reason: reason.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        EnrichmentError::Backend { message: message.into() }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        EnrichmentError::InvalidResponse { message: message.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EnrichmentError::Unavailable { .. } => "UNAVAILABLE",
            EnrichmentError::Timeout { .. } => "TIMEOUT",
            EnrichmentError::Backend { .. } => "BACKEND_ERROR",
            EnrichmentError::InvalidResponse { .. } => "INVALID_RESPONSE",
            EnrichmentError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
        }
    }

    /// Whether the provider explicitly declined rather than failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, EnrichmentError::Unavailable { .. })
    }
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(err: serde_json::Error) -> Self {
        EnrichmentError::invalid_response(err.to_string())
    }
}

impl From<LayoutViolation> for EnrichmentError {
    fn from(violation: LayoutViolation) -> Self {
        EnrichmentError::SchemaViolation {
            message: violation.to_string(),
        }
    }
}

impl From<InsightViolation> for EnrichmentError {
    fn from(violation: InsightViolation) -> Self {
        EnrichmentError::SchemaViolation {
            message: violation.to_string(),
        }
    }
}
