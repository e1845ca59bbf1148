//! Error types for envcheck operations.
//!
//! This module defines [`EnvcheckError`], the error type for operational
//! faults, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A failed requirement is not an error: it is a
//!   [`FailReason`](crate::requirements::status::FailReason) value that ends
//!   up as a diagnostic line
//! - Use `EnvcheckError` for faults that stop the tool from reporting at all
//! - Use `anyhow::Error` (via `EnvcheckError::Other`) for unexpected errors

use thiserror::Error;

use crate::version::VersionError;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvcheckError {
    /// The configured interpreter minimum is not a usable version.
    #[error("Invalid minimum Python version '{value}': {message}")]
    InvalidMinimum { value: String, message: String },

    /// A version string could not be parsed.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Failed to serialize the report.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvcheckError>;
