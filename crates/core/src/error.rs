//! Core Error Types
//!
//! Defines the foundational error types used across the Promptory workspace.
//! These error types are dependency-free (only thiserror + std) to keep the core
//! crate lightweight.
//!
//! The main application crate extends these with additional error variants
//! (e.g., Database, Sqlite, Auth) that require heavier dependencies.

use thiserror::Error;

/// Core error type for the Promptory workspace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was left empty
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Content exceeds the client-side limit
    #[error("{field} is too long ({len} / {limit} characters)")]
    TooLong {
        field: &'static str,
        len: usize,
        limit: usize,
    },

    /// Generic validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a required-field error
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Convert CoreError to a string
impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
