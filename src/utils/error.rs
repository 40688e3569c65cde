//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use promptory_core::CoreError;
use promptory_llm::LlmError;
use thiserror::Error;

/// Message shown for any public read that is not allowed
pub const PRIVATE_OR_MISSING_MESSAGE: &str = "This prompt is private or doesn't exist.";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors, raised before any backend or LLM call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors (also covers rows owned by someone else)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication errors from the auth service
    #[error("Auth error: {0}")]
    Auth(String),

    /// The acting user may not perform the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Public read of a private or nonexistent prompt
    #[error("{}", PRIVATE_OR_MISSING_MESSAGE)]
    PrivateOrMissing,

    /// LLM completion errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an auth error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was raised by client-side validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The message without the category prefix, for user-facing notices
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Auth(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert AppError to a string suitable for command responses
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
