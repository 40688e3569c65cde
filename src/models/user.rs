//! User Models
//!
//! Identities, profiles and sign-up options.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// `full_name` from sign-up metadata
    pub full_name: Option<String>,
    pub created_at: String,
}

/// Profile row; id equals the user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub email: String,
    pub avatar_url: Option<String>,
    pub updated_at: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// Extra metadata supplied at sign-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpOptions {
    pub full_name: Option<String>,
}

// Constant pattern; compiling it cannot fail at runtime.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Loose email format check used before any auth call
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}
