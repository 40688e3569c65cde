//! Content Limits
//!
//! Client-side length limits for prompt content. Lengths are counted in
//! Unicode scalar values, never bytes.

use crate::error::{CoreError, CoreResult};

/// Maximum title length in characters
pub const TITLE_LIMIT: usize = 120;

/// Maximum description length in characters
pub const DESCRIPTION_LIMIT: usize = 1500;

/// Character count of a string
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate to at most `limit` characters, respecting char boundaries
pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn check(field: &'static str, value: &str, limit: usize) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::required(field));
    }
    let len = char_len(value);
    if len > limit {
        return Err(CoreError::TooLong { field, len, limit });
    }
    Ok(())
}

/// Validate a title: non-empty and within [`TITLE_LIMIT`]
pub fn check_title(title: &str) -> CoreResult<()> {
    check("Title", title, TITLE_LIMIT)
}

/// Validate a description: non-empty and within [`DESCRIPTION_LIMIT`]
pub fn check_description(description: &str) -> CoreResult<()> {
    check("Description", description, DESCRIPTION_LIMIT)
}
