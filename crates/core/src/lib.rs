//! Promptory Core
//!
//! Foundational types shared by the Promptory workspace. This crate has no
//! dependencies on storage, networking or the LLM layer.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `category` - The `Category` tagged value and the suggested category set
//! - `limits` - Client-side content limits and truncation helpers

pub mod category;
pub mod error;
pub mod limits;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Category ───────────────────────────────────────────────────────────
pub use category::{Category, FALLBACK_CATEGORY, SUGGESTED_CATEGORIES, UNCATEGORIZED_LABEL};

// ── Limits ─────────────────────────────────────────────────────────────
pub use limits::{
    char_len, check_description, check_title, truncate_chars, DESCRIPTION_LIMIT, TITLE_LIMIT,
};
