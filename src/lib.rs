//! Promptory - Rust Client Library
//!
//! Store, edit, categorize and share AI prompts. It includes:
//! - An embedded backend (auth, prompt tables, object storage) over SQLite
//! - Business logic services (session, prompts, enrichment, account)
//! - Page-level view state for the client
//! - Storage layer (SQLite, config, local key/value store)
//! - Data models and utilities

pub mod backend;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
pub mod views;

// Re-export models (avoiding settings module conflict)
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use state::{AppState, Services};
pub use utils::error::{AppError, AppResult};
