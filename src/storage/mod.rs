//! Storage Layer
//!
//! Handles all data persistence: SQLite database, JSON config, and the
//! client-side key/value store.

pub mod config;
pub mod database;
pub mod local_store;

pub use config::*;
pub use database::*;
pub use local_store::*;
