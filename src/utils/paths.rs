//! Cross-Platform Path Utilities
//!
//! Functions for resolving the Promptory data directory (~/.promptory/).

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Promptory directory (~/.promptory/)
pub fn promptory_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptory"))
}

/// Get the config file path (~/.promptory/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(promptory_dir()?.join("config.json"))
}

/// Get the database file path (~/.promptory/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(promptory_dir()?.join("data.db"))
}

/// Get the client key/value store path (~/.promptory/local_storage.json)
pub fn local_storage_path() -> AppResult<PathBuf> {
    Ok(promptory_dir()?.join("local_storage.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
