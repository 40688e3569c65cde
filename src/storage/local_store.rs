//! Local Key/Value Store
//!
//! Small persistent string map for client-side state such as the last
//! login email. Stored as JSON at ~/.promptory/local_storage.json.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{ensure_dir, local_storage_path};

/// Key under which the last successful login email is kept
pub const LAST_LOGIN_EMAIL_KEY: &str = "lastLoginEmail";

/// Persistent string map
#[derive(Debug, Default)]
pub struct LocalStore {
    /// `None` keeps values in memory only
    path: Option<PathBuf>,
    values: RwLock<BTreeMap<String, String>>,
}

impl LocalStore {
    /// Open the store at the default path
    pub fn new() -> AppResult<Self> {
        Self::open(local_storage_path()?)
    }

    /// Open the store backed by the given file, loading existing values
    pub fn open(path: PathBuf) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path),
            values: RwLock::new(values),
        })
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| AppError::internal("local store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| AppError::internal("local store lock poisoned"))?;
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(path) = &self.path {
            fs::write(path, serde_json::to_string_pretty(values)?)?;
        }
        Ok(())
    }
}
