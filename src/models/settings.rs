//! Settings Models
//!
//! Application configuration and settings data structures.

use promptory_llm::{DEFAULT_API_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin used to build share links, e.g. "https://promptory.app"
    pub site_origin: String,
    /// Base URL of the object storage service
    pub storage_public_url: String,
    /// Chat completion endpoint
    pub llm_base_url: String,
    /// Model used for enrichment calls
    pub llm_model: String,
    /// Models offered in the playground; the first is the default
    #[serde(default = "default_playground_models")]
    pub playground_models: Vec<String>,
    /// Environment variable holding the LLM API key
    #[serde(default = "default_api_key_env")]
    pub llm_api_key_env: String,
    /// Log level: "trace", "debug", "info", "warn" or "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_playground_models() -> Vec<String> {
    vec![
        "llama3-70b-8192".to_string(),
        "llama3-8b-8192".to_string(),
        "gemma-7b-it".to_string(),
    ]
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_origin: "http://localhost:5173".to_string(),
            storage_public_url: "http://localhost:54321".to_string(),
            llm_base_url: DEFAULT_API_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            playground_models: default_playground_models(),
            llm_api_key_env: default_api_key_env(),
            log_level: default_log_level(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub site_origin: Option<String>,
    pub storage_public_url: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub playground_models: Option<Vec<String>>,
    pub llm_api_key_env: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(origin) = update.site_origin {
            self.site_origin = origin;
        }
        if let Some(url) = update.storage_public_url {
            self.storage_public_url = url;
        }
        if let Some(url) = update.llm_base_url {
            self.llm_base_url = url;
        }
        if let Some(model) = update.llm_model {
            self.llm_model = model;
        }
        if let Some(models) = update.playground_models {
            self.playground_models = models;
        }
        if let Some(env) = update.llm_api_key_env {
            self.llm_api_key_env = env;
        }
        if let Some(level) = update.log_level {
            self.log_level = level;
        }
    }

    /// Default playground model
    pub fn default_playground_model(&self) -> &str {
        self.playground_models
            .first()
            .map(String::as_str)
            .unwrap_or(&self.llm_model)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("site_origin", &self.site_origin),
            ("storage_public_url", &self.storage_public_url),
            ("llm_base_url", &self.llm_base_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| format!("Invalid {}: {} ({})", name, value, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("{} must be an http(s) URL", name));
            }
        }

        if self.llm_model.trim().is_empty() {
            return Err("llm_model cannot be empty".to_string());
        }

        if self.playground_models.iter().any(|m| m.trim().is_empty()) {
            return Err("playground_models cannot contain empty names".to_string());
        }

        if self.llm_api_key_env.trim().is_empty() {
            return Err("llm_api_key_env cannot be empty".to_string());
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&self.log_level.as_str()) {
            return Err(format!("Invalid log level: {}", self.log_level));
        }

        Ok(())
    }
}
