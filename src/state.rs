//! Application State
//!
//! Process-wide state holding storage and every service the views use.

use std::sync::Arc;
use tokio::sync::RwLock;

use promptory_llm::{OpenAIProvider, ProviderConfig};

use crate::backend::LocalBackend;
use crate::models::response::HealthResponse;
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::account::AccountService;
use crate::services::enrichment::EnrichmentGateway;
use crate::services::prompt::PromptRepository;
use crate::services::session::SessionStore;
use crate::storage::{ConfigService, Database, LocalStore};
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::init_logging;

/// Services wired over one backend
pub struct Services {
    pub backend: Arc<LocalBackend>,
    pub session: Arc<SessionStore>,
    pub prompts: PromptRepository,
    pub account: Arc<AccountService>,
}

/// Application state shared by all views
pub struct AppState {
    /// SQLite database with connection pool
    database: Arc<RwLock<Option<Database>>>,
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Backend-bound services
    services: Arc<RwLock<Option<Arc<Services>>>>,
    /// LLM gateway, rebuilt when LLM settings change
    enrichment: Arc<RwLock<Option<Arc<EnrichmentGateway>>>>,
    /// Whether an API key was found for the LLM endpoint
    llm_configured: Arc<RwLock<bool>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

/// Read the API key from the environment variable named in the config
fn api_key_from_env(config: &AppConfig) -> Option<String> {
    std::env::var(&config.llm_api_key_env)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Build the enrichment gateway for the configured endpoint.
/// A missing key still builds the gateway; its calls then fail softly.
fn build_gateway(config: &AppConfig, api_key: Option<String>) -> AppResult<EnrichmentGateway> {
    let provider = OpenAIProvider::new(ProviderConfig {
        api_key,
        base_url: Some(config.llm_base_url.clone()),
        model: config.llm_model.clone(),
        ..Default::default()
    })?;
    Ok(EnrichmentGateway::new(
        Arc::new(provider),
        config.llm_model.clone(),
    ))
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            database: Arc::new(RwLock::new(None)),
            config: Arc::new(RwLock::new(None)),
            services: Arc::new(RwLock::new(None)),
            enrichment: Arc::new(RwLock::new(None)),
            llm_configured: Arc::new(RwLock::new(false)),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize from the files under `~/.promptory/`
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }
        let config = ConfigService::new()?;
        init_logging(&config.get_config().log_level);
        let database = Database::new()?;
        let local = LocalStore::new()?;
        self.initialize_with(config, database, local).await
    }

    /// Initialize with explicit storage. Must run inside a Tokio runtime.
    pub async fn initialize_with(
        &self,
        config: ConfigService,
        database: Database,
        local: LocalStore,
    ) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let app_config = config.get_config_clone();

        // Services over the backend
        {
            let backend = Arc::new(LocalBackend::new(
                database.clone(),
                app_config.storage_public_url.clone(),
            ));
            let session = SessionStore::start(backend.clone(), Arc::new(local));
            let services = Services {
                prompts: PromptRepository::new(backend.clone()),
                account: Arc::new(AccountService::new(
                    backend.clone(),
                    backend.clone(),
                    backend.clone(),
                )),
                session: Arc::new(session),
                backend,
            };
            *self.services.write().await = Some(Arc::new(services));
        }

        self.install_gateway(&app_config).await?;

        *self.database.write().await = Some(database);
        *self.config.write().await = Some(config);

        *initialized = true;
        tracing::info!(origin = %app_config.site_origin, "promptory state initialized");
        Ok(())
    }

    async fn install_gateway(&self, config: &AppConfig) -> AppResult<()> {
        let api_key = api_key_from_env(config);
        let configured = api_key.is_some();
        if !configured {
            tracing::warn!(
                env = %config.llm_api_key_env,
                "no LLM API key set; enrichment will be unavailable"
            );
        }
        let gateway = build_gateway(config, api_key)?;
        *self.enrichment.write().await = Some(Arc::new(gateway));
        *self.llm_configured.write().await = configured;
        Ok(())
    }

    /// Backend-bound services
    pub async fn services(&self) -> AppResult<Arc<Services>> {
        let guard = self.services.read().await;
        match &*guard {
            Some(services) => Ok(services.clone()),
            None => Err(AppError::internal("Services not initialized")),
        }
    }

    /// Current LLM gateway
    pub async fn enrichment(&self) -> AppResult<Arc<EnrichmentGateway>> {
        let guard = self.enrichment.read().await;
        match &*guard {
            Some(gateway) => Ok(gateway.clone()),
            None => Err(AppError::internal("Enrichment gateway not initialized")),
        }
    }

    /// Check if database is healthy
    pub fn is_database_healthy(&self) -> bool {
        // Use try_read to avoid blocking
        if let Ok(guard) = self.database.try_read() {
            if let Some(ref db) = *guard {
                return db.is_healthy();
            }
        }
        false
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    pub async fn health(&self) -> HealthResponse {
        let database = self.is_database_healthy();
        let config = self.is_config_healthy();
        HealthResponse {
            status: if database && config {
                "healthy".to_string()
            } else {
                "degraded".to_string()
            },
            database,
            config,
            llm_configured: *self.llm_configured.read().await,
            ..Default::default()
        }
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration. LLM settings take effect for the next call.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let rebuild_llm = update.llm_base_url.is_some()
            || update.llm_model.is_some()
            || update.llm_api_key_env.is_some();
        let updated = {
            let mut guard = self.config.write().await;
            match &mut *guard {
                Some(config) => config.update_config(update)?,
                None => return Err(AppError::config("Config service not initialized")),
            }
        };
        if rebuild_llm {
            self.install_gateway(&updated).await?;
        }
        Ok(updated)
    }

    /// Get database access for direct queries
    pub async fn with_database<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Database) -> AppResult<T>,
    {
        let guard = self.database.read().await;
        match &*guard {
            Some(db) => f(db),
            None => Err(AppError::database("Database not initialized")),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}
