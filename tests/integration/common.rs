//! Shared test fixtures.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use promptory::backend::{AuthApi, DataApi, LocalBackend};
use promptory::models::prompt::{Prompt, PromptInsert, PromptPatch, PublicPrompt};
use promptory::models::user::{Profile, ProfileUpdate, SignUpOptions, User};
use promptory::services::enrichment::EnrichmentGateway;
use promptory::services::prompt::PromptRepository;
use promptory::AppResult;
use promptory_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
    UsageStats,
};

pub const ORIGIN: &str = "https://promptory.app";

/// Completion provider returning queued replies
pub struct MockLlmProvider {
    responses: Mutex<Vec<LlmResult<LlmResponse>>>,
    calls: AtomicUsize,
    config: ProviderConfig,
}

impl MockLlmProvider {
    pub fn new(responses: Vec<LlmResult<LlmResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
            config: ProviderConfig::default(),
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(reply(t))).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn reply(text: &str) -> LlmResponse {
    LlmResponse {
        content: Some(text.to_string()),
        finish_reason: Some("stop".to_string()),
        usage: UsageStats::default(),
        model: "mock-model".to_string(),
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn send_message(
        &self,
        _messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(LlmError::NetworkError {
                message: "connection refused".to_string(),
            })
        } else {
            responses.remove(0)
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

pub fn gateway(provider: Arc<MockLlmProvider>) -> EnrichmentGateway {
    EnrichmentGateway::new(provider, "llama3-70b-8192")
}

/// Data layer that counts writes before delegating
pub struct CountingData {
    inner: Arc<LocalBackend>,
    writes: AtomicUsize,
}

impl CountingData {
    pub fn new(inner: Arc<LocalBackend>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            writes: AtomicUsize::new(0),
        })
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataApi for CountingData {
    async fn list_prompts(&self, owner_id: &str) -> AppResult<Vec<Prompt>> {
        self.inner.list_prompts(owner_id).await
    }

    async fn get_prompt(&self, id: &str) -> AppResult<Option<Prompt>> {
        self.inner.get_prompt(id).await
    }

    async fn get_public_prompt(&self, id: &str) -> AppResult<Option<PublicPrompt>> {
        self.inner.get_public_prompt(id).await
    }

    async fn insert_prompt(&self, row: PromptInsert) -> AppResult<Prompt> {
        self.count();
        self.inner.insert_prompt(row).await
    }

    async fn update_prompt(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt> {
        self.count();
        self.inner.update_prompt(id, patch).await
    }

    async fn delete_prompt(&self, id: &str) -> AppResult<()> {
        self.count();
        self.inner.delete_prompt(id).await
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        self.inner.get_profile(user_id).await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<Profile> {
        self.count();
        self.inner.update_profile(user_id, update).await
    }
}

/// Fresh in-memory backend with a signed-in user
pub async fn signed_in(email: &str) -> (Arc<LocalBackend>, User) {
    let backend = Arc::new(LocalBackend::in_memory().unwrap());
    let user = backend
        .sign_up(email, "secret123", SignUpOptions::default())
        .await
        .unwrap();
    (backend, user)
}

/// Another session over the same database, signed in as a new user
pub async fn second_session(backend: &LocalBackend, email: &str) -> (Arc<LocalBackend>, User) {
    let other = Arc::new(LocalBackend::new(
        backend.database().clone(),
        "http://localhost:54321",
    ));
    let user = other
        .sign_up(email, "secret123", SignUpOptions::default())
        .await
        .unwrap();
    (other, user)
}

/// A session over the same database with nobody signed in
pub fn anonymous_session(backend: &LocalBackend) -> Arc<LocalBackend> {
    Arc::new(LocalBackend::new(
        backend.database().clone(),
        "http://localhost:54321",
    ))
}

pub fn repo(backend: &Arc<LocalBackend>) -> PromptRepository {
    PromptRepository::new(backend.clone())
}
