//! Playground
//!
//! Ad hoc prompt runs against a chosen model, with input limits, token
//! estimate, feedback and saving to the signed-in user's prompts.

use promptory_core::{char_len, truncate_chars};

use crate::models::enrichment::{PlaygroundRun, PromptFeedback};
use crate::models::prompt::Prompt;
use crate::models::response::CommandResponse;
use crate::models::user::User;
use crate::services::enrichment::EnrichmentGateway;
use crate::services::prompt::PromptRepository;
use crate::utils::error::AppError;

/// Maximum prompt length in characters
pub const PLAYGROUND_CHAR_LIMIT: usize = 500;

/// Maximum prompt length in words
pub const PLAYGROUND_WORD_LIMIT: usize = 100;

/// Whitespace-separated word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rough token count: words × 1.3, rounded
pub fn estimate_tokens(text: &str) -> usize {
    (count_words(text) as f64 * 1.3).round() as usize
}

#[derive(Debug, Clone)]
pub struct PlaygroundView {
    prompt: String,
    pub model: String,
    models: Vec<String>,
    last_run: Option<PlaygroundRun>,
    feedback: Option<PromptFeedback>,
    runs: u32,
}

impl PlaygroundView {
    /// `models` is the selectable list; the first entry is preselected
    pub fn new(models: Vec<String>) -> Self {
        Self {
            prompt: String::new(),
            model: models.first().cloned().unwrap_or_default(),
            models,
            last_run: None,
            feedback: None,
            runs: 0,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt text, cut to the character limit. Clears the
    /// previous response and feedback.
    pub fn set_prompt(&mut self, text: &str) {
        self.prompt = truncate_chars(text, PLAYGROUND_CHAR_LIMIT);
        self.last_run = None;
        self.feedback = None;
    }

    pub fn clear(&mut self) {
        self.set_prompt("");
    }

    pub fn char_count(&self) -> usize {
        char_len(&self.prompt)
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.prompt)
    }

    pub fn token_estimate(&self) -> usize {
        estimate_tokens(&self.prompt)
    }

    /// Successful runs this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn last_run(&self) -> Option<&PlaygroundRun> {
        self.last_run.as_ref()
    }

    pub fn feedback(&self) -> Option<&PromptFeedback> {
        self.feedback.as_ref()
    }

    fn check_prompt(&self) -> Result<(), AppError> {
        if self.prompt.trim().is_empty() {
            return Err(AppError::validation("Please enter a prompt."));
        }
        if self.char_count() > PLAYGROUND_CHAR_LIMIT || self.word_count() > PLAYGROUND_WORD_LIMIT {
            return Err(AppError::validation(
                "Prompt exceeds character or word limit.",
            ));
        }
        Ok(())
    }

    /// Run the prompt on the selected model. The full response is available
    /// as soon as the call returns.
    pub async fn run(&mut self, gateway: &EnrichmentGateway) -> CommandResponse<PlaygroundRun> {
        self.last_run = None;
        self.feedback = None;
        if let Err(e) = self.check_prompt() {
            return CommandResponse::err(e.user_message());
        }

        match gateway.run_playground(&self.model, &self.prompt).await {
            Ok(run) => {
                self.runs += 1;
                self.last_run = Some(run.clone());
                CommandResponse::ok(run)
            }
            Err(e) => CommandResponse::from_error("playground run failed", e),
        }
    }

    /// Ask for a rating of the current prompt
    pub async fn request_feedback(
        &mut self,
        gateway: &EnrichmentGateway,
    ) -> CommandResponse<PromptFeedback> {
        self.feedback = None;
        match gateway.score_prompt("", &self.prompt).await {
            Ok(Some(feedback)) => {
                self.feedback = Some(feedback.clone());
                CommandResponse::ok(feedback)
            }
            Ok(None) => CommandResponse::err("Failed to get feedback."),
            Err(e) => CommandResponse::from_error("playground feedback failed", e),
        }
    }

    /// Response text for the clipboard
    pub fn copy_text(&self) -> Option<&str> {
        self.last_run.as_ref().map(|run| run.text.as_str())
    }

    /// Store the prompt and its response for the signed-in user
    pub async fn save(
        &self,
        repo: &PromptRepository,
        user: Option<&User>,
    ) -> CommandResponse<Prompt> {
        let Some(user) = user else {
            return CommandResponse::err("You must be logged in to save prompts.");
        };
        let response = self.copy_text().unwrap_or_default();
        match repo.save_playground(&user.id, &self.prompt, response).await {
            Ok(prompt) => CommandResponse::ok(prompt),
            Err(e @ AppError::Validation(_)) => CommandResponse::err(e.user_message()),
            Err(e) => {
                tracing::warn!(error = %e, "playground save failed");
                CommandResponse::err("Failed to save prompt.")
            }
        }
    }
}
