//! Prompt Enrichment Gateway
//!
//! LLM-assisted description generation, category inference, prompt scoring
//! and playground runs. Every call is a single request: no streaming and
//! no retry. Enrichment failures degrade to "no result" so the caller can
//! fall back to manual input; playground failures are surfaced.

use std::sync::Arc;
use std::time::Instant;

use promptory_core::{truncate_chars, DESCRIPTION_LIMIT};
use promptory_llm::{LlmProvider, LlmRequestOptions, Message};

use crate::models::enrichment::{DescriptionMode, InferredCategory, PlaygroundRun, PromptFeedback};
use crate::utils::error::{AppError, AppResult};

/// Temperature for free-form generation
pub const GENERATION_TEMPERATURE: f64 = 0.7;

/// Temperature for classification and scoring
pub const CLASSIFICATION_TEMPERATURE: f64 = 0.3;

const DESCRIPTION_SYSTEM: &str = "You are an AI assistant that writes AI prompt descriptions.";

const CATEGORY_SYSTEM: &str = "You are an expert classifier that assigns a category to AI prompts. \
Possible categories are: writing, marketing, coding, design.";

const FEEDBACK_SYSTEM: &str = "You are an expert prompt engineer. Rate the following prompt from 1-10, \
judge its tone and clarity, and suggest improvements. Reply in the format:\n\
Rating: X/10\nTone: ...\nClarity: ...\nImprovements: ...";

const PLAYGROUND_SYSTEM: &str = "You are a helpful AI assistant.";

/// Text shown when a playground run returns no content
pub const EMPTY_PLAYGROUND_RESPONSE: &str = "No response.";

/// Build the user message for description generation.
///
/// Short and detailed modes rework the current description; without one
/// they fall back to composing from the title.
pub fn build_description_request(title: &str, mode: DescriptionMode, current: &str) -> String {
    let current = current.trim();
    match mode {
        DescriptionMode::Short if !current.is_empty() => format!(
            "Rewrite the following description to be concise and clear, and keep it under {} characters.\n\nDescription: \"{}\"",
            DESCRIPTION_LIMIT, current
        ),
        DescriptionMode::Detailed if !current.is_empty() => format!(
            "Enrich the following description with more details, but keep it under {} characters. \
             Avoid unnecessary fluff or repetition.\n\nDescription: \"{}\"",
            DESCRIPTION_LIMIT, current
        ),
        _ => format!(
            "Write a short and clear description for this prompt title: \"{}\". \
             The description must be under {} characters.",
            title.trim(),
            DESCRIPTION_LIMIT
        ),
    }
}

/// Build the user message for category inference
pub fn build_category_request(title: &str, description: &str) -> String {
    format!(
        "Assign a category to this prompt: \nTitle: \"{}\"\nDescription: \"{}\". \n\
         Return only one word: writing, marketing, coding or design.",
        title.trim(),
        description.trim()
    )
}

fn build_feedback_request(title: &str, description: &str) -> String {
    let title = title.trim();
    let description = description.trim();
    if title.is_empty() {
        description.to_string()
    } else {
        format!("Title: {}\nPrompt: {}", title, description)
    }
}

/// Gateway over a completion provider with a fixed model
pub struct EnrichmentGateway {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl EnrichmentGateway {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Model used for enrichment calls
    pub fn model(&self) -> &str {
        &self.model
    }

    fn options(&self, temperature: f64) -> LlmRequestOptions {
        LlmRequestOptions {
            temperature_override: Some(temperature),
            model_override: Some(self.model.clone()),
        }
    }

    /// Single completion; `Ok(None)` for empty content
    async fn complete(
        &self,
        system: &str,
        user: String,
        options: LlmRequestOptions,
    ) -> AppResult<Option<String>> {
        let response = self
            .provider
            .send_message(vec![Message::user(user)], Some(system.to_string()), options)
            .await?;
        Ok(response.text().map(str::to_string))
    }

    /// Generate a description.
    ///
    /// An empty title is rejected before any network call. Provider failures
    /// and empty output return `Ok(None)`. Output is trimmed and cut to the
    /// description limit.
    pub async fn generate_description(
        &self,
        title: &str,
        mode: DescriptionMode,
        current_description: &str,
    ) -> AppResult<Option<String>> {
        if title.trim().is_empty() {
            return Err(AppError::validation(
                "Please enter a title before generating a description.",
            ));
        }

        let request = build_description_request(title, mode, current_description);
        match self
            .complete(
                DESCRIPTION_SYSTEM,
                request,
                self.options(GENERATION_TEMPERATURE),
            )
            .await
        {
            Ok(text) => Ok(text.map(|t| truncate_chars(&t, DESCRIPTION_LIMIT))),
            Err(e) => {
                tracing::warn!(error = %e, mode = mode.as_str(), "description generation failed");
                Ok(None)
            }
        }
    }

    /// Classify a prompt. Output outside the suggested set, and any failure,
    /// maps to [`InferredCategory::Other`].
    pub async fn infer_category(&self, title: &str, description: &str) -> InferredCategory {
        let request = build_category_request(title, description);
        match self
            .complete(
                CATEGORY_SYSTEM,
                request,
                self.options(CLASSIFICATION_TEMPERATURE),
            )
            .await
        {
            Ok(Some(text)) => InferredCategory::from_output(&text),
            Ok(None) => InferredCategory::Other,
            Err(e) => {
                tracing::warn!(error = %e, "category inference failed");
                InferredCategory::Other
            }
        }
    }

    /// Score a prompt. Failure or unparseable output returns `Ok(None)`.
    pub async fn score_prompt(
        &self,
        title: &str,
        description: &str,
    ) -> AppResult<Option<PromptFeedback>> {
        if title.trim().is_empty() && description.trim().is_empty() {
            return Err(AppError::validation("Please enter a prompt."));
        }

        let request = build_feedback_request(title, description);
        match self
            .complete(
                FEEDBACK_SYSTEM,
                request,
                self.options(CLASSIFICATION_TEMPERATURE),
            )
            .await
        {
            Ok(Some(text)) => {
                let feedback = PromptFeedback::parse(&text);
                if feedback.is_none() {
                    tracing::debug!("feedback output had no rating");
                }
                Ok(feedback)
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "prompt scoring failed");
                Ok(None)
            }
        }
    }

    /// Run a prompt against a chosen model. Errors are returned to the caller.
    pub async fn run_playground(&self, model: &str, prompt: &str) -> AppResult<PlaygroundRun> {
        if prompt.trim().is_empty() {
            return Err(AppError::validation("Please enter a prompt."));
        }
        let model = if model.trim().is_empty() {
            self.model.clone()
        } else {
            model.to_string()
        };

        let started = Instant::now();
        let text = self
            .complete(
                PLAYGROUND_SYSTEM,
                prompt.to_string(),
                LlmRequestOptions {
                    temperature_override: Some(GENERATION_TEMPERATURE),
                    model_override: Some(model.clone()),
                },
            )
            .await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(model = %model, elapsed_ms, "playground run finished");

        Ok(PlaygroundRun {
            model,
            text: text.unwrap_or_else(|| EMPTY_PLAYGROUND_RESPONSE.to_string()),
            elapsed_ms,
        })
    }
}
