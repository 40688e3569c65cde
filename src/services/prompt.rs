//! Prompt Repository
//!
//! CRUD over the `prompts` table. Content is validated here before any
//! backend call; ownership is enforced by the backend.

use std::sync::Arc;

use promptory_core::{check_description, check_title};

use crate::backend::DataApi;
use crate::models::prompt::{NewPrompt, Prompt, PromptInsert, PromptPatch, PublicPrompt};
use crate::utils::error::{AppError, AppResult};

/// Service for managing stored prompts
#[derive(Clone)]
pub struct PromptRepository {
    data: Arc<dyn DataApi>,
}

impl PromptRepository {
    pub fn new(data: Arc<dyn DataApi>) -> Self {
        Self { data }
    }

    /// The owner's prompts, newest first
    pub async fn list(&self, owner_id: &str) -> AppResult<Vec<Prompt>> {
        self.data.list_prompts(owner_id).await
    }

    /// A prompt owned by the signed-in user
    pub async fn get_owned(&self, id: &str) -> AppResult<Prompt> {
        self.data
            .get_prompt(id)
            .await?
            .ok_or_else(|| AppError::not_found("Prompt not found"))
    }

    /// Validate and insert a new private prompt
    pub async fn create(&self, owner_id: &str, prompt: NewPrompt) -> AppResult<Prompt> {
        validate_new(&prompt)?;

        let created = self
            .data
            .insert_prompt(PromptInsert {
                user_id: owner_id.to_string(),
                title: prompt.title.trim().to_string(),
                description: prompt.description.trim().to_string(),
                category: prompt.category,
                is_public: false,
                prompt_text: None,
                response_text: None,
            })
            .await?;
        tracing::info!(prompt_id = %created.id, "prompt created");
        Ok(created)
    }

    /// Apply a partial update; provided title and description are re-validated
    pub async fn update(&self, id: &str, mut patch: PromptPatch) -> AppResult<Prompt> {
        if patch.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        if let Some(title) = &patch.title {
            check_title(title)?;
            patch.title = Some(title.trim().to_string());
        }
        if let Some(description) = &patch.description {
            check_description(description)?;
            patch.description = Some(description.trim().to_string());
        }
        self.data.update_prompt(id, patch).await
    }

    /// Set visibility and return the stored prompt
    pub async fn set_visibility(&self, id: &str, is_public: bool) -> AppResult<Prompt> {
        let prompt = self
            .data
            .update_prompt(id, PromptPatch::visibility(is_public))
            .await?;
        tracing::info!(prompt_id = %id, is_public, "visibility changed");
        Ok(prompt)
    }

    /// Irreversibly delete a prompt
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.data.delete_prompt(id).await?;
        tracing::info!(prompt_id = %id, "prompt deleted");
        Ok(())
    }

    /// Read a public prompt.
    ///
    /// Missing ids, private rows and backend failures all produce the same
    /// [`AppError::PrivateOrMissing`].
    pub async fn get_public(&self, id: &str) -> AppResult<PublicPrompt> {
        match self.data.get_public_prompt(id).await {
            Ok(Some(prompt)) if prompt.is_public => Ok(prompt),
            Ok(_) => Err(AppError::PrivateOrMissing),
            Err(e) => {
                tracing::debug!(error = %e, "public prompt lookup failed");
                Err(AppError::PrivateOrMissing)
            }
        }
    }

    /// Share link for a prompt: `<origin>/public/<id>`
    pub fn share_url(origin: &str, id: &str) -> String {
        format!("{}/public/{}", origin.trim_end_matches('/'), id)
    }

    /// Store a playground prompt and its response
    pub async fn save_playground(
        &self,
        owner_id: &str,
        prompt_text: &str,
        response_text: &str,
    ) -> AppResult<Prompt> {
        if prompt_text.trim().is_empty() || response_text.trim().is_empty() {
            return Err(AppError::validation("Prompt and response required."));
        }
        self.data
            .insert_prompt(PromptInsert {
                user_id: owner_id.to_string(),
                prompt_text: Some(prompt_text.to_string()),
                response_text: Some(response_text.to_string()),
                ..Default::default()
            })
            .await
    }
}

/// Checks applied before creating a prompt
pub fn validate_new(prompt: &NewPrompt) -> AppResult<()> {
    check_title(&prompt.title)?;
    check_description(&prompt.description)?;
    if !prompt.category.is_set() {
        return Err(AppError::validation("Category is required"));
    }
    Ok(())
}
