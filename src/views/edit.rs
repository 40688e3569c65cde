//! Edit page: the owner's prompt, its form, visibility and share link.
//! Saving overwrites the stored prompt, so it waits for confirmation.

use super::confirm::ConfirmDialog;
use super::prompt_form::PromptForm;
use crate::models::prompt::Prompt;
use crate::models::response::CommandResponse;
use crate::services::enrichment::EnrichmentGateway;
use crate::services::prompt::PromptRepository;
use crate::utils::error::AppResult;

#[derive(Debug, Clone)]
pub struct EditView {
    prompt: Prompt,
    pub form: PromptForm,
    save_dialog: ConfirmDialog<()>,
}

impl EditView {
    /// Load a prompt owned by the signed-in user. Anyone else gets not found.
    pub async fn load(repo: &PromptRepository, id: &str) -> AppResult<Self> {
        let prompt = repo.get_owned(id).await?;
        Ok(Self {
            form: PromptForm::from_prompt(&prompt),
            prompt,
            save_dialog: ConfirmDialog::new(
                "Confirm Update?",
                "This will overwrite the current prompt data. Are you sure you want to proceed?",
            ),
        })
    }

    /// Last saved state
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Form differs from the saved prompt
    pub fn is_dirty(&self) -> bool {
        self.form != PromptForm::from_prompt(&self.prompt)
    }

    /// Check the form and open the save confirmation. Invalid forms never open it.
    pub fn request_save(&mut self) -> CommandResponse<()> {
        match self.form.validate_edit() {
            Ok(()) => {
                self.save_dialog.request(());
                CommandResponse::ok(())
            }
            Err(e) => CommandResponse::err(e.user_message()),
        }
    }

    pub fn save_dialog(&self) -> &ConfirmDialog<()> {
        &self.save_dialog
    }

    /// Close the confirmation; the form keeps its edits
    pub fn cancel_save(&mut self) {
        self.save_dialog.cancel();
    }

    /// Write the form once the confirmation is accepted
    pub async fn confirm_save(
        &mut self,
        repo: &PromptRepository,
        gateway: &EnrichmentGateway,
    ) -> CommandResponse<Prompt> {
        if self.save_dialog.confirm().is_none() {
            return CommandResponse::err("Nothing to save");
        }
        let id = self.prompt.id.clone();
        match self.form.submit_edit(repo, gateway, &id).await {
            Ok(updated) => {
                self.prompt = updated.clone();
                CommandResponse::ok(updated)
            }
            Err(e) => CommandResponse::from_error("prompt save failed", e),
        }
    }

    /// Flip visibility. Unsaved form edits are kept.
    pub async fn toggle_visibility(&mut self, repo: &PromptRepository) -> CommandResponse<Prompt> {
        match repo
            .set_visibility(&self.prompt.id, !self.prompt.is_public)
            .await
        {
            Ok(updated) => {
                self.prompt.is_public = updated.is_public;
                self.prompt.updated_at = updated.updated_at.clone();
                CommandResponse::ok(updated)
            }
            Err(e) => CommandResponse::from_error("visibility toggle failed", e),
        }
    }

    pub fn share_url(&self, origin: &str) -> Option<String> {
        self.prompt
            .is_public
            .then(|| PromptRepository::share_url(origin, &self.prompt.id))
    }
}
