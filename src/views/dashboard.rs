//! Dashboard
//!
//! The owner's prompt list with search, category filter, stat cards,
//! visibility toggles and confirmed deletes. The in-memory list is patched
//! only after the server confirms a change.

use std::collections::HashSet;

use promptory_core::Category;
use serde::Serialize;

use super::confirm::ConfirmDialog;
use crate::models::prompt::Prompt;
use crate::models::response::CommandResponse;
use crate::services::prompt::PromptRepository;

/// Figures shown above the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatCards {
    pub total: usize,
    pub categories: usize,
    pub public: usize,
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category_label: String,
    pub is_public: bool,
    /// Label of the visibility toggle
    pub visibility_action: &'static str,
}

impl PromptCard {
    fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            id: prompt.id.clone(),
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            category_label: prompt.category_label(),
            is_public: prompt.is_public,
            visibility_action: if prompt.is_public {
                "Make Private"
            } else {
                "Make Public"
            },
        }
    }
}

#[derive(Debug)]
pub struct DashboardView {
    prompts: Vec<Prompt>,
    /// Case-insensitive substring over title and description
    pub search: String,
    /// Stored category to show, `Unset` for the uncategorized bucket; `None` shows all
    pub category_filter: Option<Category>,
    /// Last load error, shown in place of the list
    pub notice: Option<String>,
    delete_dialog: ConfirmDialog<String>,
}

impl DashboardView {
    fn with_prompts(prompts: Vec<Prompt>, notice: Option<String>) -> Self {
        Self {
            prompts,
            search: String::new(),
            category_filter: None,
            notice,
            delete_dialog: ConfirmDialog::new(
                "Delete prompt",
                "Are you sure you want to delete this prompt? This cannot be undone.",
            ),
        }
    }

    /// Load the owner's prompts. A failed load shows an empty list and a notice.
    pub async fn load(repo: &PromptRepository, owner_id: &str) -> Self {
        match repo.list(owner_id).await {
            Ok(prompts) => Self::with_prompts(prompts, None),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load prompts");
                Self::with_prompts(Vec::new(), Some("Failed to load prompts".to_string()))
            }
        }
    }

    /// Every loaded prompt, newest first
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Prompts passing the search and category filter
    pub fn visible(&self) -> Vec<&Prompt> {
        let needle = self.search.trim().to_lowercase();
        self.prompts
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .filter(|p| match &self.category_filter {
                Some(category) => p.category == *category,
                None => true,
            })
            .collect()
    }

    /// Cards for the visible prompts
    pub fn cards(&self) -> Vec<PromptCard> {
        self.visible().into_iter().map(PromptCard::from_prompt).collect()
    }

    fn distinct_categories(&self) -> HashSet<&Category> {
        self.prompts.iter().map(|p| &p.category).collect()
    }

    /// Distinct stored categories, sorted, unset last.
    /// Values differing only in case stay separate options.
    pub fn category_options(&self) -> Vec<Category> {
        let mut options: Vec<Category> = self.distinct_categories().into_iter().cloned().collect();
        options.sort_by(|a, b| {
            (a.as_str().is_none(), a.as_str()).cmp(&(b.as_str().is_none(), b.as_str()))
        });
        options
    }

    /// Filter options paired with their display labels
    pub fn category_option_labels(&self) -> Vec<(Category, String)> {
        self.category_options()
            .into_iter()
            .map(|c| {
                let label = c.label();
                (c, label)
            })
            .collect()
    }

    /// Counts the uncategorized bucket as a category
    pub fn stat_cards(&self) -> StatCards {
        let categories = self.distinct_categories();
        StatCards {
            total: self.prompts.len(),
            categories: categories.len(),
            public: self.prompts.iter().filter(|p| p.is_public).count(),
        }
    }

    /// Share link for a public prompt in the list
    pub fn share_url(&self, origin: &str, id: &str) -> Option<String> {
        self.prompts
            .iter()
            .find(|p| p.id == id && p.is_public)
            .map(|p| PromptRepository::share_url(origin, &p.id))
    }

    fn replace(&mut self, updated: &Prompt) {
        if let Some(slot) = self.prompts.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated.clone();
        }
    }

    /// Flip a prompt's visibility; the list changes only on success
    pub async fn toggle_visibility(
        &mut self,
        repo: &PromptRepository,
        id: &str,
    ) -> CommandResponse<Prompt> {
        let Some(current) = self.prompts.iter().find(|p| p.id == id) else {
            return CommandResponse::err("Prompt not found");
        };
        match repo.set_visibility(id, !current.is_public).await {
            Ok(updated) => {
                self.replace(&updated);
                CommandResponse::ok(updated)
            }
            Err(e) => CommandResponse::from_error("visibility toggle failed", e),
        }
    }

    /// Open the delete confirmation for a prompt
    pub fn request_delete(&mut self, id: &str) {
        self.delete_dialog.request(id.to_string());
    }

    pub fn delete_dialog(&self) -> &ConfirmDialog<String> {
        &self.delete_dialog
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog.cancel();
    }

    /// Delete the prompt awaiting confirmation and drop it from the list
    pub async fn confirm_delete(&mut self, repo: &PromptRepository) -> CommandResponse<String> {
        let Some(id) = self.delete_dialog.confirm() else {
            return CommandResponse::err("Nothing to delete");
        };
        match repo.delete(&id).await {
            Ok(()) => {
                self.prompts.retain(|p| p.id != id);
                CommandResponse::ok(id)
            }
            Err(e) => CommandResponse::from_error("delete failed", e),
        }
    }

    /// Reload from the server, keeping search and filter
    pub async fn refresh(&mut self, repo: &PromptRepository, owner_id: &str) {
        let fresh = Self::load(repo, owner_id).await;
        self.prompts = fresh.prompts;
        self.notice = fresh.notice;
    }
}
