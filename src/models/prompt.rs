//! Prompt Models
//!
//! Data structures for stored prompts and their public projection.

use promptory_core::Category;
use serde::{Deserialize, Serialize};

/// A prompt row as seen by its owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    /// Persisted as nullable text; never holds the "Uncategorized" label
    #[serde(default)]
    pub category: Category,
    pub is_public: bool,
    /// Set only for rows saved from the playground
    pub prompt_text: Option<String>,
    pub response_text: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Prompt {
    /// Label shown on cards and filters
    pub fn category_label(&self) -> String {
        self.category.label()
    }

    /// Timestamp used for "last edited" figures
    pub fn last_touched(&self) -> &str {
        if self.updated_at.is_empty() {
            &self.created_at
        } else {
            &self.updated_at
        }
    }
}

/// The columns a non-owner may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPrompt {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prompt_text: Option<String>,
    pub is_public: bool,
    pub created_at: String,
}

/// Input for creating a prompt from the add form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPrompt {
    pub title: String,
    pub description: String,
    pub category: Category,
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub is_public: Option<bool>,
}

impl PromptPatch {
    /// Patch that only flips visibility
    pub fn visibility(is_public: bool) -> Self {
        Self {
            is_public: Some(is_public),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.is_public.is_none()
    }
}

/// Row values sent to the data API on insert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptInsert {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub is_public: bool,
    pub prompt_text: Option<String>,
    pub response_text: Option<String>,
}
