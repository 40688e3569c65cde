//! Public prompt page, readable without signing in.

use serde::Serialize;

use crate::models::prompt::PublicPrompt;
use crate::services::prompt::PromptRepository;
use crate::utils::error::AppError;

const SITE_TITLE: &str = "Public Prompt | Promptory";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PublicPromptView {
    Loaded {
        prompt: PublicPrompt,
        page_title: String,
        meta_description: String,
    },
    /// Missing and private prompts render the same way
    Unavailable {
        page_title: String,
        message: String,
    },
}

impl PublicPromptView {
    pub async fn load(repo: &PromptRepository, id: &str) -> Self {
        match repo.get_public(id).await {
            Ok(prompt) => Self::from_prompt(prompt),
            Err(e) => Self::unavailable(&e),
        }
    }

    fn from_prompt(prompt: PublicPrompt) -> Self {
        Self::Loaded {
            page_title: format!("{} | {}", prompt.title, SITE_TITLE),
            meta_description: prompt.description.clone(),
            prompt,
        }
    }

    fn unavailable(error: &AppError) -> Self {
        Self::Unavailable {
            page_title: SITE_TITLE.to_string(),
            message: error.user_message(),
        }
    }

    pub fn page_title(&self) -> &str {
        match self {
            Self::Loaded { page_title, .. } | Self::Unavailable { page_title, .. } => page_title,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}
