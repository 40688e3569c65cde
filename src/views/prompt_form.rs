//! Prompt Form
//!
//! State behind the add and edit forms: fields, counters, category choice,
//! validation and submission.
//!
//! Submission and generation take `&mut self`, so one form cannot run two
//! of them at once.

use promptory_core::{
    char_len, check_description, check_title, Category, DESCRIPTION_LIMIT, SUGGESTED_CATEGORIES,
    TITLE_LIMIT,
};

use crate::models::enrichment::DescriptionMode;
use crate::models::prompt::{NewPrompt, Prompt, PromptPatch};
use crate::services::enrichment::EnrichmentGateway;
use crate::services::prompt::PromptRepository;
use crate::utils::error::{AppError, AppResult};

/// Category picker state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    /// One of the suggested categories
    Suggested(String),
    /// Free-form value typed by the user
    Other(String),
    /// Ask the classifier on submit
    Auto,
    /// Nothing picked
    #[default]
    None,
}

impl CategoryChoice {
    /// Picker state for a stored category
    pub fn from_category(category: &Category) -> Self {
        match category.as_str() {
            Some(name) if category.is_suggested() => Self::Suggested(name.to_string()),
            Some(name) => Self::Other(name.to_string()),
            None => Self::None,
        }
    }

    /// Options listed by the picker, in order
    pub fn suggestions() -> &'static [&'static str] {
        &SUGGESTED_CATEGORIES
    }

    /// Resolve without the classifier; `None` for `Auto`
    fn resolve_static(&self) -> AppResult<Option<Category>> {
        match self {
            Self::Suggested(name) | Self::Other(name) => {
                let category = Category::named(name);
                if category.is_set() {
                    Ok(Some(category))
                } else {
                    Err(AppError::validation("Please enter a custom category"))
                }
            }
            Self::None => Ok(Some(Category::Unset)),
            Self::Auto => Ok(None),
        }
    }
}

/// Add/edit form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptForm {
    pub title: String,
    pub description: String,
    pub category: CategoryChoice,
}

impl PromptForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from a stored prompt
    pub fn from_prompt(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            category: CategoryChoice::from_category(&prompt.category),
        }
    }

    /// "used / limit" for the title field
    pub fn title_counter(&self) -> String {
        format!("{} / {}", char_len(&self.title), TITLE_LIMIT)
    }

    /// "used / limit" for the description field
    pub fn description_counter(&self) -> String {
        format!("{} / {}", char_len(&self.description), DESCRIPTION_LIMIT)
    }

    pub fn title_over_limit(&self) -> bool {
        char_len(&self.title) > TITLE_LIMIT
    }

    pub fn description_over_limit(&self) -> bool {
        char_len(&self.description) > DESCRIPTION_LIMIT
    }

    /// Field checks that block submission
    pub fn validate(&self) -> AppResult<()> {
        check_title(&self.title)?;
        check_description(&self.description)?;
        self.category.resolve_static()?;
        Ok(())
    }

    async fn resolve_category(&self, gateway: &EnrichmentGateway) -> AppResult<Category> {
        match self.category.resolve_static()? {
            Some(category) => Ok(category),
            None => Ok(gateway
                .infer_category(&self.title, &self.description)
                .await
                .into()),
        }
    }

    /// Create a new prompt. A category must be chosen or left to the classifier.
    pub async fn submit_new(
        &mut self,
        repo: &PromptRepository,
        gateway: &EnrichmentGateway,
        owner_id: &str,
    ) -> AppResult<Prompt> {
        self.validate()?;
        if self.category == CategoryChoice::None {
            return Err(AppError::validation("Please select a category"));
        }

        let category = self.resolve_category(gateway).await?;
        let prompt = repo
            .create(
                owner_id,
                NewPrompt {
                    title: self.title.clone(),
                    description: self.description.clone(),
                    category,
                },
            )
            .await?;
        *self = Self::new();
        Ok(prompt)
    }

    /// Checks for an edit. An existing prompt cannot lose its category.
    pub fn validate_edit(&self) -> AppResult<()> {
        if self.category == CategoryChoice::None {
            return Err(AppError::validation("All fields are required."));
        }
        self.validate()
    }

    /// Save changes to an existing prompt
    pub async fn submit_edit(
        &mut self,
        repo: &PromptRepository,
        gateway: &EnrichmentGateway,
        id: &str,
    ) -> AppResult<Prompt> {
        self.validate_edit()?;
        let category = self.resolve_category(gateway).await?;
        let prompt = repo
            .update(
                id,
                PromptPatch {
                    title: Some(self.title.clone()),
                    description: Some(self.description.clone()),
                    category: Some(category),
                    is_public: None,
                },
            )
            .await?;
        *self = Self::from_prompt(&prompt);
        Ok(prompt)
    }

    /// Fill the description from the generator. Returns whether it changed.
    pub async fn generate_description(
        &mut self,
        gateway: &EnrichmentGateway,
        mode: DescriptionMode,
    ) -> AppResult<bool> {
        match gateway
            .generate_description(&self.title, mode, &self.description)
            .await?
        {
            Some(text) => {
                self.description = text;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
