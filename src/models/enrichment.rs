//! Enrichment Models
//!
//! Inputs and outputs of LLM-assisted enrichment.

use promptory_core::{Category, FALLBACK_CATEGORY, SUGGESTED_CATEGORIES};
use serde::{Deserialize, Serialize};

/// How a generated description relates to the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionMode {
    /// Compose from the title
    #[default]
    Normal,
    /// Rewrite the current description concisely
    Short,
    /// Enrich the current description
    Detailed,
}

impl DescriptionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Short => "short",
            Self::Detailed => "detailed",
        }
    }
}

/// Outcome of category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum InferredCategory {
    /// One of the suggested categories
    Suggested(&'static str),
    /// Anything else, including failed classification
    Other,
}

impl InferredCategory {
    /// Map raw model output: lowercase, trim, then match the suggested set
    pub fn from_output(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        SUGGESTED_CATEGORIES
            .iter()
            .copied()
            .find(|name| *name == normalized)
            .map(Self::Suggested)
            .unwrap_or(Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suggested(name) => name,
            Self::Other => FALLBACK_CATEGORY,
        }
    }
}

impl From<InferredCategory> for Category {
    fn from(inferred: InferredCategory) -> Self {
        Category::named(inferred.as_str())
    }
}

impl From<InferredCategory> for String {
    fn from(inferred: InferredCategory) -> Self {
        inferred.as_str().to_string()
    }
}

/// Structured feedback on a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFeedback {
    /// Score out of 10
    pub rating: u8,
    pub tone: Option<String>,
    pub clarity: Option<String>,
    pub improvement: Option<String>,
}

impl PromptFeedback {
    /// Parse "Rating: X/10" style output. Returns `None` without a usable rating.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rating = None;
        let mut tone = None;
        let mut clarity = None;
        let mut improvement = None;

        for line in text.lines() {
            let line = line.trim().trim_start_matches(['-', '*', ' ']);
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().trim_matches('*').trim();
            match key.trim().trim_matches('*').to_ascii_lowercase().as_str() {
                "rating" | "score" => rating = parse_rating(value),
                "tone" => tone = non_empty(value),
                "clarity" => clarity = non_empty(value),
                "improvement" | "improvements" => improvement = non_empty(value),
                _ => {}
            }
        }

        rating.map(|rating| Self {
            rating,
            tone,
            clarity,
            improvement,
        })
    }
}

fn parse_rating(value: &str) -> Option<u8> {
    let score = value.split('/').next()?.trim();
    let rating: u8 = score.parse().ok()?;
    (1..=10).contains(&rating).then_some(rating)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Result of an ad hoc playground run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundRun {
    pub model: String,
    pub text: String,
    pub elapsed_ms: u64,
}
