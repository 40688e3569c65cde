//! Prompt Category
//!
//! A category is either a named value (one of the suggested set or any
//! free-form string) or unset. "Uncategorized" is only ever a display label;
//! it is never stored.

use serde::{Deserialize, Serialize};

/// Suggested categories offered by forms and accepted from classification
pub const SUGGESTED_CATEGORIES: [&str; 4] = ["writing", "marketing", "coding", "design"];

/// Category used when classification output is outside the suggested set
pub const FALLBACK_CATEGORY: &str = "other";

/// Display label for prompts without a category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Category of a prompt, persisted as a nullable string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Category {
    Named(String),
    #[default]
    Unset,
}

impl Category {
    /// Build a category from a raw value; blank strings are unset
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if !s.is_empty() => Self::Named(s.to_string()),
            _ => Self::Unset,
        }
    }

    /// Build a named category; blank input yields `Unset`
    pub fn named(name: impl AsRef<str>) -> Self {
        Self::from_raw(Some(name.as_ref()))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// The stored value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(s) => Some(s),
            Self::Unset => None,
        }
    }

    /// Whether the value is one of [`SUGGESTED_CATEGORIES`]
    pub fn is_suggested(&self) -> bool {
        self.as_str()
            .map(|s| SUGGESTED_CATEGORIES.contains(&s))
            .unwrap_or(false)
    }

    /// Render-time label: capitalized name, or "Uncategorized"
    pub fn label(&self) -> String {
        match self {
            Self::Unset => UNCATEGORIZED_LABEL.to_string(),
            Self::Named(s) => {
                let mut chars = s.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => UNCATEGORIZED_LABEL.to_string(),
                }
            }
        }
    }
}

impl From<Option<String>> for Category {
    fn from(raw: Option<String>) -> Self {
        Self::from_raw(raw.as_deref())
    }
}

impl From<Category> for Option<String> {
    fn from(category: Category) -> Self {
        match category {
            Category::Named(s) => Some(s),
            Category::Unset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_capitalizes() {
        assert_eq!(Category::named("writing").label(), "Writing");
        assert_eq!(Category::named("ux research").label(), "Ux research");
    }

    #[test]
    fn test_unset_label_is_uncategorized() {
        assert_eq!(Category::Unset.label(), "Uncategorized");
        assert_eq!(Category::from_raw(Some("  ")).label(), "Uncategorized");
    }

    #[test]
    fn test_serde_as_nullable_string() {
        let json = serde_json::to_string(&Category::named("coding")).unwrap();
        assert_eq!(json, "\"coding\"");
        let json = serde_json::to_string(&Category::Unset).unwrap();
        assert_eq!(json, "null");

        let parsed: Category = serde_json::from_str("\"\"").unwrap();
        assert_eq!(parsed, Category::Unset);
    }

    #[test]
    fn test_uncategorized_is_never_stored() {
        let stored: Option<String> = Category::Unset.into();
        assert!(stored.is_none());
    }

    #[test]
    fn test_is_suggested() {
        assert!(Category::named("design").is_suggested());
        assert!(!Category::named("poetry").is_suggested());
        assert!(!Category::Unset.is_suggested());
    }
}
