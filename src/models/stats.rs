//! Stats Models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::prompt::Prompt;

/// Summary figures for an owner's prompts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStats {
    pub total: usize,
    pub shared: usize,
    /// Most frequent named category; ties go to the first seen
    pub most_used_category: Option<String>,
    /// Latest of updated_at (or created_at when never updated)
    pub last_edited: Option<String>,
}

impl PromptStats {
    pub fn compute(prompts: &[Prompt]) -> Self {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (order, prompt) in prompts.iter().enumerate() {
            if let Some(name) = prompt.category.as_str() {
                counts.entry(name).or_insert((0, order)).0 += 1;
            }
        }
        let most_used_category = counts
            .into_iter()
            .max_by(|(_, (a, a_order)), (_, (b, b_order))| a.cmp(b).then(b_order.cmp(a_order)))
            .map(|(name, _)| name.to_string());

        // RFC 3339 UTC strings sort lexically
        let last_edited = prompts
            .iter()
            .map(Prompt::last_touched)
            .filter(|ts| !ts.is_empty())
            .max()
            .map(str::to_string);

        Self {
            total: prompts.len(),
            shared: prompts.iter().filter(|p| p.is_public).count(),
            most_used_category,
            last_edited,
        }
    }
}
