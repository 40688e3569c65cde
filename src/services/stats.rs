//! Prompt Stats
//!
//! Summary figures for the stats page, computed from the owner's list.

use crate::models::stats::PromptStats;
use crate::services::prompt::PromptRepository;
use crate::utils::error::AppResult;

/// Load the owner's prompts and summarize them
pub async fn load_stats(repo: &PromptRepository, owner_id: &str) -> AppResult<PromptStats> {
    let prompts = repo.list(owner_id).await?;
    Ok(PromptStats::compute(&prompts))
}
