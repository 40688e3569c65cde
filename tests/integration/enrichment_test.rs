//! Enrichment Tests
//!
//! Description generation and category inference against a mock provider.

use promptory::models::enrichment::{DescriptionMode, InferredCategory};
use promptory::views::{CategoryChoice, PromptForm};
use promptory_core::{Category, DESCRIPTION_LIMIT, SUGGESTED_CATEGORIES};
use promptory_llm::LlmError;

use super::common::{gateway, repo, signed_in, MockLlmProvider};

#[tokio::test]
async fn test_generate_with_empty_title_makes_no_call() {
    let provider = MockLlmProvider::replying(&["unused"]);
    let gateway = gateway(provider.clone());

    let err = gateway
        .generate_description("", DescriptionMode::Normal, "")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(provider.calls(), 0);

    let mut form = PromptForm::new();
    form.title = "   ".to_string();
    assert!(form
        .generate_description(&gateway, DescriptionMode::Short)
        .await
        .is_err());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_generated_description_fills_form() {
    let long = "x".repeat(DESCRIPTION_LIMIT + 50);
    let provider = MockLlmProvider::replying(&["  Turns articles into bullet points.  ", long.as_str()]);
    let gateway = gateway(provider.clone());

    let mut form = PromptForm::new();
    form.title = "Summarize Articles".to_string();
    assert!(form
        .generate_description(&gateway, DescriptionMode::Normal)
        .await
        .unwrap());
    assert_eq!(form.description, "Turns articles into bullet points.");

    assert!(form
        .generate_description(&gateway, DescriptionMode::Detailed)
        .await
        .unwrap());
    assert_eq!(form.description.chars().count(), DESCRIPTION_LIMIT);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_generation_failure_leaves_description() {
    let provider = MockLlmProvider::new(vec![Err(LlmError::RateLimited {
        message: "slow down".to_string(),
    })]);
    let gateway = gateway(provider.clone());

    let mut form = PromptForm::new();
    form.title = "Summarize Articles".to_string();
    form.description = "Typed by hand".to_string();
    assert!(!form
        .generate_description(&gateway, DescriptionMode::Short)
        .await
        .unwrap());
    assert_eq!(form.description, "Typed by hand");
}

#[tokio::test]
async fn test_inferred_category_stays_in_allowed_set() {
    let outputs = [
        "Writing",
        "  MARKETING\n",
        "coding",
        "design",
        "poetry",
        "I think this is writing",
        "",
    ];
    let provider = MockLlmProvider::replying(&outputs);
    let gateway = gateway(provider.clone());

    let mut allowed: Vec<&str> = SUGGESTED_CATEGORIES.to_vec();
    allowed.push("other");

    let mut results = Vec::new();
    // One extra call hits the exhausted queue and fails
    for _ in 0..outputs.len() + 1 {
        let inferred = gateway
            .infer_category("Summarize Articles", "Condense long reads")
            .await;
        assert!(allowed.contains(&inferred.as_str()));
        results.push(inferred);
    }
    assert_eq!(results[0], InferredCategory::Suggested("writing"));
    assert_eq!(results[1], InferredCategory::Suggested("marketing"));
    assert_eq!(results[4], InferredCategory::Other);
    assert_eq!(results[5], InferredCategory::Other);
    assert_eq!(results[7], InferredCategory::Other);
}

#[tokio::test]
async fn test_auto_category_on_submit() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let provider = MockLlmProvider::replying(&["Coding"]);
    let gateway = gateway(provider.clone());

    let mut form = PromptForm {
        title: "Refactor helper".to_string(),
        description: "Suggest a cleaner version of a function".to_string(),
        category: CategoryChoice::Auto,
    };
    let created = form.submit_new(&repo, &gateway, &user.id).await.unwrap();
    assert_eq!(created.category, Category::named("coding"));
    assert_eq!(created.category_label(), "Coding");
    assert_eq!(provider.calls(), 1);
    // The form resets after a successful create
    assert_eq!(form, PromptForm::new());
}

#[tokio::test]
async fn test_explicit_category_skips_classifier() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let provider = MockLlmProvider::replying(&[]);
    let gateway = gateway(provider.clone());

    let mut form = PromptForm {
        title: "Grandma's soup".to_string(),
        description: "Turn notes into a recipe card".to_string(),
        category: CategoryChoice::Other("Recipes".to_string()),
    };
    let created = form.submit_new(&repo, &gateway, &user.id).await.unwrap();
    assert_eq!(created.category.as_str(), Some("Recipes"));
    assert_eq!(provider.calls(), 0);
}
