//! Content Limit Tests
//!
//! Over-limit or empty content is rejected before anything reaches the
//! data layer.

use promptory::models::prompt::{NewPrompt, PromptPatch};
use promptory::services::prompt::PromptRepository;
use promptory::views::{CategoryChoice, PromptForm};
use promptory_core::{Category, DESCRIPTION_LIMIT, TITLE_LIMIT};

use super::common::{gateway, signed_in, CountingData, MockLlmProvider};

#[tokio::test]
async fn test_over_limit_create_makes_no_write() {
    let (backend, user) = signed_in("ada@example.com").await;
    let data = CountingData::new(backend.clone());
    let repo = PromptRepository::new(data.clone());

    let long_title = NewPrompt {
        title: "t".repeat(TITLE_LIMIT + 1),
        description: "Fine".to_string(),
        category: Category::named("writing"),
    };
    assert!(repo.create(&user.id, long_title).await.unwrap_err().is_validation());

    let long_description = NewPrompt {
        title: "Fine".to_string(),
        description: "d".repeat(DESCRIPTION_LIMIT + 1),
        category: Category::named("writing"),
    };
    assert!(repo
        .create(&user.id, long_description)
        .await
        .unwrap_err()
        .is_validation());

    assert_eq!(data.writes(), 0);
    assert!(repo.list(&user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_limits_are_inclusive() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = PromptRepository::new(backend);

    let created = repo
        .create(
            &user.id,
            NewPrompt {
                title: "t".repeat(TITLE_LIMIT),
                description: "d".repeat(DESCRIPTION_LIMIT),
                category: Category::named("coding"),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.title.chars().count(), TITLE_LIMIT);
    assert!(!created.is_public);
}

#[tokio::test]
async fn test_over_limit_update_makes_no_write() {
    let (backend, user) = signed_in("ada@example.com").await;
    let data = CountingData::new(backend.clone());
    let repo = PromptRepository::new(data.clone());
    let created = repo
        .create(
            &user.id,
            NewPrompt {
                title: "Summarize Articles".to_string(),
                description: "Condense long reads".to_string(),
                category: Category::named("writing"),
            },
        )
        .await
        .unwrap();
    assert_eq!(data.writes(), 1);

    let err = repo
        .update(
            &created.id,
            PromptPatch {
                description: Some("d".repeat(DESCRIPTION_LIMIT + 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(data.writes(), 1);
}

#[tokio::test]
async fn test_form_blocks_submission_without_calls() {
    let (backend, user) = signed_in("ada@example.com").await;
    let data = CountingData::new(backend.clone());
    let repo = PromptRepository::new(data.clone());
    let provider = MockLlmProvider::replying(&["writing"]);
    let gateway = gateway(provider.clone());

    let mut form = PromptForm {
        title: "x".repeat(TITLE_LIMIT + 1),
        description: "Condense long reads".to_string(),
        category: CategoryChoice::Auto,
    };
    assert!(form.title_over_limit());
    assert!(form.submit_new(&repo, &gateway, &user.id).await.is_err());

    let mut form = PromptForm {
        title: "Summarize Articles".to_string(),
        description: "Condense long reads".to_string(),
        category: CategoryChoice::None,
    };
    let err = form.submit_new(&repo, &gateway, &user.id).await.unwrap_err();
    assert_eq!(err.user_message(), "Please select a category");

    assert_eq!(provider.calls(), 0);
    assert_eq!(data.writes(), 0);
}
