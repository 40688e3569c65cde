//! Sharing and Ownership Tests
//!
//! Public reads succeed only for public prompts, missing and private ids
//! look the same, and only the owner can change a prompt.

use promptory::models::prompt::{NewPrompt, PromptPatch};
use promptory::services::prompt::PromptRepository;
use promptory::views::PublicPromptView;
use promptory::AppError;
use promptory_core::Category;

use super::common::{anonymous_session, repo, second_session, signed_in, ORIGIN};

fn new_prompt(title: &str) -> NewPrompt {
    NewPrompt {
        title: title.to_string(),
        description: "Condense long reads into five bullet points".to_string(),
        category: Category::named("writing"),
    }
}

// ============================================================================
// Public read path
// ============================================================================

#[tokio::test]
async fn test_public_read_tracks_visibility() {
    let (owner, user) = signed_in("ada@example.com").await;
    let owner_repo = repo(&owner);
    let created = owner_repo
        .create(&user.id, new_prompt("Summarize Articles"))
        .await
        .unwrap();

    let visitor = repo(&anonymous_session(&owner));
    assert!(matches!(
        visitor.get_public(&created.id).await,
        Err(AppError::PrivateOrMissing)
    ));

    owner_repo.set_visibility(&created.id, true).await.unwrap();
    let public = visitor.get_public(&created.id).await.unwrap();
    assert_eq!(public.id, created.id);
    assert_eq!(public.title, "Summarize Articles");
    assert!(public.is_public);

    owner_repo.set_visibility(&created.id, false).await.unwrap();
    assert!(visitor.get_public(&created.id).await.is_err());
}

#[tokio::test]
async fn test_missing_and_private_errors_are_identical() {
    let (owner, user) = signed_in("ada@example.com").await;
    let owner_repo = repo(&owner);
    let private = owner_repo
        .create(&user.id, new_prompt("Private notes"))
        .await
        .unwrap();

    let visitor = repo(&anonymous_session(&owner));
    let private_err = visitor.get_public(&private.id).await.unwrap_err();
    let missing_err = visitor.get_public("no-such-id").await.unwrap_err();
    assert_eq!(private_err.user_message(), missing_err.user_message());
    assert_eq!(
        private_err.user_message(),
        "This prompt is private or doesn't exist."
    );
}

#[tokio::test]
async fn test_share_scenario_exposes_only_public_fields() {
    let (owner, user) = signed_in("ada@example.com").await;
    let owner_repo = repo(&owner);
    let created = owner_repo
        .create(&user.id, new_prompt("Summarize Articles"))
        .await
        .unwrap();
    let shared = owner_repo.set_visibility(&created.id, true).await.unwrap();

    let url = PromptRepository::share_url(ORIGIN, &shared.id);
    assert_eq!(url, format!("{}/public/{}", ORIGIN, shared.id));

    let visitor = repo(&anonymous_session(&owner));
    let public = visitor.get_public(&shared.id).await.unwrap();
    let json = serde_json::to_value(&public).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("user_id"));
    assert!(!object.contains_key("category"));
    assert!(!object.contains_key("response_text"));

    let view = PublicPromptView::load(&visitor, &shared.id).await;
    assert_eq!(
        view.page_title(),
        "Summarize Articles | Public Prompt | Promptory"
    );

    let view = PublicPromptView::load(&visitor, "no-such-id").await;
    assert!(!view.is_loaded());
    assert_eq!(view.page_title(), "Public Prompt | Promptory");
}

// ============================================================================
// Ownership
// ============================================================================

#[tokio::test]
async fn test_non_owner_cannot_edit_or_delete() {
    let (owner, user) = signed_in("ada@example.com").await;
    let owner_repo = repo(&owner);
    let created = owner_repo
        .create(&user.id, new_prompt("Summarize Articles"))
        .await
        .unwrap();

    let (intruder, _) = second_session(&owner, "mallory@example.com").await;
    let intruder_repo = repo(&intruder);

    assert!(intruder_repo.get_owned(&created.id).await.is_err());
    assert!(intruder_repo
        .update(
            &created.id,
            PromptPatch {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .is_err());
    assert!(intruder_repo.set_visibility(&created.id, true).await.is_err());
    assert!(intruder_repo.delete(&created.id).await.is_err());
    assert!(intruder_repo.list(&user.id).await.unwrap().is_empty());

    let unchanged = owner_repo.get_owned(&created.id).await.unwrap();
    assert_eq!(unchanged.title, "Summarize Articles");
    assert!(!unchanged.is_public);
}

#[tokio::test]
async fn test_double_toggle_restores_visibility() {
    let (owner, user) = signed_in("ada@example.com").await;
    let owner_repo = repo(&owner);
    let created = owner_repo
        .create(&user.id, new_prompt("Summarize Articles"))
        .await
        .unwrap();

    let once = owner_repo
        .set_visibility(&created.id, !created.is_public)
        .await
        .unwrap();
    let twice = owner_repo
        .set_visibility(&created.id, !once.is_public)
        .await
        .unwrap();
    assert_eq!(twice.is_public, created.is_public);
    assert_eq!(twice.title, created.title);
    assert_eq!(twice.category, created.category);
}
