//! Dashboard Flow Tests
//!
//! Create, list, toggle, edit and delete through the view layer.

use promptory::backend::AuthApi;
use promptory::services::prompt::PromptRepository;
use promptory::views::{CategoryChoice, DashboardView, EditView, PromptForm};
use promptory_core::Category;

use super::common::{
    gateway, repo, second_session, signed_in, CountingData, MockLlmProvider, ORIGIN,
};

fn summarize_form() -> PromptForm {
    PromptForm {
        title: "Summarize Articles".to_string(),
        description: "Condense long reads into five bullet points".to_string(),
        category: CategoryChoice::Suggested("writing".to_string()),
    }
}

#[tokio::test]
async fn test_created_prompt_shows_on_dashboard() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));

    let mut form = summarize_form();
    form.submit_new(&repo, &gateway, &user.id).await.unwrap();

    let dashboard = DashboardView::load(&repo, &user.id).await;
    assert!(dashboard.notice.is_none());
    let cards = dashboard.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Summarize Articles");
    assert_eq!(cards[0].category_label, "Writing");
    assert!(!cards[0].is_public);
    assert_eq!(cards[0].visibility_action, "Make Public");

    let stats = dashboard.stat_cards();
    assert_eq!((stats.total, stats.categories, stats.public), (1, 1, 0));
}

#[tokio::test]
async fn test_toggle_patches_list_after_confirmation() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));
    let created = summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();

    let mut dashboard = DashboardView::load(&repo, &user.id).await;
    assert!(dashboard.share_url(ORIGIN, &created.id).is_none());

    let response = dashboard.toggle_visibility(&repo, &created.id).await;
    assert!(response.success);
    assert!(dashboard.prompts()[0].is_public);
    assert_eq!(dashboard.cards()[0].visibility_action, "Make Private");
    assert_eq!(
        dashboard.share_url(ORIGIN, &created.id),
        Some(format!("{}/public/{}", ORIGIN, created.id))
    );

    let response = dashboard.toggle_visibility(&repo, "missing").await;
    assert!(!response.success);
}

#[tokio::test]
async fn test_failed_toggle_leaves_list_unchanged() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));
    summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();

    let mut dashboard = DashboardView::load(&repo, &user.id).await;
    let id = dashboard.prompts()[0].id.clone();

    // The session ends before the toggle reaches the backend
    backend.sign_out().await.unwrap();

    let response = dashboard.toggle_visibility(&repo, &id).await;
    assert!(!response.success);
    assert!(response.error.is_some());
    assert!(!dashboard.prompts()[0].is_public);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));
    let created = summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();

    let mut dashboard = DashboardView::load(&repo, &user.id).await;

    // Cancelled request deletes nothing
    dashboard.request_delete(&created.id);
    assert!(dashboard.delete_dialog().is_open());
    dashboard.cancel_delete();
    assert!(!dashboard.confirm_delete(&repo).await.success);
    assert_eq!(dashboard.prompts().len(), 1);

    dashboard.request_delete(&created.id);
    let response = dashboard.confirm_delete(&repo).await;
    assert!(response.success);
    assert!(dashboard.prompts().is_empty());
    assert!(!dashboard.delete_dialog().is_open());

    dashboard.refresh(&repo, &user.id).await;
    assert!(dashboard.prompts().is_empty());
    assert!(repo.get_owned(&created.id).await.is_err());
}

#[tokio::test]
async fn test_dashboard_search_and_filter() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));

    summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();
    PromptForm {
        title: "Launch email".to_string(),
        description: "Announce the summer release".to_string(),
        category: CategoryChoice::Suggested("marketing".to_string()),
    }
    .submit_new(&repo, &gateway, &user.id)
    .await
    .unwrap();
    repo.save_playground(&user.id, "Write a haiku", "Autumn moonlight")
        .await
        .unwrap();

    let mut dashboard = DashboardView::load(&repo, &user.id).await;
    assert_eq!(dashboard.prompts().len(), 3);
    assert_eq!(
        dashboard.category_options(),
        vec![
            Category::named("marketing"),
            Category::named("writing"),
            Category::Unset
        ]
    );
    assert_eq!(dashboard.stat_cards().categories, 3);

    dashboard.search = "SUMMER".to_string();
    let titles: Vec<_> = dashboard.cards().into_iter().map(|c| c.title).collect();
    assert_eq!(titles, vec!["Launch email"]);

    dashboard.search.clear();
    dashboard.category_filter = Some(Category::Unset);
    let visible = dashboard.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].category, Category::Unset);
    assert_eq!(visible[0].prompt_text.as_deref(), Some("Write a haiku"));
}

#[tokio::test]
async fn test_edit_view_is_owner_only() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));
    let created = summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();

    let (intruder, _) = second_session(&backend, "mallory@example.com").await;
    assert!(EditView::load(&super::common::repo(&intruder), &created.id)
        .await
        .is_err());

    let mut edit = EditView::load(&repo, &created.id).await.unwrap();
    assert!(!edit.is_dirty());
    assert!(edit.share_url(ORIGIN).is_none());

    edit.form.title = "Summarize Papers".to_string();
    assert!(edit.is_dirty());
    assert!(edit.request_save().success);
    assert!(edit.save_dialog().is_open());
    let saved = edit.confirm_save(&repo, &gateway).await;
    assert!(saved.success);
    assert_eq!(edit.prompt().title, "Summarize Papers");
    assert!(!edit.is_dirty());

    assert!(edit.toggle_visibility(&repo).await.success);
    assert!(edit.prompt().is_public);
    assert!(edit.share_url(ORIGIN).is_some());
}

#[tokio::test]
async fn test_cancelled_edit_leaves_prompt_unchanged() {
    let (backend, user) = signed_in("ada@example.com").await;
    let repo = repo(&backend);
    let gateway = gateway(MockLlmProvider::replying(&[]));
    let created = summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();

    let mut edit = EditView::load(&repo, &created.id).await.unwrap();
    edit.form.title = "Summarize Papers".to_string();
    assert!(edit.request_save().success);
    edit.cancel_save();
    assert!(!edit.save_dialog().is_open());
    assert!(!edit.confirm_save(&repo, &gateway).await.success);

    // The form keeps its edits while the stored row is untouched
    assert!(edit.is_dirty());
    let stored = repo.get_owned(&created.id).await.unwrap();
    assert_eq!(stored.title, "Summarize Articles");
    assert_eq!(stored.updated_at, created.updated_at);
}

#[tokio::test]
async fn test_edit_without_category_is_rejected() {
    let (backend, user) = signed_in("ada@example.com").await;
    let data = CountingData::new(backend.clone());
    let repo = PromptRepository::new(data.clone());
    let gateway = gateway(MockLlmProvider::replying(&[]));
    let created = summarize_form()
        .submit_new(&repo, &gateway, &user.id)
        .await
        .unwrap();
    assert_eq!(data.writes(), 1);

    let mut edit = EditView::load(&repo, &created.id).await.unwrap();
    edit.form.category = CategoryChoice::None;
    let response = edit.request_save();
    assert_eq!(response.error.as_deref(), Some("All fields are required."));
    assert!(!edit.save_dialog().is_open());

    // Going straight to the form submit is blocked as well
    let err = edit
        .form
        .submit_edit(&repo, &gateway, &created.id)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(data.writes(), 1);
    assert_eq!(
        repo.get_owned(&created.id).await.unwrap().category,
        Category::named("writing")
    );
}
