//! Session and App State Tests
//!
//! Auth forms, the session store, playground saving and account flows over
//! a fully wired `AppState`.

use std::time::Duration;

use promptory::services::session::{SessionSnapshot, SessionStore};
use promptory::storage::{ConfigService, Database, LocalStore};
use promptory::views::{
    AccountView, ForgotPasswordForm, LoginForm, PlaygroundView, Route, SignupForm,
};
use promptory::AppState;

use super::common::{gateway, MockLlmProvider};

async fn app(dir: &tempfile::TempDir) -> AppState {
    let state = AppState::new();
    let config = ConfigService::open(dir.path().join("config.json")).unwrap();
    state
        .initialize_with(
            config,
            Database::new_in_memory().unwrap(),
            LocalStore::open(dir.path().join("local_storage.json")).unwrap(),
        )
        .await
        .unwrap();
    state
}

async fn settled(session: &SessionStore, signed_in: bool) -> SessionSnapshot {
    tokio::time::timeout(
        Duration::from_secs(5),
        session.wait_for(|s| !s.loading && s.user.is_some() == signed_in),
    )
    .await
    .expect("session did not settle")
}

#[tokio::test]
async fn test_signup_login_round() {
    let dir = tempfile::tempdir().unwrap();
    let state = app(&dir).await;
    let services = state.services().await.unwrap();
    let session = &services.session;
    settled(session, false).await;

    let mut signup = SignupForm {
        full_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret123".to_string(),
    };
    let response = signup.submit(session).await;
    assert_eq!(response.data, Some(Route::Dashboard));
    settled(session, true).await;

    // A second signup with the same email points at the login page
    let mut again = SignupForm {
        full_name: String::new(),
        email: "ADA@example.com".to_string(),
        password: "secret123".to_string(),
    };
    let response = again.submit(session).await;
    assert_eq!(
        response.error.as_deref(),
        Some("An account with this email already exists. Try logging in.")
    );

    session.sign_out().await.unwrap();
    settled(session, false).await;

    let mut login = LoginForm::new(session);
    assert!(login.last_email().is_none());
    login.email = "ada@example.com".to_string();
    login.password = "wrong-password".to_string();
    assert_eq!(
        login.submit(session).await.error.as_deref(),
        Some("Invalid login credentials")
    );

    login.password = "secret123".to_string();
    assert_eq!(login.submit(session).await.data, Some(Route::Dashboard));
    let snapshot = settled(session, true).await;
    assert_eq!(snapshot.user.unwrap().full_name.as_deref(), Some("Ada"));

    // The next login form offers the remembered email
    let mut next = LoginForm::new(session);
    next.use_last_email();
    assert_eq!(next.email, "ada@example.com");
}

#[tokio::test]
async fn test_forgot_password() {
    let dir = tempfile::tempdir().unwrap();
    let state = app(&dir).await;
    let services = state.services().await.unwrap();

    let mut form = ForgotPasswordForm {
        email: "nobody".to_string(),
    };
    assert!(!form.submit(&services.session).await.success);

    form.email = "nobody@example.com".to_string();
    let response = form.submit(&services.session).await;
    assert_eq!(
        response.data.as_deref(),
        Some("Check your email to reset password!")
    );
    assert!(form.email.is_empty());
}

#[tokio::test]
async fn test_playground_save_requires_login() {
    let dir = tempfile::tempdir().unwrap();
    let state = app(&dir).await;
    let services = state.services().await.unwrap();
    let config = state.get_config().await.unwrap();

    let provider = MockLlmProvider::replying(&["Autumn moonlight, a quiet borrow checker"]);
    let gateway = gateway(provider.clone());
    let mut playground = PlaygroundView::new(config.playground_models.clone());
    assert_eq!(playground.model, config.default_playground_model());

    playground.set_prompt("Write a haiku about Rust");
    assert_eq!(playground.token_estimate(), 7);
    let run = playground.run(&gateway).await;
    assert!(run.success);
    assert_eq!(playground.runs(), 1);
    assert_eq!(
        playground.copy_text(),
        Some("Autumn moonlight, a quiet borrow checker")
    );

    let response = playground.save(&services.prompts, None).await;
    assert_eq!(
        response.error.as_deref(),
        Some("You must be logged in to save prompts.")
    );

    let user = services
        .session
        .sign_up("ada@example.com", "secret123", Default::default())
        .await
        .unwrap();
    let saved = playground.save(&services.prompts, Some(&user)).await;
    assert!(saved.success);
    let listed = services.prompts.list(&user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].response_text.as_deref(),
        Some("Autumn moonlight, a quiet borrow checker")
    );

    // A failed run is reported and does not count
    let failed = playground.run(&gateway).await;
    assert!(!failed.success);
    assert_eq!(playground.runs(), 1);
}

#[tokio::test]
async fn test_account_view_saves_profile() {
    let dir = tempfile::tempdir().unwrap();
    let state = app(&dir).await;
    let services = state.services().await.unwrap();
    let user = services
        .session
        .sign_up("ada@example.com", "secret123", Default::default())
        .await
        .unwrap();

    let mut account = AccountView::load(&services.account, user).await.unwrap();
    account.full_name = "Ada Lovelace".to_string();
    assert!(!account.email_changed());
    assert_eq!(
        account.save(&services.account).await.data.as_deref(),
        Some("Profile updated!")
    );

    account.email = "ada@lovelace.dev".to_string();
    assert!(account.email_changed());
    let response = account.save(&services.account).await;
    assert!(response.success);
    assert!(!account.email_changed());
    assert_eq!(account.profile().email, "ada@lovelace.dev");

    let upload = account
        .upload_avatar(&services.account, "me.png", vec![1, 2, 3], "image/png")
        .await;
    assert!(upload.success);
    assert!(account.avatar_url().is_some());

    account.request_delete();
    assert!(account.confirm_delete(&services.account).await.success);
    settled(&services.session, false).await;
}
