//! Session Store
//!
//! Process-wide view of who is signed in. The current user lives in a
//! `watch` channel; a single background task owns the sender and replaces
//! the snapshot on every auth event. Everything else only reads.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::backend::{AuthApi, AuthEvent};
use crate::models::user::{SignUpOptions, User};
use crate::storage::{LocalStore, LAST_LOGIN_EMAIL_KEY};
use crate::utils::error::AppResult;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    /// True until the first identity check completes
    pub loading: bool,
}

impl SessionSnapshot {
    fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    fn loaded(user: Option<User>) -> Self {
        Self {
            user,
            loading: false,
        }
    }
}

/// Shared session context
pub struct SessionStore {
    auth: Arc<dyn AuthApi>,
    local: Arc<LocalStore>,
    state: watch::Receiver<SessionSnapshot>,
    listener: JoinHandle<()>,
}

impl SessionStore {
    /// Start the store. Must be called inside a Tokio runtime.
    ///
    /// The identity check and the event subscription both run on the
    /// spawned listener task; the snapshot reports `loading` until the check
    /// finishes. A failed check is treated as signed out.
    pub fn start(auth: Arc<dyn AuthApi>, local: Arc<LocalStore>) -> Self {
        let (tx, state) = watch::channel(SessionSnapshot::loading());
        // Subscribe before the identity check so no event is missed
        let events = auth.subscribe();
        let listener = tokio::spawn(run_listener(auth.clone(), events, tx));

        Self {
            auth,
            local,
            state,
            listener,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// A receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    /// Wait until the snapshot satisfies `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        let mut rx = self.state.clone();
        let settled = rx.wait_for(|s| predicate(s)).await.map(|s| s.clone());
        // Listener gone; report the last value
        settled.unwrap_or_else(|_| rx.borrow().clone())
    }

    /// Wait for the first identity check
    pub async fn wait_until_loaded(&self) -> SessionSnapshot {
        self.wait_for(|s| !s.loading).await
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> AppResult<User> {
        self.auth.sign_up(email, password, options).await
    }

    /// Sign in and remember the email for the next login form
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.auth.sign_in_with_password(email, password).await?;
        if let Err(e) = self.local.set(LAST_LOGIN_EMAIL_KEY, email.trim()) {
            tracing::warn!(error = %e, "failed to remember login email");
        }
        Ok(user)
    }

    pub async fn sign_out(&self) -> AppResult<()> {
        self.auth.sign_out().await
    }

    pub async fn reset_password(&self, email: &str) -> AppResult<()> {
        self.auth.reset_password_for_email(email).await
    }

    /// Email of the last successful sign-in on this device
    pub fn last_login_email(&self) -> Option<String> {
        self.local.get(LAST_LOGIN_EMAIL_KEY)
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

async fn check_identity(auth: &dyn AuthApi) -> Option<User> {
    match auth.get_user().await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "identity check failed; treating as signed out");
            None
        }
    }
}

async fn run_listener(
    auth: Arc<dyn AuthApi>,
    mut events: tokio::sync::broadcast::Receiver<AuthEvent>,
    tx: watch::Sender<SessionSnapshot>,
) {
    let initial = check_identity(auth.as_ref()).await;
    tx.send_replace(SessionSnapshot::loaded(initial));

    loop {
        match events.recv().await {
            Ok(event) => {
                tracing::debug!(event = event.name(), "session updated");
                tx.send_replace(SessionSnapshot::loaded(event.user().cloned()));
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "missed auth events; re-checking identity");
                let user = check_identity(auth.as_ref()).await;
                tx.send_replace(SessionSnapshot::loaded(user));
            }
            Err(RecvError::Closed) => break,
        }
    }
}
