//! Backend Service Interfaces
//!
//! The auth, data and object storage APIs the application consumes, plus
//! [`LocalBackend`], an embedded SQLite implementation of all three.
//!
//! Row ownership is enforced here, not by callers: every mutation is scoped
//! to the signed-in user of the backend instance, and a row owned by someone
//! else is indistinguishable from a missing one.

mod local;
mod objects;
mod password;
mod tables;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::models::prompt::{Prompt, PromptInsert, PromptPatch, PublicPrompt};
use crate::models::user::{Profile, ProfileUpdate, SignUpOptions, User};
use crate::utils::error::AppResult;

pub use local::{LocalBackend, OutboxEntry};

/// Bucket holding profile pictures
pub const AVATAR_BUCKET: &str = "avatars";

/// Auth state change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(User),
    SignedOut,
    TokenRefreshed(User),
    UserUpdated(User),
    UserDeleted,
}

impl AuthEvent {
    /// The user after this event, `None` when signed out
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) | Self::TokenRefreshed(user) | Self::UserUpdated(user) => {
                Some(user)
            }
            Self::SignedOut | Self::UserDeleted => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn(_) => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed(_) => "TOKEN_REFRESHED",
            Self::UserUpdated(_) => "USER_UPDATED",
            Self::UserDeleted => "USER_DELETED",
        }
    }
}

/// Authentication service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Register and sign in a new identity
    async fn sign_up(&self, email: &str, password: &str, options: SignUpOptions)
        -> AppResult<User>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<User>;

    async fn sign_out(&self) -> AppResult<()>;

    /// The identity of the current session, if any
    async fn get_user(&self) -> AppResult<Option<User>>;

    /// Re-validate the current session against the identity store
    async fn refresh_session(&self) -> AppResult<Option<User>>;

    /// Queue a password reset email. Unknown addresses are accepted silently.
    async fn reset_password_for_email(&self, email: &str) -> AppResult<()>;

    /// Change the email of the signed-in identity
    async fn update_email(&self, email: &str) -> AppResult<User>;

    /// Delete the signed-in identity and everything it owns
    async fn delete_user(&self) -> AppResult<()>;

    /// Receive auth state changes
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Table access for `prompts` and `profiles`
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Prompts of `owner_id`, newest first
    async fn list_prompts(&self, owner_id: &str) -> AppResult<Vec<Prompt>>;

    /// A prompt owned by the signed-in user
    async fn get_prompt(&self, id: &str) -> AppResult<Option<Prompt>>;

    /// A public prompt, readable without a session
    async fn get_public_prompt(&self, id: &str) -> AppResult<Option<PublicPrompt>>;

    async fn insert_prompt(&self, row: PromptInsert) -> AppResult<Prompt>;

    /// Apply a patch and return the stored row
    async fn update_prompt(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt>;

    async fn delete_prompt(&self, id: &str) -> AppResult<()>;

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<Profile>;
}

/// Object storage
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Store an object; with `upsert` false an existing object is an error
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> AppResult<()>;

    async fn download(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>>;

    /// Public URL for an object; does not check existence
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Server timestamp, RFC 3339 UTC with microseconds
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
