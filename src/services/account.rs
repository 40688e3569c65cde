//! Account Service
//!
//! Profile editing, avatar upload, password reset and account deletion.

use std::sync::Arc;

use crate::backend::{AuthApi, DataApi, StorageApi, AVATAR_BUCKET};
use crate::models::user::{is_valid_email, Profile, ProfileUpdate, User};
use crate::utils::error::{AppError, AppResult};

/// Outcome of a profile save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSaved {
    pub profile: Profile,
    /// The auth email was changed too; confirmation is pending
    pub email_changed: bool,
}

pub struct AccountService {
    auth: Arc<dyn AuthApi>,
    data: Arc<dyn DataApi>,
    storage: Arc<dyn StorageApi>,
}

impl AccountService {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        data: Arc<dyn DataApi>,
        storage: Arc<dyn StorageApi>,
    ) -> Self {
        Self {
            auth,
            data,
            storage,
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<Profile> {
        self.data
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }

    /// Save name and email.
    ///
    /// The profile row is written first, then the auth identity when the
    /// email changed. There is no transaction: if the second write fails the
    /// profile keeps the new email and the error says so.
    pub async fn save_profile(
        &self,
        user: &User,
        full_name: &str,
        email: &str,
    ) -> AppResult<ProfileSaved> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AppError::validation("Invalid email format"));
        }
        let full_name = full_name.trim();

        let profile = self
            .data
            .update_profile(
                &user.id,
                ProfileUpdate {
                    full_name: Some(full_name.to_string()),
                    email: Some(email.to_string()),
                    avatar_url: None,
                },
            )
            .await?;

        let email_changed = !email.eq_ignore_ascii_case(&user.email);
        if email_changed {
            if let Err(e) = self.auth.update_email(email).await {
                tracing::warn!(error = %e, user_id = %user.id, "profile saved but auth email update failed");
                return Err(AppError::auth(format!(
                    "Profile saved, but updating the sign-in email failed: {}",
                    e.user_message()
                )));
            }
        }

        Ok(ProfileSaved {
            profile,
            email_changed,
        })
    }

    /// Upload a new avatar and point the profile at it. Returns the public URL.
    pub async fn upload_avatar(
        &self,
        user_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> AppResult<String> {
        if !content_type.starts_with("image/") {
            return Err(AppError::validation("Avatar must be an image"));
        }
        if bytes.is_empty() {
            return Err(AppError::validation("Avatar file is empty"));
        }

        let ext = avatar_extension(file_name);
        let path = format!("{}/avatar.{}", user_id, ext);
        self.storage
            .upload(AVATAR_BUCKET, &path, bytes, content_type, true)
            .await?;

        let url = self.storage.public_url(AVATAR_BUCKET, &path);
        self.data
            .update_profile(
                user_id,
                ProfileUpdate {
                    avatar_url: Some(url.clone()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(url)
    }

    pub async fn send_password_reset(&self, email: &str) -> AppResult<()> {
        self.auth.reset_password_for_email(email).await
    }

    /// Delete the signed-in account; owned rows go with it
    pub async fn delete_account(&self) -> AppResult<()> {
        self.auth.delete_user().await
    }
}

fn avatar_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "png".to_string())
}
