//! Account page: profile form, avatar, password reset and account deletion.

use promptory_core::char_len;

use super::confirm::ConfirmDialog;
use crate::models::user::{is_valid_email, Profile, User};
use crate::models::response::CommandResponse;
use crate::services::account::{AccountService, ProfileSaved};
use crate::utils::error::{AppError, AppResult};

/// Longest accepted full name, in characters
pub const FULL_NAME_LIMIT: usize = 60;

#[derive(Debug, Clone)]
pub struct AccountView {
    user: User,
    profile: Profile,
    pub full_name: String,
    pub email: String,
    delete_dialog: ConfirmDialog<String>,
}

impl AccountView {
    pub async fn load(service: &AccountService, user: User) -> AppResult<Self> {
        let profile = service.get_profile(&user.id).await?;
        Ok(Self::from_profile(user, profile))
    }

    fn from_profile(user: User, profile: Profile) -> Self {
        let email = if profile.email.is_empty() {
            user.email.clone()
        } else {
            profile.email.clone()
        };
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            email,
            user,
            profile,
            delete_dialog: ConfirmDialog::new(
                "Delete account",
                "Are you sure you want to delete your account? This cannot be undone.",
            ),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile.avatar_url.as_deref()
    }

    /// The form email differs from the sign-in email
    pub fn email_changed(&self) -> bool {
        !self.email.trim().eq_ignore_ascii_case(&self.user.email)
    }

    fn check(&self) -> AppResult<()> {
        if char_len(self.full_name.trim()) > FULL_NAME_LIMIT {
            return Err(AppError::validation(format!(
                "Full name must be at most {} characters",
                FULL_NAME_LIMIT
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::validation("Invalid email format"));
        }
        Ok(())
    }

    /// Save name and email. A changed email also updates the sign-in identity.
    pub async fn save(&mut self, service: &AccountService) -> CommandResponse<String> {
        if let Err(e) = self.check() {
            return CommandResponse::err(e.user_message());
        }
        match service
            .save_profile(&self.user, &self.full_name, &self.email)
            .await
        {
            Ok(ProfileSaved {
                profile,
                email_changed,
            }) => {
                if email_changed {
                    self.user.email = profile.email.clone();
                }
                self.profile = profile;
                let message = if email_changed {
                    "Profile and email updated! Please check your inbox to confirm new email."
                } else {
                    "Profile updated!"
                };
                CommandResponse::ok(message.to_string())
            }
            Err(e) => CommandResponse::from_error("profile save failed", e),
        }
    }

    pub async fn upload_avatar(
        &mut self,
        service: &AccountService,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> CommandResponse<String> {
        match service
            .upload_avatar(&self.user.id, file_name, bytes, content_type)
            .await
        {
            Ok(url) => {
                self.profile.avatar_url = Some(url.clone());
                CommandResponse::ok(url)
            }
            Err(e @ AppError::Validation(_)) => CommandResponse::err(e.user_message()),
            Err(e) => {
                tracing::warn!(error = %e, "avatar upload failed");
                CommandResponse::err("Avatar upload failed")
            }
        }
    }

    pub async fn request_password_reset(&self, service: &AccountService) -> CommandResponse<String> {
        match service.send_password_reset(&self.user.email).await {
            Ok(()) => CommandResponse::ok("Check your email to reset your password.".to_string()),
            Err(e) => CommandResponse::from_error("password reset failed", e),
        }
    }

    pub fn request_delete(&mut self) {
        self.delete_dialog.request(self.user.id.clone());
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog.cancel();
    }

    pub fn delete_dialog(&self) -> &ConfirmDialog<String> {
        &self.delete_dialog
    }

    /// Delete the account once confirmed. The session signs out on success.
    pub async fn confirm_delete(&mut self, service: &AccountService) -> CommandResponse<()> {
        if self.delete_dialog.confirm().is_none() {
            return CommandResponse::err("Nothing to delete");
        }
        match service.delete_account().await {
            Ok(()) => CommandResponse::ok(()),
            Err(e) => CommandResponse::from_error("account deletion failed", e),
        }
    }
}
