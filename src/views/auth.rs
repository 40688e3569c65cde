//! Login, signup and forgot-password forms.

use super::routes::Route;
use crate::models::response::CommandResponse;
use crate::models::user::{is_valid_email, SignUpOptions};
use crate::services::session::SessionStore;
use crate::utils::error::AppError;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Remembered email offered as "log in as"
    last_email: Option<String>,
}

impl LoginForm {
    pub fn new(session: &SessionStore) -> Self {
        Self {
            last_email: session.last_login_email(),
            ..Default::default()
        }
    }

    pub fn last_email(&self) -> Option<&str> {
        self.last_email.as_deref()
    }

    /// Fill the email field with the remembered one
    pub fn use_last_email(&mut self) {
        if let Some(email) = self.last_email.take() {
            self.email = email;
        }
    }

    /// Sign in; on success the client moves to the dashboard
    pub async fn submit(&mut self, session: &SessionStore) -> CommandResponse<Route> {
        if !is_valid_email(&self.email) || self.password.is_empty() {
            return CommandResponse::err("Please enter your email and password.");
        }
        match session.sign_in(self.email.trim(), &self.password).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "signed in");
                self.password.clear();
                CommandResponse::ok(Route::Dashboard)
            }
            Err(e) => {
                let message = e.user_message();
                if message.to_lowercase().contains("email not confirmed") {
                    return CommandResponse::err(format!(
                        "Please confirm your email to continue. We sent a confirmation link to {}.",
                        self.email.trim()
                    ));
                }
                CommandResponse::from_error("sign in failed", e)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, session: &SessionStore) -> CommandResponse<Route> {
        let options = SignUpOptions {
            full_name: Some(self.full_name.trim().to_string()).filter(|n| !n.is_empty()),
        };
        match session
            .sign_up(self.email.trim(), &self.password, options)
            .await
        {
            Ok(_) => {
                self.password.clear();
                CommandResponse::ok(Route::Dashboard)
            }
            Err(e) => CommandResponse::err(signup_error_message(&e)),
        }
    }
}

fn signup_error_message(error: &AppError) -> String {
    let message = error.user_message();
    if message.to_lowercase().contains("already registered") {
        "An account with this email already exists. Try logging in.".to_string()
    } else {
        message
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub async fn submit(&mut self, session: &SessionStore) -> CommandResponse<String> {
        if !is_valid_email(&self.email) {
            return CommandResponse::err("Invalid email format");
        }
        match session.reset_password(self.email.trim()).await {
            Ok(()) => {
                self.email.clear();
                CommandResponse::ok("Check your email to reset password!".to_string())
            }
            Err(e) => CommandResponse::from_error("password reset request failed", e),
        }
    }
}
