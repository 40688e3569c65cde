//! Local Backend
//!
//! SQLite implementation of the backend APIs. Each instance models one client
//! session; instances created over the same [`Database`] share data but not
//! sessions.

use std::sync::RwLock;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::password::{hash_password, verify_password, MIN_PASSWORD_LEN};
use super::{now_timestamp, AuthApi, AuthEvent};
use crate::models::user::{is_valid_email, SignUpOptions, User};
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

const EVENT_CAPACITY: usize = 32;

/// A queued auth email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxEntry {
    pub email: String,
    pub kind: String,
    pub created_at: String,
}

/// Embedded backend over SQLite
pub struct LocalBackend {
    pub(super) db: Database,
    session: RwLock<Option<User>>,
    events: broadcast::Sender<AuthEvent>,
    pub(super) storage_base_url: String,
}

impl LocalBackend {
    /// Create a backend over an existing database
    pub fn new(db: Database, storage_base_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            db,
            session: RwLock::new(None),
            events,
            storage_base_url: storage_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Backend over a fresh in-memory database
    pub fn in_memory() -> AppResult<Self> {
        Ok(Self::new(
            Database::new_in_memory()?,
            "http://localhost:54321",
        ))
    }

    /// The shared database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Id of the signed-in user, or `Unauthorized`
    pub(super) fn acting_user_id(&self) -> AppResult<String> {
        self.session_user()
            .map(|u| u.id)
            .ok_or_else(|| AppError::unauthorized("Not signed in"))
    }

    fn session_user(&self) -> Option<User> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_session(&self, user: Option<User>) {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = user;
    }

    fn emit(&self, event: AuthEvent) {
        tracing::debug!(event = event.name(), "auth state change");
        // No receivers is fine
        let _ = self.events.send(event);
    }

    fn find_user(&self, id: &str) -> AppResult<Option<User>> {
        let conn = self.db.get_connection()?;
        let user = conn
            .query_row(
                "SELECT id, email, full_name, created_at FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Queued auth emails, oldest first
    pub fn outbox(&self) -> AppResult<Vec<OutboxEntry>> {
        let conn = self.db.get_connection()?;
        let mut stmt =
            conn.prepare("SELECT email, kind, created_at FROM auth_outbox ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(OutboxEntry {
                email: row.get(0)?,
                kind: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn check_email(email: &str) -> AppResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::auth("Unable to validate email address: invalid format"))
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl AuthApi for LocalBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        options: SignUpOptions,
    ) -> AppResult<User> {
        let email = email.trim();
        check_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::auth(format!(
                "Password should be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        let full_name = options
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name,
            created_at: now_timestamp(),
        };
        let (hash, salt) = hash_password(password);

        {
            let mut conn = self.db.get_connection()?;
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO users (id, email, password_hash, password_salt, full_name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![user.id, user.email, hash, salt, user.full_name, user.created_at],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::auth("User already registered")
                } else {
                    AppError::from(e)
                }
            })?;
            // Profile row mirrors the hosted service's sign-up trigger
            tx.execute(
                "INSERT INTO profiles (id, full_name, email, avatar_url, updated_at)
                 VALUES (?1, ?2, ?3, NULL, ?4)",
                params![user.id, user.full_name, user.email, user.created_at],
            )?;
            tx.commit()?;
        }

        tracing::info!(user_id = %user.id, "user signed up");
        self.set_session(Some(user.clone()));
        self.emit(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<User> {
        let record = {
            let conn = self.db.get_connection()?;
            conn.query_row(
                "SELECT id, email, full_name, created_at, password_hash, password_salt
                 FROM users WHERE email = ?1",
                params![email.trim()],
                |row| Ok((row_to_user(row)?, row.get::<_, String>(4)?, row.get::<_, String>(5)?)),
            )
            .optional()?
        };

        let invalid = || AppError::auth("Invalid login credentials");
        let (user, hash, salt) = record.ok_or_else(invalid)?;
        if !verify_password(password, &hash, &salt)? {
            return Err(invalid());
        }

        tracing::info!(user_id = %user.id, "user signed in");
        self.set_session(Some(user.clone()));
        self.emit(AuthEvent::SignedIn(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AppResult<()> {
        self.set_session(None);
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn get_user(&self) -> AppResult<Option<User>> {
        Ok(self.session_user())
    }

    async fn refresh_session(&self) -> AppResult<Option<User>> {
        let Some(current) = self.session_user() else {
            return Ok(None);
        };
        match self.find_user(&current.id)? {
            Some(user) => {
                self.set_session(Some(user.clone()));
                self.emit(AuthEvent::TokenRefreshed(user.clone()));
                Ok(Some(user))
            }
            None => {
                tracing::warn!(user_id = %current.id, "session user no longer exists");
                self.set_session(None);
                self.emit(AuthEvent::SignedOut);
                Ok(None)
            }
        }
    }

    async fn reset_password_for_email(&self, email: &str) -> AppResult<()> {
        let email = email.trim();
        check_email(email)?;
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO auth_outbox (email, kind, created_at) VALUES (?1, 'recovery', ?2)",
            params![email, now_timestamp()],
        )?;
        tracing::info!("password reset queued");
        Ok(())
    }

    async fn update_email(&self, email: &str) -> AppResult<User> {
        let user_id = self.acting_user_id()?;
        let email = email.trim();
        check_email(email)?;

        {
            let conn = self.db.get_connection()?;
            conn.execute(
                "UPDATE users SET email = ?1 WHERE id = ?2",
                params![email, user_id],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::auth("A user with this email address has already been registered")
                } else {
                    AppError::from(e)
                }
            })?;
        }

        let user = self
            .find_user(&user_id)?
            .ok_or_else(|| AppError::auth("User not found"))?;
        self.set_session(Some(user.clone()));
        self.emit(AuthEvent::UserUpdated(user.clone()));
        Ok(user)
    }

    async fn delete_user(&self) -> AppResult<()> {
        let user_id = self.acting_user_id()?;
        {
            let conn = self.db.get_connection()?;
            // Profile, prompts and objects go with it via ON DELETE CASCADE
            conn.execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
        }
        tracing::info!(user_id = %user_id, "user deleted");
        self.set_session(None);
        self.emit(AuthEvent::UserDeleted);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
