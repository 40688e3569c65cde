//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2 connection pooling.
//! Backs the local implementation of the auth, data and storage APIs.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

fn manager_with_pragmas(manager: SqliteConnectionManager) -> SqliteConnectionManager {
    // Cascading deletes rely on foreign keys being enforced per connection
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database. The pool holds a single connection so every
    /// caller sees the same memory database; never hold a connection while
    /// calling another method that takes one.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = manager_with_pragmas(SqliteConnectionManager::memory());
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create a new database instance at the default path (~/.promptory/data.db)
    pub fn new() -> AppResult<Self> {
        Self::open(&database_path()?)
    }

    /// Open (or create) a database file with connection pooling
    pub fn open(db_path: &Path) -> AppResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = manager_with_pragmas(SqliteConnectionManager::file(db_path));
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        tracing::debug!(path = %db_path.display(), "database opened");

        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        // Auth identities
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                password_salt TEXT NOT NULL,
                full_name TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // One profile per user, created at sign-up
        conn.execute(
            "CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                full_name TEXT,
                email TEXT NOT NULL,
                avatar_url TEXT,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (id) REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Prompts; category NULL means unset
        conn.execute(
            "CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                category TEXT,
                is_public INTEGER NOT NULL DEFAULT 0,
                prompt_text TEXT,
                response_text TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_prompts_user_created
             ON prompts(user_id, created_at DESC)",
            [],
        )?;

        // Object storage (avatars)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS objects (
                bucket TEXT NOT NULL,
                path TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                content_type TEXT NOT NULL,
                data BLOB NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (bucket, path),
                FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Outgoing auth mail (password resets); delivery is out of process
        conn.execute(
            "CREATE TABLE IF NOT EXISTS auth_outbox (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Get the connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("pool_size", &self.pool.state().connections)
            .finish()
    }
}
