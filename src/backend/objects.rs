//! Object storage for the local backend.
//!
//! Objects live in the `objects` table. Writes are allowed only under a path
//! whose first segment is the signed-in user's id.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use super::local::LocalBackend;
use super::{now_timestamp, StorageApi};
use crate::utils::error::{AppError, AppResult};

#[async_trait]
impl StorageApi for LocalBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> AppResult<()> {
        let acting = self.acting_user_id()?;
        let owned_prefix = format!("{}/", acting);
        if !path.starts_with(&owned_prefix) || path.len() == owned_prefix.len() {
            return Err(AppError::unauthorized(
                "new row violates row-level security policy for table \"objects\"",
            ));
        }

        let conn = self.db.get_connection()?;
        let sql = if upsert {
            "INSERT INTO objects (bucket, path, owner_id, content_type, data, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(bucket, path) DO UPDATE SET
                 content_type = excluded.content_type,
                 data = excluded.data,
                 created_at = excluded.created_at"
        } else {
            "INSERT INTO objects (bucket, path, owner_id, content_type, data, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        };
        conn.execute(
            sql,
            params![bucket, path, acting, content_type, bytes, now_timestamp()],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(f, _)
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::storage("The resource already exists")
            }
            other => AppError::from(other),
        })?;

        tracing::debug!(bucket, path, size = bytes.len(), "object uploaded");
        Ok(())
    }

    async fn download(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>> {
        let conn = self.db.get_connection()?;
        conn.query_row(
            "SELECT data FROM objects WHERE bucket = ?1 AND path = ?2",
            params![bucket, path],
            |row| row.get::<_, Vec<u8>>(0),
        )
        .optional()?
        .ok_or_else(|| AppError::storage("Object not found"))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage_base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }
}
