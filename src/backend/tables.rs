//! Table access (`prompts`, `profiles`) for the local backend.

use async_trait::async_trait;
use promptory_core::Category;
use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::local::LocalBackend;
use super::{now_timestamp, DataApi};
use crate::models::prompt::{Prompt, PromptInsert, PromptPatch, PublicPrompt};
use crate::models::user::{Profile, ProfileUpdate};
use crate::utils::error::{AppError, AppResult};

const PROMPT_COLUMNS: &str = "id, user_id, title, description, category, is_public,
     prompt_text, response_text, created_at, updated_at";

fn row_to_prompt(row: &rusqlite::Row) -> rusqlite::Result<Prompt> {
    Ok(Prompt {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category: Category::from(row.get::<_, Option<String>>(4)?),
        is_public: row.get::<_, i64>(5)? != 0,
        prompt_text: row.get(6)?,
        response_text: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        avatar_url: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn prompt_not_found() -> AppError {
    AppError::not_found("Prompt not found")
}

impl LocalBackend {
    fn fetch_owned_prompt(&self, id: &str, owner_id: &str) -> AppResult<Option<Prompt>> {
        let conn = self.db.get_connection()?;
        let prompt = conn
            .query_row(
                &format!(
                    "SELECT {} FROM prompts WHERE id = ?1 AND user_id = ?2",
                    PROMPT_COLUMNS
                ),
                params![id, owner_id],
                row_to_prompt,
            )
            .optional()?;
        Ok(prompt)
    }

    fn fetch_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        let conn = self.db.get_connection()?;
        let profile = conn
            .query_row(
                "SELECT id, full_name, email, avatar_url, updated_at FROM profiles WHERE id = ?1",
                params![user_id],
                row_to_profile,
            )
            .optional()?;
        Ok(profile)
    }
}

#[async_trait]
impl DataApi for LocalBackend {
    async fn list_prompts(&self, owner_id: &str) -> AppResult<Vec<Prompt>> {
        let acting = self.acting_user_id()?;
        if acting != owner_id {
            // Row-level policy hides other owners' rows
            return Ok(Vec::new());
        }

        let conn = self.db.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM prompts WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
            PROMPT_COLUMNS
        ))?;
        let rows = stmt.query_map(params![owner_id], row_to_prompt)?;

        let mut prompts = Vec::new();
        for row in rows {
            prompts.push(row?);
        }
        Ok(prompts)
    }

    async fn get_prompt(&self, id: &str) -> AppResult<Option<Prompt>> {
        let acting = self.acting_user_id()?;
        self.fetch_owned_prompt(id, &acting)
    }

    async fn get_public_prompt(&self, id: &str) -> AppResult<Option<PublicPrompt>> {
        let conn = self.db.get_connection()?;
        let prompt = conn
            .query_row(
                "SELECT id, title, description, prompt_text, is_public, created_at
                 FROM prompts WHERE id = ?1 AND is_public = 1",
                params![id],
                |row| {
                    Ok(PublicPrompt {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        prompt_text: row.get(3)?,
                        is_public: row.get::<_, i64>(4)? != 0,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(prompt)
    }

    async fn insert_prompt(&self, row: PromptInsert) -> AppResult<Prompt> {
        let acting = self.acting_user_id()?;
        if row.user_id != acting {
            return Err(AppError::unauthorized(
                "new row violates row-level security policy for table \"prompts\"",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let now = now_timestamp();
        {
            let conn = self.db.get_connection()?;
            conn.execute(
                "INSERT INTO prompts (id, user_id, title, description, category, is_public,
                                      prompt_text, response_text, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    id,
                    row.user_id,
                    row.title,
                    row.description,
                    row.category.as_str(),
                    row.is_public as i64,
                    row.prompt_text,
                    row.response_text,
                    now,
                ],
            )?;
        }

        self.fetch_owned_prompt(&id, &acting)?
            .ok_or_else(|| AppError::database("Failed to retrieve created prompt"))
    }

    async fn update_prompt(&self, id: &str, patch: PromptPatch) -> AppResult<Prompt> {
        let acting = self.acting_user_id()?;

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(title) = patch.title {
            assignments.push("title = ?");
            values.push(Box::new(title));
        }
        if let Some(description) = patch.description {
            assignments.push("description = ?");
            values.push(Box::new(description));
        }
        if let Some(category) = patch.category {
            assignments.push("category = ?");
            values.push(Box::new(category.as_str().map(str::to_string)));
        }
        if let Some(is_public) = patch.is_public {
            assignments.push("is_public = ?");
            values.push(Box::new(is_public as i64));
        }
        assignments.push("updated_at = ?");
        values.push(Box::new(now_timestamp()));
        values.push(Box::new(id.to_string()));
        values.push(Box::new(acting.clone()));

        let sql = format!(
            "UPDATE prompts SET {} WHERE id = ? AND user_id = ?",
            assignments.join(", ")
        );
        let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let changed = {
            let conn = self.db.get_connection()?;
            conn.execute(&sql, refs.as_slice())?
        };
        if changed == 0 {
            return Err(prompt_not_found());
        }

        self.fetch_owned_prompt(id, &acting)?
            .ok_or_else(prompt_not_found)
    }

    async fn delete_prompt(&self, id: &str) -> AppResult<()> {
        let acting = self.acting_user_id()?;
        let conn = self.db.get_connection()?;
        let changed = conn.execute(
            "DELETE FROM prompts WHERE id = ?1 AND user_id = ?2",
            params![id, acting],
        )?;
        if changed == 0 {
            return Err(prompt_not_found());
        }
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        let acting = self.acting_user_id()?;
        if acting != user_id {
            return Ok(None);
        }
        self.fetch_profile(user_id)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> AppResult<Profile> {
        let acting = self.acting_user_id()?;
        if acting != user_id {
            return Err(AppError::not_found("Profile not found"));
        }

        let changed = {
            let conn = self.db.get_connection()?;
            conn.execute(
                "UPDATE profiles SET
                     full_name = COALESCE(?1, full_name),
                     email = COALESCE(?2, email),
                     avatar_url = COALESCE(?3, avatar_url),
                     updated_at = ?4
                 WHERE id = ?5",
                params![
                    update.full_name,
                    update.email,
                    update.avatar_url,
                    now_timestamp(),
                    user_id
                ],
            )?
        };
        if changed == 0 {
            return Err(AppError::not_found("Profile not found"));
        }

        self.fetch_profile(user_id)?
            .ok_or_else(|| AppError::not_found("Profile not found"))
    }
}
