// ABOUTME: User account database operations
// ABOUTME: Handles the sign-in upsert keyed on the identity-provider subject
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{UpsertUser, User};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create or update a user, keyed on `id`
    ///
    /// Called on every successful authentication: a returning user's claim
    /// fields overwrite the stored row and `updated_at` is stamped, while
    /// `created_at` is preserved from the first sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails (including an email
    /// uniqueness violation against a different user)
    pub async fn upsert_user(&self, user: &UpsertUser) -> AppResult<User> {
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (id) DO UPDATE SET
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                profile_image_url = excluded.profile_image_url,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_image_url)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert user: {e}")))?;

        self.get_user(&user.id)
            .await?
            .ok_or_else(|| AppError::internal("User missing after upsert"))
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, email, first_name, last_name, profile_image_url, created_at, updated_at
            FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        Ok(row.map(|r| row_to_user(&r)))
    }
}

fn row_to_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        profile_image_url: row.get("profile_image_url"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}
