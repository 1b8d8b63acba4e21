// ABOUTME: Activity preference database operations
// ABOUTME: Full replace-set semantics: delete then bulk insert in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityPreference, ActivityPreferenceData};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Replace a user's full preference set
    ///
    /// Not a merge: all existing rows for the user are deleted and the
    /// supplied set is inserted, inside one transaction so a partial failure
    /// cannot leave the user with an empty set. An empty `preferences` slice
    /// clears the set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails
    pub async fn save_activity_preferences(
        &self,
        user_id: &str,
        preferences: &[ActivityPreferenceData],
    ) -> AppResult<Vec<ActivityPreference>> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM activity_preferences WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear preferences: {e}")))?;

        for preference in preferences {
            sqlx::query(
                r"
                INSERT INTO activity_preferences (
                    id, user_id, activity_type, is_selected, preferred_time,
                    description, location, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
                ",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(&preference.activity_type)
            .bind(preference.is_selected)
            .bind(&preference.preferred_time)
            .bind(&preference.description)
            .bind(&preference.location)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert preference: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit preferences: {e}")))?;

        self.get_activity_preferences(user_id).await
    }

    /// Get a user's preference set
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_activity_preferences(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<ActivityPreference>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, activity_type, is_selected, preferred_time,
                   description, location, created_at, updated_at
            FROM activity_preferences
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get preferences: {e}")))?;

        Ok(rows.iter().map(row_to_preference).collect())
    }
}

fn row_to_preference(row: &SqliteRow) -> ActivityPreference {
    ActivityPreference {
        id: row.get("id"),
        user_id: row.get("user_id"),
        activity_type: row.get("activity_type"),
        is_selected: row.get("is_selected"),
        preferred_time: row.get("preferred_time"),
        description: row.get("description"),
        location: row.get("location"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}
