// ABOUTME: Health profile database operations
// ABOUTME: One profile per user, upserted on user_id with goal defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{HealthProfile, HealthProfileData};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Default daily steps goal applied when unset at profile creation
pub const DEFAULT_DAILY_STEPS_GOAL: i32 = 10000;
/// Default weekly workouts goal applied when unset at profile creation
pub const DEFAULT_WEEKLY_WORKOUTS_GOAL: i32 = 3;

impl Database {
    /// Get a user's health profile
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_profile(&self, user_id: &str) -> AppResult<Option<HealthProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, age, height, weight, gender, activity_level,
                   daily_steps_goal, daily_calories_goal, weekly_workouts_goal,
                   preferences, created_at, updated_at
            FROM health_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get health profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Create or update a user's health profile, keyed on `user_id`
    ///
    /// Patch semantics: fields left `None` are retained from the existing
    /// row on update, and defaulted on insert (`daily_steps_goal` 10000,
    /// `weekly_workouts_goal` 3).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn upsert_health_profile(
        &self,
        profile: &HealthProfileData,
    ) -> AppResult<HealthProfile> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let preferences_json = profile
            .preferences
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO health_profiles (
                id, user_id, age, height, weight, gender, activity_level,
                daily_steps_goal, daily_calories_goal, weekly_workouts_goal,
                preferences, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 10000), $9, COALESCE($10, 3), $11, $12, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                age = COALESCE($3, health_profiles.age),
                height = COALESCE($4, health_profiles.height),
                weight = COALESCE($5, health_profiles.weight),
                gender = COALESCE($6, health_profiles.gender),
                activity_level = COALESCE($7, health_profiles.activity_level),
                daily_steps_goal = COALESCE($8, health_profiles.daily_steps_goal),
                daily_calories_goal = COALESCE($9, health_profiles.daily_calories_goal),
                weekly_workouts_goal = COALESCE($10, health_profiles.weekly_workouts_goal),
                preferences = COALESCE($11, health_profiles.preferences),
                updated_at = $12
            ",
        )
        .bind(&id)
        .bind(&profile.user_id)
        .bind(profile.age)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(&profile.gender)
        .bind(&profile.activity_level)
        .bind(profile.daily_steps_goal)
        .bind(profile.daily_calories_goal)
        .bind(profile.weekly_workouts_goal)
        .bind(&preferences_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to upsert health profile: {e}")))?;

        self.get_health_profile(&profile.user_id)
            .await?
            .ok_or_else(|| AppError::internal("Health profile missing after upsert"))
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<HealthProfile> {
    let preferences_json: Option<String> = row.get("preferences");
    let preferences = preferences_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(HealthProfile {
        id: row.get("id"),
        user_id: row.get("user_id"),
        age: row.get("age"),
        height: row.get("height"),
        weight: row.get("weight"),
        gender: row.get("gender"),
        activity_level: row.get("activity_level"),
        daily_steps_goal: row.get("daily_steps_goal"),
        daily_calories_goal: row.get("daily_calories_goal"),
        weekly_workouts_goal: row.get("weekly_workouts_goal"),
        preferences,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}
