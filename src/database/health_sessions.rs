// ABOUTME: Health session database operations (append-only workout log)
// ABOUTME: Ownership-scoped reads and deletes keyed by (session_id, user_id)
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{HealthSession, HealthSessionData};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Default number of rows returned by the recency read
pub const DEFAULT_SESSION_LIMIT: i64 = 50;

impl Database {
    /// Record a new session; always inserts
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn save_health_session(
        &self,
        session: &HealthSessionData,
    ) -> AppResult<HealthSession> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let session_data_json = session
            .session_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO health_sessions (
                id, user_id, session_type, start_time, end_time,
                duration_minutes, calories_burned, distance_km, avg_heart_rate,
                max_heart_rate, steps, location, notes, data_source,
                session_data, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)
            ",
        )
        .bind(&id)
        .bind(&session.user_id)
        .bind(&session.session_type)
        .bind(session.start_time)
        .bind(session.end_time)
        .bind(session.duration_minutes)
        .bind(session.calories_burned)
        .bind(session.distance_km)
        .bind(session.avg_heart_rate)
        .bind(session.max_heart_rate)
        .bind(session.steps)
        .bind(&session.location)
        .bind(&session.notes)
        .bind(&session.data_source)
        .bind(&session_data_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save health session: {e}")))?;

        self.get_health_session(&id, &session.user_id)
            .await?
            .ok_or_else(|| AppError::internal("Health session missing after insert"))
    }

    /// Get the most recent sessions, descending by start time
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_sessions(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> AppResult<Vec<HealthSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, session_type, start_time, end_time,
                   duration_minutes, calories_burned, distance_km,
                   avg_heart_rate, max_heart_rate, steps, location, notes,
                   data_source, session_data, created_at, updated_at
            FROM health_sessions
            WHERE user_id = $1
            ORDER BY start_time DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit.unwrap_or(DEFAULT_SESSION_LIMIT))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get health sessions: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }

    /// Get sessions whose start time falls in an inclusive range,
    /// descending by start time
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_sessions_range(
        &self,
        user_id: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> AppResult<Vec<HealthSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, session_type, start_time, end_time,
                   duration_minutes, calories_burned, distance_km,
                   avg_heart_rate, max_heart_rate, steps, location, notes,
                   data_source, session_data, created_at, updated_at
            FROM health_sessions
            WHERE user_id = $1 AND start_time >= $2 AND start_time <= $3
            ORDER BY start_time DESC
            ",
        )
        .bind(user_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get session range: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }

    /// Get a single session, scoped to its owner
    ///
    /// A session belonging to a different user is reported as absent, not as
    /// a permission error, so callers cannot probe for other users' records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_session(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> AppResult<Option<HealthSession>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, session_type, start_time, end_time,
                   duration_minutes, calories_burned, distance_km,
                   avg_heart_rate, max_heart_rate, steps, location, notes,
                   data_source, session_data, created_at, updated_at
            FROM health_sessions
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get health session: {e}")))?;

        row.as_ref().map(row_to_session).transpose()
    }

    /// Delete a session, scoped to its owner
    ///
    /// Returns whether a row was affected; a wrong-owner delete is `false`
    /// and leaves the row intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_health_session(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM health_sessions WHERE id = $1 AND user_id = $2")
            .bind(session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health session: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<HealthSession> {
    let session_data_json: Option<String> = row.get("session_data");
    let session_data = session_data_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(HealthSession {
        id: row.get("id"),
        user_id: row.get("user_id"),
        session_type: row.get("session_type"),
        start_time: row.get::<DateTime<Utc>, _>("start_time"),
        end_time: row.get::<Option<DateTime<Utc>>, _>("end_time"),
        duration_minutes: row.get("duration_minutes"),
        calories_burned: row.get("calories_burned"),
        distance_km: row.get("distance_km"),
        avg_heart_rate: row.get("avg_heart_rate"),
        max_heart_rate: row.get("max_heart_rate"),
        steps: row.get("steps"),
        location: row.get("location"),
        notes: row.get("notes"),
        data_source: row.get("data_source"),
        session_data,
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}
