// ABOUTME: Daily activity database operations
// ABOUTME: One row per user per calendar day, date-normalized upsert and range reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{end_of_day, start_of_day, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{DailyActivity, DailyActivityData};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Default number of rows returned by the recency read
pub const DEFAULT_RECENT_LIMIT: i64 = 30;

impl Database {
    /// Get the activity row for a user on the calendar day containing `date`
    ///
    /// At most one row exists per day by the (`user_id`, `date`) uniqueness
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_daily_activity(
        &self,
        user_id: &str,
        date: DateTime<Utc>,
    ) -> AppResult<Option<DailyActivity>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, date, steps, calories_burned, distance_km,
                   active_minutes, heart_rate_avg, heart_rate_max, sleep_hours,
                   water_intake_liters, weight, notes, data_source,
                   created_at, updated_at
            FROM daily_activities
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ",
        )
        .bind(user_id)
        .bind(start_of_day(date))
        .bind(end_of_day(date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get daily activity: {e}")))?;

        Ok(row.map(|r| row_to_activity(&r)))
    }

    /// Create or update the activity row for the calendar day of
    /// `activity.date`
    ///
    /// The date is normalized to midnight UTC before the uniqueness check,
    /// so multiple same-day writes merge into one row. Metric fields left
    /// `None` are retained from the existing row on update and defaulted to
    /// zero on insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn save_daily_activity(
        &self,
        activity: &DailyActivityData,
    ) -> AppResult<DailyActivity> {
        let id = Uuid::new_v4().to_string();
        let date = start_of_day(activity.date);
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO daily_activities (
                id, user_id, date, steps, calories_burned, distance_km,
                active_minutes, heart_rate_avg, heart_rate_max, sleep_hours,
                water_intake_liters, weight, notes, data_source,
                created_at, updated_at
            ) VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0),
                      COALESCE($7, 0), $8, $9, $10, COALESCE($11, 0), $12, $13, $14, $15, $15)
            ON CONFLICT (user_id, date) DO UPDATE SET
                steps = COALESCE($4, daily_activities.steps),
                calories_burned = COALESCE($5, daily_activities.calories_burned),
                distance_km = COALESCE($6, daily_activities.distance_km),
                active_minutes = COALESCE($7, daily_activities.active_minutes),
                heart_rate_avg = COALESCE($8, daily_activities.heart_rate_avg),
                heart_rate_max = COALESCE($9, daily_activities.heart_rate_max),
                sleep_hours = COALESCE($10, daily_activities.sleep_hours),
                water_intake_liters = COALESCE($11, daily_activities.water_intake_liters),
                weight = COALESCE($12, daily_activities.weight),
                notes = COALESCE($13, daily_activities.notes),
                data_source = COALESCE($14, daily_activities.data_source),
                updated_at = $15
            ",
        )
        .bind(&id)
        .bind(&activity.user_id)
        .bind(date)
        .bind(activity.steps)
        .bind(activity.calories_burned)
        .bind(activity.distance_km)
        .bind(activity.active_minutes)
        .bind(activity.heart_rate_avg)
        .bind(activity.heart_rate_max)
        .bind(activity.sleep_hours)
        .bind(activity.water_intake_liters)
        .bind(activity.weight)
        .bind(&activity.notes)
        .bind(&activity.data_source)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save daily activity: {e}")))?;

        self.get_daily_activity(&activity.user_id, date)
            .await?
            .ok_or_else(|| AppError::internal("Daily activity missing after upsert"))
    }

    /// Get activity rows in an inclusive date range, ascending by date
    ///
    /// Both bounds are widened to their full calendar day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_daily_activities_range(
        &self,
        user_id: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> AppResult<Vec<DailyActivity>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, steps, calories_burned, distance_km,
                   active_minutes, heart_rate_avg, heart_rate_max, sleep_hours,
                   water_intake_liters, weight, notes, data_source,
                   created_at, updated_at
            FROM daily_activities
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            ",
        )
        .bind(user_id)
        .bind(start_of_day(start_date))
        .bind(end_of_day(end_date))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get activity range: {e}")))?;

        Ok(rows.iter().map(row_to_activity).collect())
    }

    /// Get the most recent activity rows, descending by date
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recent_daily_activities(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> AppResult<Vec<DailyActivity>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, steps, calories_burned, distance_km,
                   active_minutes, heart_rate_avg, heart_rate_max, sleep_hours,
                   water_intake_liters, weight, notes, data_source,
                   created_at, updated_at
            FROM daily_activities
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recent activities: {e}")))?;

        Ok(rows.iter().map(row_to_activity).collect())
    }
}

fn row_to_activity(row: &SqliteRow) -> DailyActivity {
    DailyActivity {
        id: row.get("id"),
        user_id: row.get("user_id"),
        date: row.get::<DateTime<Utc>, _>("date"),
        steps: row.get("steps"),
        calories_burned: row.get("calories_burned"),
        distance_km: row.get("distance_km"),
        active_minutes: row.get("active_minutes"),
        heart_rate_avg: row.get("heart_rate_avg"),
        heart_rate_max: row.get("heart_rate_max"),
        sleep_hours: row.get("sleep_hours"),
        water_intake_liters: row.get("water_intake_liters"),
        weight: row.get("weight"),
        notes: row.get("notes"),
        data_source: row.get("data_source"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}
