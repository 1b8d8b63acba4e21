// ABOUTME: Common data models for users, health profiles, activities, and integrations
// ABOUTME: Entity structs plus the upsert-input structs accepted by the stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder written into token fields on every listing/status response.
/// Plaintext tokens leave the store only on the internal sync path.
pub const TOKEN_PLACEHOLDER: &str = "[REDACTED]";

/// Authenticated user identity, upserted on every successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identity-provider subject, primary key
    pub id: String,
    /// Globally unique when present
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User fields supplied by the sign-in callback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Per-user health goals and physical attributes (one row per user)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    pub id: String,
    pub user_id: String,
    pub age: Option<i32>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub daily_steps_goal: i32,
    pub daily_calories_goal: Option<i32>,
    pub weekly_workouts_goal: i32,
    /// Additional health preferences as JSON
    pub preferences: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Health profile patch; `None` fields are retained on update and defaulted
/// on insert (10000 daily steps, 3 weekly workouts)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfileData {
    pub user_id: String,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    pub daily_steps_goal: Option<i32>,
    pub daily_calories_goal: Option<i32>,
    pub weekly_workouts_goal: Option<i32>,
    pub preferences: Option<Value>,
}

/// Daily health metrics, one row per user per calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub id: String,
    pub user_id: String,
    /// Normalized to midnight UTC; (`user_id`, `date`) is unique
    pub date: DateTime<Utc>,
    pub steps: i32,
    pub calories_burned: i32,
    /// Distance in kilometers
    pub distance_km: f64,
    pub active_minutes: i32,
    pub heart_rate_avg: Option<i32>,
    pub heart_rate_max: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub water_intake_liters: f64,
    /// Daily weight tracking in kilograms
    pub weight: Option<f64>,
    pub notes: Option<String>,
    /// "manual" or the source service name ("`google_fit`", ...)
    pub data_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daily activity patch; `None` fields are retained when a row for the day
/// already exists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivityData {
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub steps: Option<i32>,
    pub calories_burned: Option<i32>,
    pub distance_km: Option<f64>,
    pub active_minutes: Option<i32>,
    pub heart_rate_avg: Option<i32>,
    pub heart_rate_max: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub water_intake_liters: Option<f64>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
    pub data_source: Option<String>,
}

impl DailyActivityData {
    /// Minimal patch for a user and day, all metrics unset
    #[must_use]
    pub fn new(user_id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            date,
            steps: None,
            calories_burned: None,
            distance_km: None,
            active_minutes: None,
            heart_rate_avg: None,
            heart_rate_max: None,
            sleep_hours: None,
            water_intake_liters: None,
            weight: None,
            notes: None,
            data_source: None,
        }
    }
}

/// Connected third-party health service credentials, one row per user per
/// service. Token fields are ciphertext at rest and plaintext in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIntegration {
    pub id: String,
    pub user_id: String,
    /// Lower-cased service identifier ("`google_fit`", "fitbit", ...)
    pub service_name: String,
    pub is_active: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Service-specific settings blob
    pub settings: Option<Value>,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HealthIntegration {
    /// Copy with present token fields replaced by [`TOKEN_PLACEHOLDER`].
    ///
    /// Every multi-record listing or status endpoint must go through this;
    /// only the internal sync path reads plaintext tokens.
    #[must_use]
    pub fn redacted(mut self) -> Self {
        if self.access_token.is_some() {
            self.access_token = Some(TOKEN_PLACEHOLDER.to_owned());
        }
        if self.refresh_token.is_some() {
            self.refresh_token = Some(TOKEN_PLACEHOLDER.to_owned());
        }
        self
    }
}

/// Integration fields supplied by an OAuth callback or settings update.
/// Unlike the patch types this is a full overwrite: `None` tokens are
/// stored as NULL, not retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIntegrationData {
    pub user_id: String,
    pub service_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub settings: Option<Value>,
}

const fn default_true() -> bool {
    true
}

/// Discrete workout/activity session (append-only log)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSession {
    pub id: String,
    pub user_id: String,
    /// "workout", "walk", "run", "cycle", "swim", ...
    pub session_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub distance_km: Option<f64>,
    pub avg_heart_rate: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub steps: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub data_source: String,
    /// Additional session-specific data
    pub session_data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session fields accepted on save (always inserts a new row)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSessionData {
    pub user_id: String,
    pub session_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub distance_km: Option<f64>,
    pub avg_heart_rate: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub steps: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_data_source")]
    pub data_source: String,
    pub session_data: Option<Value>,
}

fn default_data_source() -> String {
    "manual".to_owned()
}

/// Per-user activity-type interest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPreference {
    pub id: String,
    pub user_id: String,
    /// "Walking", "Running", "Cycling", ...
    pub activity_type: String,
    pub is_selected: bool,
    /// Preferred time of day, e.g. "10:00"
    pub preferred_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Preference fields accepted on save; the full set is replaced each time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPreferenceData {
    pub activity_type: String,
    #[serde(default = "default_true")]
    pub is_selected: bool,
    pub preferred_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}
