// ABOUTME: Health integration database operations for third-party service credentials
// ABOUTME: Tokens are encrypted before the upsert and decrypted on every read
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{HealthIntegration, HealthIntegrationData};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create or update a service integration, keyed on
    /// (`user_id`, `service_name`)
    ///
    /// `service_name` is lower-cased for consistency. Present tokens are
    /// encrypted before the write; the returned row carries them decrypted
    /// for immediate caller use; redaction before external exposure is the
    /// route layer's job. Unlike the patch-style upserts this is a full
    /// overwrite: a `None` token clears the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption or the database operation fails
    pub async fn save_health_integration(
        &self,
        integration: &HealthIntegrationData,
    ) -> AppResult<HealthIntegration> {
        let id = Uuid::new_v4().to_string();
        let service_name = integration.service_name.to_lowercase();
        let now = Utc::now();

        let encrypted_access = integration
            .access_token
            .as_deref()
            .map(|t| self.encrypt_token(t))
            .transpose()?;
        let encrypted_refresh = integration
            .refresh_token
            .as_deref()
            .map(|t| self.encrypt_token(t))
            .transpose()?;
        let settings_json = integration
            .settings
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO health_integrations (
                id, user_id, service_name, is_active, access_token,
                refresh_token, token_expires_at, settings, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ON CONFLICT (user_id, service_name) DO UPDATE SET
                is_active = excluded.is_active,
                access_token = excluded.access_token,
                refresh_token = excluded.refresh_token,
                token_expires_at = excluded.token_expires_at,
                settings = excluded.settings,
                updated_at = excluded.updated_at
            ",
        )
        .bind(&id)
        .bind(&integration.user_id)
        .bind(&service_name)
        .bind(integration.is_active)
        .bind(&encrypted_access)
        .bind(&encrypted_refresh)
        .bind(integration.token_expires_at)
        .bind(&settings_json)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save health integration: {e}")))?;

        self.get_health_integration(&integration.user_id, &service_name)
            .await?
            .ok_or_else(|| AppError::internal("Health integration missing after upsert"))
    }

    /// Get a user's integration for a service, tokens decrypted
    ///
    /// Returns `Ok(None)` when no row matches; never raises for absence.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_integration(
        &self,
        user_id: &str,
        service_name: &str,
    ) -> AppResult<Option<HealthIntegration>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, service_name, is_active, access_token,
                   refresh_token, token_expires_at, settings, last_sync_at,
                   created_at, updated_at
            FROM health_integrations
            WHERE user_id = $1 AND service_name = $2
            ",
        )
        .bind(user_id)
        .bind(service_name.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get health integration: {e}")))?;

        row.map(|r| self.row_to_integration(&r)).transpose()
    }

    /// Get all of a user's integrations, ascending by service name, tokens
    /// decrypted
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_health_integrations(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<HealthIntegration>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, service_name, is_active, access_token,
                   refresh_token, token_expires_at, settings, last_sync_at,
                   created_at, updated_at
            FROM health_integrations
            WHERE user_id = $1
            ORDER BY service_name ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list health integrations: {e}")))?;

        rows.iter().map(|r| self.row_to_integration(r)).collect()
    }

    /// Stamp `last_sync_at` and `updated_at` for an integration
    ///
    /// Returns whether a row was affected; `false` means the integration
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_health_integration_sync(
        &self,
        user_id: &str,
        service_name: &str,
    ) -> AppResult<bool> {
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE health_integrations
            SET last_sync_at = $3, updated_at = $3
            WHERE user_id = $1 AND service_name = $2
            ",
        )
        .bind(user_id)
        .bind(service_name.to_lowercase())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update integration sync: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user's integration for a service
    ///
    /// Returns whether a row was affected.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete_health_integration(
        &self,
        user_id: &str,
        service_name: &str,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM health_integrations WHERE user_id = $1 AND service_name = $2",
        )
        .bind(user_id)
        .bind(service_name.to_lowercase())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete health integration: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    fn row_to_integration(&self, row: &SqliteRow) -> AppResult<HealthIntegration> {
        let settings_json: Option<String> = row.get("settings");
        let settings = settings_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(HealthIntegration {
            id: row.get("id"),
            user_id: row.get("user_id"),
            service_name: row.get("service_name"),
            is_active: row.get("is_active"),
            access_token: self.decrypt_optional(row.get("access_token")),
            refresh_token: self.decrypt_optional(row.get("refresh_token")),
            token_expires_at: row.get::<Option<DateTime<Utc>>, _>("token_expires_at"),
            settings,
            last_sync_at: row.get::<Option<DateTime<Utc>>, _>("last_sync_at"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
        })
    }
}
