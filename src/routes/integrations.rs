// ABOUTME: Health integration and Google Fit route handlers
// ABOUTME: Every response that carries an integration goes out redacted
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::providers::google_fit::{self, SERVICE_NAME};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Integration routes
pub struct IntegrationRoutes;

impl IntegrationRoutes {
    /// Create all integration routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health/integrations", get(Self::handle_list))
            .route(
                "/api/integrations/google-fit/status",
                get(Self::handle_google_fit_status),
            )
            .route(
                "/api/integrations/google-fit/disconnect",
                delete(Self::handle_google_fit_disconnect),
            )
            .route(
                "/api/integrations/google-fit/sync",
                post(Self::handle_google_fit_sync),
            )
            .with_state(resources)
    }

    /// List the caller's integrations with token fields redacted
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let integrations: Vec<_> = resources
            .database
            .get_health_integrations(&user_id)
            .await?
            .into_iter()
            .map(crate::models::HealthIntegration::redacted)
            .collect();
        Ok((StatusCode::OK, Json(integrations)).into_response())
    }

    /// Report Google Fit connection state without exposing tokens
    async fn handle_google_fit_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let integration = resources
            .database
            .get_health_integration(&user_id, SERVICE_NAME)
            .await?;

        let body = match integration {
            Some(integration) => {
                let connected = integration.is_active && integration.access_token.is_some();
                json!({
                    "connected": connected,
                    "isActive": integration.is_active,
                    "lastSyncAt": integration.last_sync_at,
                    "tokenExpiresAt": integration.token_expires_at,
                })
            }
            None => json!({ "connected": false }),
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Remove the caller's Google Fit integration row entirely
    async fn handle_google_fit_disconnect(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let deleted = resources
            .database
            .delete_health_integration(&user_id, SERVICE_NAME)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Google Fit is not connected"));
        }
        Ok((StatusCode::OK, Json(json!({ "disconnected": true }))).into_response())
    }

    /// Trigger a sync attempt and report the outcome
    async fn handle_google_fit_sync(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let outcome = google_fit::sync_google_fit_data(&resources.database, &user_id).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "synced": outcome.is_synced(), "outcome": outcome })),
        )
            .into_response())
    }
}
