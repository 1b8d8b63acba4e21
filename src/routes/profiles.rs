// ABOUTME: Health profile route handlers
// ABOUTME: Fetch and patch the per-user goals and physical attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::HealthProfileData;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Health profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all health profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/health/profile",
                get(Self::handle_get_profile).put(Self::handle_put_profile),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let profile = resources
            .database
            .get_health_profile(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Health profile not found"))?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Upsert the caller's profile; omitted fields are retained
    async fn handle_put_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut payload): Json<HealthProfileData>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        payload.user_id = user_id;
        let profile = resources.database.upsert_health_profile(&payload).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
