// ABOUTME: Activity preference route handlers
// ABOUTME: The caller's preference set is replaced wholesale on every PUT
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::ActivityPreferenceData;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Activity preference routes
pub struct PreferenceRoutes;

impl PreferenceRoutes {
    /// Create all activity preference routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/preferences",
                get(Self::handle_get).put(Self::handle_put),
            )
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let preferences = resources
            .database
            .get_activity_preferences(&user_id)
            .await?;
        Ok((StatusCode::OK, Json(preferences)).into_response())
    }

    /// Replace the caller's full preference set; an empty payload clears it
    async fn handle_put(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<Vec<ActivityPreferenceData>>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let preferences = resources
            .database
            .save_activity_preferences(&user_id, &payload)
            .await?;
        Ok((StatusCode::OK, Json(preferences)).into_response())
    }
}
