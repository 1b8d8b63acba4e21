// ABOUTME: Authentication route handlers for the signed-in user
// ABOUTME: Exposes the current user record and a lightweight auth status probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/user", get(Self::handle_get_user))
            .route("/api/auth/status", get(Self::handle_status))
            .with_state(resources)
    }

    /// Return the signed-in user's record
    async fn handle_get_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let user = resources
            .database
            .get_user(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Report whether the request carries a valid token
    ///
    /// Never fails; an unauthenticated request gets `{"authenticated": false}`.
    async fn handle_status(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        match resources.auth.authenticate(&headers) {
            Ok(user_id) => (
                StatusCode::OK,
                Json(json!({ "authenticated": true, "userId": user_id })),
            )
                .into_response(),
            Err(_) => (
                StatusCode::OK,
                Json(json!({ "authenticated": false })),
            )
                .into_response(),
        }
    }
}
