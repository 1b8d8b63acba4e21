// ABOUTME: Health session route handlers for the append-only session log
// ABOUTME: Listing, range queries, and ownership-scoped fetch and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::HealthSessionData;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Health session routes
pub struct SessionRoutes;

#[derive(Deserialize)]
struct ListParams {
    limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeParams {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl SessionRoutes {
    /// Create all health session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/health/sessions",
                get(Self::handle_list).post(Self::handle_save),
            )
            .route("/api/health/sessions/range", get(Self::handle_range))
            .route(
                "/api/health/sessions/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<ListParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let sessions = resources
            .database
            .get_health_sessions(&user_id, params.limit)
            .await?;
        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Record a new session; always inserts, never merges
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut payload): Json<HealthSessionData>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        payload.user_id = user_id;
        let session = resources.database.save_health_session(&payload).await?;
        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    async fn handle_range(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<RangeParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        if params.end_date < params.start_date {
            return Err(AppError::invalid_input("endDate precedes startDate"));
        }
        let sessions = resources
            .database
            .get_health_sessions_range(&user_id, params.start_date, params.end_date)
            .await?;
        Ok((StatusCode::OK, Json(sessions)).into_response())
    }

    /// Fetch one session; another user's session reads as not found
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(session_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let session = resources
            .database
            .get_health_session(&session_id, &user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Delete one session; another user's session reads as not found
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(session_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let deleted = resources
            .database
            .delete_health_session(&session_id, &user_id)
            .await?;
        if !deleted {
            return Err(AppError::not_found("Session not found"));
        }
        Ok((StatusCode::OK, Json(json!({ "deleted": true }))).into_response())
    }
}
