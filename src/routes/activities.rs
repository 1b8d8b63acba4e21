// ABOUTME: Daily activity route handlers
// ABOUTME: Single-day fetch, same-day upsert, date-range and recent listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::models::DailyActivityData;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Daily activity routes
pub struct ActivityRoutes;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayParams {
    /// Any instant within the wanted day; defaults to now
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeParams {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RecentParams {
    limit: Option<i64>,
}

impl ActivityRoutes {
    /// Create all daily activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/health/activities",
                get(Self::handle_get_activity).post(Self::handle_save_activity),
            )
            .route("/api/health/activities/range", get(Self::handle_range))
            .route("/api/health/activities/recent", get(Self::handle_recent))
            .with_state(resources)
    }

    /// Fetch the caller's activity row for one calendar day
    async fn handle_get_activity(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<DayParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let date = params.date.unwrap_or_else(Utc::now);
        let activity = resources
            .database
            .get_daily_activity(&user_id, date)
            .await?
            .ok_or_else(|| AppError::not_found("No activity recorded for this day"))?;
        Ok((StatusCode::OK, Json(activity)).into_response())
    }

    /// Upsert the caller's activity for the payload's day; omitted metrics
    /// are retained on an existing row
    async fn handle_save_activity(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(mut payload): Json<DailyActivityData>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        payload.user_id = user_id;
        let activity = resources.database.save_daily_activity(&payload).await?;
        Ok((StatusCode::OK, Json(activity)).into_response())
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
        let activities = resources
            .database
            .get_daily_activities_range(&user_id, params.start_date, params.end_date)
            .await?;
        Ok((StatusCode::OK, Json(activities)).into_response())
    }

    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<RecentParams>,
    ) -> Result<Response, AppError> {
        let user_id = resources.auth.authenticate(&headers)?;
        let activities = resources
            .database
            .get_recent_daily_activities(&user_id, params.limit)
            .await?;
        Ok((StatusCode::OK, Json(activities)).into_response())
    }
}
