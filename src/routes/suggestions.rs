// ABOUTME: Profile-description suggestion route handler
// ABOUTME: Passes the caller's activity context to OpenAI, never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::external::openai_client::SuggestionRequest;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Suggestion routes
pub struct SuggestionRoutes;

impl SuggestionRoutes {
    /// Create all suggestion routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-suggestions", post(Self::handle_generate))
            .with_state(resources)
    }

    /// Generate suggestions from the caller's activity context; generation
    /// failures degrade to a static set rather than an error response
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<SuggestionRequest>,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate(&headers)?;
        let suggestions = resources
            .openai
            .generate_description_suggestions(&payload)
            .await;
        Ok((StatusCode::OK, Json(json!({ "suggestions": suggestions }))).into_response())
    }
}
