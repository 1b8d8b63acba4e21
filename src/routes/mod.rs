// ABOUTME: HTTP route assembly for the REST surface
// ABOUTME: Merges per-domain routers and attaches trace and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST route handlers
//!
//! Each submodule owns the routes for one domain and exposes a
//! `Routes::routes(resources)` constructor. [`router`] merges them into the
//! application router.

pub mod activities;
pub mod auth;
pub mod integrations;
pub mod preferences;
pub mod profiles;
pub mod sessions;
pub mod suggestions;

use crate::context::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(profiles::ProfileRoutes::routes(resources.clone()))
        .merge(activities::ActivityRoutes::routes(resources.clone()))
        .merge(sessions::SessionRoutes::routes(resources.clone()))
        .merge(integrations::IntegrationRoutes::routes(resources.clone()))
        .merge(preferences::PreferenceRoutes::routes(resources.clone()))
        .merge(suggestions::SuggestionRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
