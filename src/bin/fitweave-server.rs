// ABOUTME: Server binary entrypoint
// ABOUTME: Loads configuration, connects the database, and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use fitweave_server::config::environment::ServerConfig;
use fitweave_server::context::ServerResources;
use fitweave_server::database::Database;
use fitweave_server::errors::{AppError, AppResult};
use fitweave_server::{logging, routes};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> AppResult<()> {
    logging::init();

    let config = ServerConfig::from_env()?;
    let port = config.http_port;

    let database = Database::new(&config.database_url, config.encryption_key.clone()).await?;
    info!(database_url = %config.database_url, "Database ready");

    let resources = Arc::new(ServerResources::new(config, database));
    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| AppError::config(format!("Failed to bind port {port}: {e}")))?;
    info!(port, "HTTP server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
