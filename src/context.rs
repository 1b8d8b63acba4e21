// ABOUTME: Shared dependency injection context for route handlers
// ABOUTME: Bundles the database, auth manager, and external clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::external::openai_client::OpenAiClient;

/// Long-lived resources shared by every request handler
///
/// Constructed once at startup and passed as axum state; handlers never
/// reach for globals.
pub struct ServerResources {
    /// Database stores
    pub database: Database,
    /// Bearer-token authentication
    pub auth: AuthManager,
    /// Suggestion-generation client
    pub openai: OpenAiClient,
    /// Process-wide configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from a loaded configuration and connected database
    #[must_use]
    pub fn new(config: ServerConfig, database: Database) -> Self {
        let auth = AuthManager::new(&config.jwt_secret);
        let openai = OpenAiClient::new(config.openai_api_key.clone());
        Self {
            database,
            auth,
            openai,
            config,
        }
    }
}
