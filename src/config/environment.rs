// ABOUTME: Environment-only server configuration
// ABOUTME: The token encryption key is mandatory; startup fails without it
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{AppError, AppResult};
use std::env;

/// Process-wide server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database connection string
    pub database_url: String,
    /// 32-byte AES-256-GCM key for token encryption at rest
    pub encryption_key: Vec<u8>,
    /// HS256 secret for bearer-token authentication
    pub jwt_secret: String,
    /// Google OAuth client id; Google Fit integration is disabled when absent
    pub google_client_id: Option<String>,
    /// Google OAuth client secret
    pub google_client_secret: Option<String>,
    /// `OpenAI` API key; suggestion generation falls back to static text
    /// when absent
    pub openai_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// The encryption key (`FITWEAVE_ENCRYPTION_KEY`, 64 hex characters) and
    /// JWT secret (`FITWEAVE_JWT_SECRET`) have no fallback: running without
    /// them is a configuration error, never a silent default.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is absent or malformed
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var("FITWEAVE_HTTP_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|e| AppError::config(format!("Invalid FITWEAVE_HTTP_PORT: {e}")))?,
            Err(_) => 8080,
        };

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:fitweave.db".to_owned());

        let encryption_key_hex = env::var("FITWEAVE_ENCRYPTION_KEY").map_err(|_| {
            AppError::config(
                "FITWEAVE_ENCRYPTION_KEY is required (64 hex characters); \
                 refusing to start with a default key",
            )
        })?;
        let encryption_key = decode_encryption_key(&encryption_key_hex)?;

        let jwt_secret = env::var("FITWEAVE_JWT_SECRET")
            .map_err(|_| AppError::config("FITWEAVE_JWT_SECRET is required"))?;

        Ok(Self {
            http_port,
            database_url,
            encryption_key,
            jwt_secret,
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
        })
    }

    /// Whether Google OAuth credentials are configured
    #[must_use]
    pub const fn google_fit_enabled(&self) -> bool {
        self.google_client_id.is_some() && self.google_client_secret.is_some()
    }
}

/// Decode a 64-hex-character encryption key into its 32 raw bytes
///
/// # Errors
///
/// Returns an error if the value is not valid hex or not 32 bytes long
pub fn decode_encryption_key(hex_key: &str) -> AppResult<Vec<u8>> {
    let key = hex::decode(hex_key.trim())
        .map_err(|e| AppError::config(format!("FITWEAVE_ENCRYPTION_KEY is not valid hex: {e}")))?;
    if key.len() != 32 {
        return Err(AppError::config(format!(
            "FITWEAVE_ENCRYPTION_KEY must decode to 32 bytes, got {}",
            key.len()
        )));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::decode_encryption_key;

    #[test]
    fn decodes_valid_key() {
        let key = decode_encryption_key(&"ab".repeat(32)).unwrap();
        assert_eq!(key.len(), 32);
        assert!(key.iter().all(|b| *b == 0xab));
    }

    #[test]
    fn rejects_short_key() {
        assert!(decode_encryption_key("abcd").is_err());
    }

    #[test]
    fn rejects_non_hex_key() {
        assert!(decode_encryption_key(&"zz".repeat(32)).is_err());
    }
}
