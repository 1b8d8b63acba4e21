// ABOUTME: JWT bearer authentication for route handlers
// ABOUTME: Issues and validates HS256 tokens carrying the user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime in hours
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT claims carried by a bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and validates bearer tokens for the REST surface
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthManager {
    /// Create a manager from the configured HS256 secret
    #[must_use]
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Issue a token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token signing fails
    pub fn generate_token(&self, user_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, tampered, or malformed
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token: {e}")))
    }

    /// Authenticate a request from its headers, returning the caller's
    /// user id
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization header is missing or the
    /// bearer token does not validate
    pub fn authenticate(&self, headers: &HeaderMap) -> AppResult<String> {
        let auth_header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::auth_invalid("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header is not a bearer token"))?;

        Ok(self.validate_token(token)?.sub)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::AuthManager;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn token_roundtrip() {
        let auth = AuthManager::new("test-secret");
        let token = auth.generate_token("user-123").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = AuthManager::new("secret-a")
            .generate_token("user-123")
            .unwrap();
        assert!(AuthManager::new("secret-b").validate_token(&token).is_err());
    }

    #[test]
    fn authenticates_bearer_header() {
        let auth = AuthManager::new("test-secret");
        let token = auth.generate_token("user-123").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(auth.authenticate(&headers).unwrap(), "user-123");

        assert!(auth.authenticate(&HeaderMap::new()).is_err());
    }
}
