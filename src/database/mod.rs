// ABOUTME: Core database handle with migration system and token encryption
// ABOUTME: Stores for users, profiles, activities, sessions, integrations, preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Transactional replace-set storage for activity preferences
pub mod activity_preferences;
/// Daily activity upsert keyed by user and calendar day
pub mod daily_activities;
/// Health integration credential storage with encryption at the boundary
pub mod health_integrations;
/// Health profile upsert with goal defaults
pub mod health_profiles;
/// Append-only workout session log
pub mod health_sessions;
/// User account upsert on sign-in
pub mod users;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::{info, warn};

/// AES-256-GCM nonce length in bytes
const NONCE_LEN: usize = 12;

/// Database connection pool with token encryption support
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    encryption_key: Vec<u8>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The encryption key is not exactly 32 bytes
    /// - Database connection fails
    /// - Migration process fails
    pub async fn new(database_url: &str, encryption_key: Vec<u8>) -> AppResult<Self> {
        if encryption_key.len() != 32 {
            return Err(AppError::config(format!(
                "Encryption key must be 32 bytes, got {}",
                encryption_key.len()
            )));
        }

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self {
            pool,
            encryption_key,
        };

        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run all pending migrations embedded at compile time
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails
    pub async fn migrate(&self) -> AppResult<()> {
        info!("Running database migrations...");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Encrypt an opaque secret using AES-256-GCM
    ///
    /// Each call draws a fresh random nonce, so distinct encryptions of
    /// identical plaintext produce distinct envelopes. The envelope format is
    /// `<nonceHex>:<cipherHex>` where the ciphertext carries the GCM tag.
    ///
    /// # Errors
    ///
    /// Returns an error if randomness or the cipher fails
    pub fn encrypt_token(&self, plaintext: &str) -> AppResult<String> {
        let rng = SystemRandom::new();

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rng.fill(&mut nonce_bytes)
            .map_err(|e| AppError::internal(format!("Failed to generate nonce: {e}")))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.encryption_key)
            .map_err(|e| AppError::internal(format!("Failed to create encryption key: {e}")))?;
        let key = LessSafeKey::new(unbound_key);

        let mut data = plaintext.as_bytes().to_vec();
        key.seal_in_place_append_tag(nonce, Aad::empty(), &mut data)
            .map_err(|e| AppError::internal(format!("Failed to encrypt token: {e}")))?;

        Ok(format!("{}:{}", hex::encode(nonce_bytes), hex::encode(data)))
    }

    /// Decrypt a token envelope, tolerating legacy and malformed values
    ///
    /// Inputs without a `:` separator are legacy plaintext written before
    /// encryption was introduced and are returned unchanged. Malformed
    /// envelopes (bad hex, wrong nonce length, failed authentication) are
    /// also returned unchanged after a warning, so a corrupted token cannot
    /// take down a read path. Callers that actually use the token against a
    /// third-party API must treat downstream auth failures as "integration
    /// requires re-authorization".
    #[must_use]
    pub fn decrypt_token(&self, envelope: &str) -> String {
        if !envelope.contains(':') {
            // Legacy unencrypted token, return as-is
            return envelope.to_owned();
        }

        match self.try_decrypt(envelope) {
            Some(plaintext) => plaintext,
            None => {
                warn!("Token decryption failed, returning value unchanged");
                envelope.to_owned()
            }
        }
    }

    fn try_decrypt(&self, envelope: &str) -> Option<String> {
        let (nonce_hex, cipher_hex) = envelope.split_once(':')?;
        if cipher_hex.contains(':') {
            return None;
        }

        let nonce_bytes: [u8; NONCE_LEN] = hex::decode(nonce_hex).ok()?.try_into().ok()?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);
        let mut cipher_bytes = hex::decode(cipher_hex).ok()?;

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.encryption_key).ok()?;
        let key = LessSafeKey::new(unbound_key);

        let plaintext = key
            .open_in_place(nonce, Aad::empty(), &mut cipher_bytes)
            .ok()?;
        String::from_utf8(plaintext.to_vec()).ok()
    }

    /// Decrypt an optional token column as read from a row
    pub(crate) fn decrypt_optional(&self, envelope: Option<String>) -> Option<String> {
        envelope.map(|e| self.decrypt_token(&e))
    }
}

/// Generate a fresh random 32-byte encryption key
///
/// Intended for operational key provisioning and tests.
///
/// # Errors
///
/// Returns an error if the system randomness source fails
pub fn generate_encryption_key() -> AppResult<Vec<u8>> {
    let rng = SystemRandom::new();
    let mut key = vec![0u8; 32];
    rng.fill(&mut key)
        .map_err(|e| AppError::internal(format!("Failed to generate encryption key: {e}")))?;
    Ok(key)
}

/// Normalize a timestamp to midnight UTC of its calendar day
///
/// Daily activity uniqueness is by calendar day: two writes on the same day
/// must collide on the (`user_id`, `date`) key.
#[must_use]
pub fn start_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(date, |naive| naive.and_utc())
}

/// Last instant of the calendar day containing `date`
#[must_use]
pub fn end_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}
