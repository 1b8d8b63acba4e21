// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database creation and user seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(dead_code)]

use fitweave_server::database::Database;
use fitweave_server::models::{UpsertUser, User};

/// Fixed 32-byte key for test databases
pub const TEST_KEY: [u8; 32] = [0u8; 32];

/// Create a migrated in-memory database
pub async fn test_db() -> Database {
    Database::new("sqlite::memory:", TEST_KEY.to_vec())
        .await
        .expect("Failed to create test database")
}

/// Create a database with a distinct key, for wrong-key decryption tests
pub async fn test_db_with_key(key: Vec<u8>) -> Database {
    Database::new("sqlite::memory:", key)
        .await
        .expect("Failed to create test database")
}

/// Seed a user row and return it
pub async fn seed_user(db: &Database, id: &str) -> User {
    db.upsert_user(&UpsertUser {
        id: id.to_owned(),
        email: Some(format!("{id}@example.com")),
        first_name: Some("Test".to_owned()),
        last_name: Some("User".to_owned()),
        profile_image_url: None,
    })
    .await
    .expect("Failed to seed user")
}
