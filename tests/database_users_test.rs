// ABOUTME: Tests for the user store
// ABOUTME: Covers sign-in upsert semantics and timestamp handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::test_db;
use fitweave_server::models::UpsertUser;

#[tokio::test]
async fn upsert_creates_then_updates() {
    let db = test_db().await;

    let created = db
        .upsert_user(&UpsertUser {
            id: "subject-1".to_owned(),
            email: Some("first@example.com".to_owned()),
            first_name: Some("Ada".to_owned()),
            last_name: None,
            profile_image_url: None,
        })
        .await
        .expect("create failed");
    assert_eq!(created.id, "subject-1");
    assert_eq!(created.email.as_deref(), Some("first@example.com"));

    let updated = db
        .upsert_user(&UpsertUser {
            id: "subject-1".to_owned(),
            email: Some("second@example.com".to_owned()),
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            profile_image_url: None,
        })
        .await
        .expect("update failed");

    assert_eq!(updated.email.as_deref(), Some("second@example.com"));
    assert_eq!(updated.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(updated.created_at, created.created_at);

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .expect("count failed");
    assert_eq!(row.0, 1);
}

#[tokio::test]
async fn get_user_returns_none_for_unknown_id() {
    let db = test_db().await;
    let user = db.get_user("nobody").await.expect("get failed");
    assert!(user.is_none());
}

#[tokio::test]
async fn upsert_overwrites_claim_fields_with_none() {
    let db = test_db().await;

    db.upsert_user(&UpsertUser {
        id: "subject-1".to_owned(),
        email: Some("a@example.com".to_owned()),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        profile_image_url: Some("https://example.com/a.png".to_owned()),
    })
    .await
    .expect("create failed");

    // sign-in claims are authoritative: absent fields clear, not retain
    let updated = db
        .upsert_user(&UpsertUser {
            id: "subject-1".to_owned(),
            email: Some("a@example.com".to_owned()),
            first_name: None,
            last_name: None,
            profile_image_url: None,
        })
        .await
        .expect("update failed");

    assert!(updated.first_name.is_none());
    assert!(updated.profile_image_url.is_none());
}
