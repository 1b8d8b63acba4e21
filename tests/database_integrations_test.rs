// ABOUTME: Tests for the health integration store
// ABOUTME: Covers upsert semantics, at-rest encryption, redaction, sync stamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{seed_user, test_db};
use fitweave_server::models::{HealthIntegrationData, TOKEN_PLACEHOLDER};
use sqlx::Row;

fn google_fit_data(user_id: &str) -> HealthIntegrationData {
    HealthIntegrationData {
        user_id: user_id.to_owned(),
        service_name: "google_fit".to_owned(),
        is_active: true,
        access_token: Some("access-token-1".to_owned()),
        refresh_token: Some("refresh-token-1".to_owned()),
        token_expires_at: Some(chrono::Utc::now() + chrono::Duration::seconds(3600)),
        settings: None,
    }
}

#[tokio::test]
async fn save_returns_decrypted_tokens() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let saved = db
        .save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");

    assert_eq!(saved.service_name, "google_fit");
    assert_eq!(saved.access_token.as_deref(), Some("access-token-1"));
    assert_eq!(saved.refresh_token.as_deref(), Some("refresh-token-1"));
    assert!(saved.is_active);
}

#[tokio::test]
async fn tokens_are_ciphertext_at_rest() {
    let db = test_db().await;
    seed_user(&db, "u1").await;
    db.save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");

    let row = sqlx::query(
        "SELECT access_token, refresh_token FROM health_integrations WHERE user_id = 'u1'",
    )
    .fetch_one(db.pool())
    .await
    .expect("raw read failed");

    let stored_access: String = row.get("access_token");
    let stored_refresh: String = row.get("refresh_token");

    assert_ne!(stored_access, "access-token-1");
    assert_ne!(stored_refresh, "refresh-token-1");
    assert!(stored_access.contains(':'));
    assert!(stored_refresh.contains(':'));
    assert_eq!(db.decrypt_token(&stored_access), "access-token-1");
}

#[tokio::test]
async fn second_save_overwrites_same_row() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let first = db
        .save_health_integration(&google_fit_data("u1"))
        .await
        .expect("first save failed");

    let mut update = google_fit_data("u1");
    update.access_token = Some("access-token-2".to_owned());
    // full overwrite: a missing refresh token clears the column
    update.refresh_token = None;
    let second = db
        .save_health_integration(&update)
        .await
        .expect("second save failed");

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.access_token.as_deref(), Some("access-token-2"));
    assert_eq!(second.refresh_token, None);

    let all = db
        .get_health_integrations("u1")
        .await
        .expect("list failed");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn service_name_is_lowercased() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = google_fit_data("u1");
    data.service_name = "Google_Fit".to_owned();
    let saved = db
        .save_health_integration(&data)
        .await
        .expect("save failed");
    assert_eq!(saved.service_name, "google_fit");

    // mixed case collides with lowercase on the uniqueness key
    let again = db
        .save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");
    assert_eq!(again.id, saved.id);
}

#[tokio::test]
async fn get_missing_integration_is_none() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let integration = db
        .get_health_integration("u1", "google_fit")
        .await
        .expect("get failed");
    assert!(integration.is_none());

    let all = db
        .get_health_integrations("u1")
        .await
        .expect("list failed");
    assert!(all.is_empty());
}

#[tokio::test]
async fn listing_orders_by_service_name() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    for service in ["strava", "fitbit", "google_fit"] {
        let mut data = google_fit_data("u1");
        data.service_name = service.to_owned();
        db.save_health_integration(&data).await.expect("save failed");
    }

    let all = db
        .get_health_integrations("u1")
        .await
        .expect("list failed");
    let names: Vec<_> = all.iter().map(|i| i.service_name.as_str()).collect();
    assert_eq!(names, vec!["fitbit", "google_fit", "strava"]);
}

#[tokio::test]
async fn mark_synced_stamps_and_reports() {
    let db = test_db().await;
    seed_user(&db, "u1").await;
    db.save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");

    let marked = db
        .update_health_integration_sync("u1", "google_fit")
        .await
        .expect("mark failed");
    assert!(marked);

    let integration = db
        .get_health_integration("u1", "google_fit")
        .await
        .expect("get failed")
        .expect("integration missing");
    assert!(integration.last_sync_at.is_some());

    let missing = db
        .update_health_integration_sync("u1", "fitbit")
        .await
        .expect("mark failed");
    assert!(!missing);
}

#[tokio::test]
async fn delete_reports_whether_a_row_existed() {
    let db = test_db().await;
    seed_user(&db, "u1").await;
    db.save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");

    assert!(db
        .delete_health_integration("u1", "google_fit")
        .await
        .expect("delete failed"));
    assert!(!db
        .delete_health_integration("u1", "google_fit")
        .await
        .expect("delete failed"));
}

#[tokio::test]
async fn redaction_masks_present_tokens_only() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = google_fit_data("u1");
    data.refresh_token = None;
    let saved = db
        .save_health_integration(&data)
        .await
        .expect("save failed");

    let redacted = saved.redacted();
    assert_eq!(redacted.access_token.as_deref(), Some(TOKEN_PLACEHOLDER));
    assert_eq!(redacted.refresh_token, None);
}

#[tokio::test]
async fn integrations_are_scoped_per_user() {
    let db = test_db().await;
    seed_user(&db, "u1").await;
    seed_user(&db, "u2").await;

    db.save_health_integration(&google_fit_data("u1"))
        .await
        .expect("save failed");
    db.save_health_integration(&google_fit_data("u2"))
        .await
        .expect("save failed");

    let u1 = db.get_health_integrations("u1").await.expect("list failed");
    let u2 = db.get_health_integrations("u2").await.expect("list failed");
    assert_eq!(u1.len(), 1);
    assert_eq!(u2.len(), 1);
    assert_ne!(u1[0].id, u2[0].id);
}
