// ABOUTME: Tests for Google Fit sync orchestration
// ABOUTME: Covers every sync outcome and the last-sync timestamp stamping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration, Utc};
use common::{seed_user, test_db};
use fitweave_server::models::HealthIntegrationData;
use fitweave_server::providers::google_fit::{
    refresh_google_fit_token, sync_google_fit_data, SyncOutcome, SERVICE_NAME,
};

fn integration(user_id: &str) -> HealthIntegrationData {
    HealthIntegrationData {
        user_id: user_id.to_owned(),
        service_name: SERVICE_NAME.to_owned(),
        is_active: true,
        access_token: Some("access-token".to_owned()),
        refresh_token: Some("refresh-token".to_owned()),
        token_expires_at: Some(Utc::now() + Duration::seconds(3600)),
        settings: None,
    }
}

#[tokio::test]
async fn sync_without_integration_reports_not_connected() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::NotConnected);
    assert!(!outcome.is_synced());
}

#[tokio::test]
async fn sync_with_inactive_integration_reports_inactive() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = integration("u1");
    data.is_active = false;
    db.save_health_integration(&data).await.expect("save failed");

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::Inactive);
}

#[tokio::test]
async fn sync_without_access_token_reports_missing() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = integration("u1");
    data.access_token = None;
    db.save_health_integration(&data).await.expect("save failed");

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::MissingAccessToken);
}

#[tokio::test]
async fn sync_with_expired_token_reports_expired() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = integration("u1");
    data.token_expires_at = Some(Utc::now() - Duration::seconds(60));
    db.save_health_integration(&data).await.expect("save failed");

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::TokenExpired);

    // an expired attempt must not stamp the sync timestamp
    let stored = db
        .get_health_integration("u1", SERVICE_NAME)
        .await
        .expect("get failed")
        .expect("integration missing");
    assert!(stored.last_sync_at.is_none());
}

#[tokio::test]
async fn successful_sync_stamps_last_sync_at() {
    let db = test_db().await;
    seed_user(&db, "u1").await;
    db.save_health_integration(&integration("u1"))
        .await
        .expect("save failed");

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::Synced);
    assert!(outcome.is_synced());

    let stored = db
        .get_health_integration("u1", SERVICE_NAME)
        .await
        .expect("get failed")
        .expect("integration missing");
    assert!(stored.last_sync_at.is_some());
}

#[tokio::test]
async fn sync_without_expiry_treats_token_as_valid() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let mut data = integration("u1");
    data.token_expires_at = None;
    db.save_health_integration(&data).await.expect("save failed");

    let outcome = sync_google_fit_data(&db, "u1").await.expect("sync failed");
    assert_eq!(outcome, SyncOutcome::Synced);
}

#[tokio::test]
async fn refresh_is_a_stub_reporting_false() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    // no integration at all
    assert!(!refresh_google_fit_token(&db, "u1")
        .await
        .expect("refresh failed"));

    db.save_health_integration(&integration("u1"))
        .await
        .expect("save failed");
    assert!(!refresh_google_fit_token(&db, "u1")
        .await
        .expect("refresh failed"));
}
