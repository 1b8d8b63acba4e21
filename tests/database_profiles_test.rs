// ABOUTME: Tests for the health profile store
// ABOUTME: Covers goal defaults on insert and field retention on patch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{seed_user, test_db};
use fitweave_server::models::HealthProfileData;
use serde_json::json;

#[tokio::test]
async fn insert_applies_goal_defaults() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let profile = db
        .upsert_health_profile(&HealthProfileData {
            user_id: "u1".to_owned(),
            age: Some(34),
            ..HealthProfileData::default()
        })
        .await
        .expect("upsert failed");

    assert_eq!(profile.daily_steps_goal, 10_000);
    assert_eq!(profile.weekly_workouts_goal, 3);
    assert_eq!(profile.age, Some(34));
    assert!(profile.height.is_none());
}

#[tokio::test]
async fn explicit_goals_override_defaults() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let profile = db
        .upsert_health_profile(&HealthProfileData {
            user_id: "u1".to_owned(),
            daily_steps_goal: Some(12_500),
            weekly_workouts_goal: Some(5),
            ..HealthProfileData::default()
        })
        .await
        .expect("upsert failed");

    assert_eq!(profile.daily_steps_goal, 12_500);
    assert_eq!(profile.weekly_workouts_goal, 5);
}

#[tokio::test]
async fn patch_retains_omitted_fields() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let first = db
        .upsert_health_profile(&HealthProfileData {
            user_id: "u1".to_owned(),
            age: Some(34),
            height: Some(178.0),
            weight: Some(74.5),
            daily_steps_goal: Some(8000),
            preferences: Some(json!({"units": "metric"})),
            ..HealthProfileData::default()
        })
        .await
        .expect("first upsert failed");

    // patch only the weight
    let patched = db
        .upsert_health_profile(&HealthProfileData {
            user_id: "u1".to_owned(),
            weight: Some(73.0),
            ..HealthProfileData::default()
        })
        .await
        .expect("patch failed");

    assert_eq!(patched.id, first.id);
    assert_eq!(patched.created_at, first.created_at);
    assert_eq!(patched.weight, Some(73.0));
    assert_eq!(patched.age, Some(34));
    assert_eq!(patched.height, Some(178.0));
    assert_eq!(patched.daily_steps_goal, 8000);
    assert_eq!(patched.preferences, Some(json!({"units": "metric"})));
}

#[tokio::test]
async fn one_profile_per_user() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    for _ in 0..3 {
        db.upsert_health_profile(&HealthProfileData {
            user_id: "u1".to_owned(),
            ..HealthProfileData::default()
        })
        .await
        .expect("upsert failed");
    }

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM health_profiles WHERE user_id = 'u1'")
        .fetch_one(db.pool())
        .await
        .expect("count failed");
    assert_eq!(row.0, 1);
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let db = test_db().await;
    seed_user(&db, "u1").await;

    let profile = db.get_health_profile("u1").await.expect("get failed");
    assert!(profile.is_none());
}
