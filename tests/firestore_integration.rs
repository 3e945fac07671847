// SPDX-License-Identifier: MIT

//! Firestore store-layer integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (set FIRESTORE_EMULATOR_HOST).

use chrono::TimeZone;
use chrono::Utc;

mod common;
use common::{test_db, unique_username};

fn date(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_and_find_user() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("alice");

    // Initially absent
    let before = db.find_user_by_name(&username).await.unwrap();
    assert!(before.is_none(), "User should not exist before creation");

    let created = db.create_user(&username).await.unwrap();
    let id = created.id.clone().expect("Created user should have an ID");
    assert_eq!(created.username, username);
    assert!(created.active);

    // Found by name
    let by_name = db.find_user_by_name(&username).await.unwrap().unwrap();
    assert_eq!(by_name.id.as_deref(), Some(id.as_str()));

    // Found by ID
    let by_id = db.find_user_by_id(&id).await.unwrap().unwrap();
    assert_eq!(by_id.username, username);
}

#[tokio::test]
async fn test_find_user_by_id_unknown() {
    require_emulator!();

    let db = test_db().await;
    let missing = db.find_user_by_id("no-such-document").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_all_users_includes_new_user() {
    require_emulator!();

    let db = test_db().await;
    let username = unique_username("bob");
    db.create_user(&username).await.unwrap();

    let users = db.find_all_users().await.unwrap();
    let matches = users.iter().filter(|u| u.username == username).count();
    assert_eq!(matches, 1, "New user should be listed exactly once");
}

// ═══════════════════════════════════════════════════════════════════════════
// EXERCISE TESTS
// ═══════════════════════════════════════════════════════════════════════════

/// Seed a user with exercises on Jan 1, Jan 5 and Jan 10 2023.
async fn seed_user_with_exercises(
    db: &exercise_tracker::db::FirestoreDb,
) -> String {
    let username = unique_username("runner");
    let user = db.create_user(&username).await.unwrap();
    let user_id = user.id.expect("Created user should have an ID");

    for (desc, day) in [("walk", 1), ("run", 5), ("swim", 10)] {
        db.create_exercise(&user_id, desc, 30.0, date(2023, 1, day))
            .await
            .unwrap();
    }

    user_id
}

#[tokio::test]
async fn test_exercises_sorted_newest_first() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;

    let exercises = db
        .find_exercises_by_user(&user_id, None, None, None)
        .await
        .unwrap();

    let descriptions: Vec<&str> = exercises.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["swim", "run", "walk"]);
}

#[tokio::test]
async fn test_exercise_date_window_bounds() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;

    // Strictly greater than `from`, less than or equal to `to`: the Jan 1
    // exercise is excluded by the lower bound, Jan 5 is kept by the upper.
    let exercises = db
        .find_exercises_by_user(
            &user_id,
            Some(date(2023, 1, 1)),
            Some(date(2023, 1, 5)),
            None,
        )
        .await
        .unwrap();

    let descriptions: Vec<&str> = exercises.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["run"]);
}

#[tokio::test]
async fn test_exercise_window_needs_both_bounds() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;

    // Only `from` supplied: the window is not applied at all.
    let exercises = db
        .find_exercises_by_user(&user_id, Some(date(2023, 1, 5)), None, None)
        .await
        .unwrap();

    assert_eq!(exercises.len(), 3);
}

#[tokio::test]
async fn test_exercise_limit_caps_results() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;

    let exercises = db
        .find_exercises_by_user(&user_id, None, None, Some(2))
        .await
        .unwrap();

    let descriptions: Vec<&str> = exercises.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["swim", "run"]);
}

#[tokio::test]
async fn test_exercise_non_positive_limit_means_unlimited() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;

    for limit in [Some(0), Some(-7), None] {
        let exercises = db
            .find_exercises_by_user(&user_id, None, None, limit)
            .await
            .unwrap();
        assert_eq!(exercises.len(), 3, "limit {:?} should not cap", limit);
    }
}

#[tokio::test]
async fn test_exercises_scoped_to_user() {
    require_emulator!();

    let db = test_db().await;
    let user_id = seed_user_with_exercises(&db).await;
    let other_id = seed_user_with_exercises(&db).await;

    let exercises = db
        .find_exercises_by_user(&user_id, None, None, None)
        .await
        .unwrap();

    assert_eq!(exercises.len(), 3);
    assert!(exercises.iter().all(|e| e.user_id == user_id));
    assert_ne!(user_id, other_id);
}
