// ABOUTME: Integration tests for the workout HTTP routes
// ABOUTME: Covers auth, schedule resolution, completion flows, validation, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{create_test_server_resources, date, seed_plan};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use trainlog_server::server::{router, ServerResources};
use std::sync::Arc;
use uuid::Uuid;

async fn setup() -> (axum::Router, Arc<ServerResources>) {
    let resources = create_test_server_resources().await;
    (router(resources.clone()), resources)
}

// ============================================================================
// Authentication boundary
// ============================================================================

#[tokio::test]
async fn test_missing_client_header_is_unauthorized() {
    let (app, _) = setup().await;

    let response = AxumTestRequest::get("/api/workout-by-date?date=2025-03-10")
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_malformed_client_header_is_unauthorized() {
    let (app, _) = setup().await;

    let response = AxumTestRequest::get("/api/workout-by-date?date=2025-03-10")
        .header("x-client-id", "not-a-uuid")
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Schedule resolution
// ============================================================================

#[tokio::test]
async fn test_workout_by_date_returns_scheduled_exercises() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(
        &resources.database,
        &[("Bench Press", 1, 3), ("Overhead Press", 1, 3), ("Back Squat", 5, 5)],
        date(2025, 3, 2),
    )
    .await;

    // 2025-03-10 is a Monday
    let response = AxumTestRequest::get("/api/workout-by-date?date=2025-03-10")
        .header("x-client-id", &seeded.client_id.to_string())
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let workout = &body["workout"];
    assert_eq!(workout["dayOfWeek"], 1);
    assert_eq!(workout["week"], 1);
    let exercises = workout["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["exerciseName"], "Bench Press");
    assert_eq!(exercises[0]["status"], "notStarted");
    assert_eq!(exercises[0]["setStatuses"].as_array().unwrap().len(), 3);
    assert_eq!(body["planDetails"]["name"], "Test Plan");
}

#[tokio::test]
async fn test_rest_day_renders_empty_state_not_error() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;

    // 2025-03-11 is a Tuesday with nothing scheduled
    let response = AxumTestRequest::get("/api/workout-by-date?date=2025-03-11")
        .header("x-client-id", &seeded.client_id.to_string())
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(body["workout"].is_null());
    assert!(body["planDetails"].is_object());
    assert_eq!(body["message"], "Nothing scheduled for this date");
}

#[tokio::test]
async fn test_no_active_plan_renders_empty_state() {
    let (app, _resources) = setup().await;

    let response = AxumTestRequest::get("/api/workout-by-date?date=2025-03-10")
        .header("x-client-id", &Uuid::new_v4().to_string())
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(body["workout"].is_null());
    assert!(body["planDetails"].is_null());
    assert_eq!(body["message"], "No active training plan");
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;

    let response = AxumTestRequest::get("/api/workout-by-date?date=not-a-date")
        .header("x-client-id", &seeded.client_id.to_string())
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Completion mutations
// ============================================================================

#[tokio::test]
async fn test_complete_set_created_then_existing() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;
    let exercise_id = seeded.templates[0].id;

    let request = json!({
        "planExerciseId": exercise_id,
        "setNumber": 1,
        "date": "2025-03-10",
        "actualReps": 8,
        "actualWeight": 82.5
    });

    let response = AxumTestRequest::post("/api/complete-set")
        .header("x-client-id", &seeded.client_id.to_string())
        .json(&request)
        .send(app.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["created"], true);
    assert_eq!(body["entry"]["actualReps"], 8);

    // Duplicate request is absorbed, not an error
    let response = AxumTestRequest::post("/api/complete-set")
        .header("x-client-id", &seeded.client_id.to_string())
        .json(&request)
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["created"], false);
}

#[tokio::test]
async fn test_complete_set_rejects_nonpositive_set_number() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;

    let response = AxumTestRequest::post("/api/complete-set")
        .header("x-client-id", &seeded.client_id.to_string())
        .json(&json!({
            "planExerciseId": seeded.templates[0].id,
            "setNumber": 0,
            "date": "2025-03-10"
        }))
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_complete_set_unknown_exercise_is_not_found() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;

    let response = AxumTestRequest::post("/api/complete-set")
        .header("x-client-id", &seeded.client_id.to_string())
        .json(&json!({
            "planExerciseId": Uuid::new_v4(),
            "setNumber": 1,
            "date": "2025-03-10"
        }))
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_uncheck_set_returns_no_content_even_when_absent() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;

    let response = AxumTestRequest::delete("/api/uncheck-set")
        .header("x-client-id", &seeded.client_id.to_string())
        .json(&json!({
            "planExerciseId": seeded.templates[0].id,
            "setNumber": 1,
            "date": "2025-03-10"
        }))
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_complete_all_sets_reports_created_entries() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Back Squat", 1, 5)], date(2025, 3, 2)).await;
    let exercise_id = seeded.templates[0].id;
    let client = seeded.client_id.to_string();

    let request = json!({
        "planExerciseId": exercise_id,
        "totalSets": 5,
        "date": "2025-03-10",
        "actualWeight": 100.0
    });

    let response = AxumTestRequest::post("/api/complete-exercise-all-sets")
        .header("x-client-id", &client)
        .json(&request)
        .send(app.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let created: Vec<Value> = response.json();
    assert_eq!(created.len(), 5);

    // Second call creates nothing further
    let response = AxumTestRequest::post("/api/complete-exercise-all-sets")
        .header("x-client-id", &client)
        .json(&request)
        .send(app.clone())
        .await;
    let created: Vec<Value> = response.json();
    assert!(created.is_empty());

    let response = AxumTestRequest::get("/api/workout-logs?date=2025-03-10")
        .header("x-client-id", &client)
        .send(app)
        .await;
    let entries: Vec<Value> = response.json();
    assert_eq!(entries.len(), 5);
}

// ============================================================================
// Notes
// ============================================================================

#[tokio::test]
async fn test_save_notes_rejects_empty_and_overwrites() {
    let (app, resources) = setup().await;
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;
    let exercise_id = seeded.templates[0].id;
    let client = seeded.client_id.to_string();

    let response = AxumTestRequest::post("/api/save-exercise-notes")
        .header("x-client-id", &client)
        .json(&json!({
            "planExerciseId": exercise_id,
            "date": "2025-03-10",
            "notes": "   "
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    for notes in ["shoulder tight", "fine after warmup"] {
        let response = AxumTestRequest::post("/api/save-exercise-notes")
            .header("x-client-id", &client)
            .json(&json!({
                "planExerciseId": exercise_id,
                "date": "2025-03-10",
                "notes": notes
            }))
            .send(app.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let notes = resources
        .database
        .get_exercise_notes(exercise_id, date(2025, 3, 10))
        .await
        .unwrap();
    assert_eq!(notes.as_deref(), Some("fine after warmup"));
}

// ============================================================================
// Stats scenarios
// ============================================================================

#[tokio::test]
async fn test_weekly_stats_day_counts_only_when_fully_completed() {
    let (app, resources) = setup().await;
    // One exercise on Monday with three sets
    let seeded = seed_plan(&resources.database, &[("Bench Press", 1, 3)], date(2025, 3, 2)).await;
    let exercise_id = seeded.templates[0].id;
    let client = seeded.client_id.to_string();

    for set_number in [1, 2] {
        AxumTestRequest::post("/api/complete-set")
            .header("x-client-id", &client)
            .json(&json!({
                "planExerciseId": exercise_id,
                "setNumber": set_number,
                "date": "2025-03-10"
            }))
            .send(app.clone())
            .await;
    }

    let response = AxumTestRequest::get("/api/weekly-stats?today=2025-03-10")
        .header("x-client-id", &client)
        .send(app.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalWorkouts"], 1);
    assert_eq!(body["completedWorkouts"], 0);

    AxumTestRequest::post("/api/complete-set")
        .header("x-client-id", &client)
        .json(&json!({
            "planExerciseId": exercise_id,
            "setNumber": 3,
            "date": "2025-03-10"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::get("/api/weekly-stats?today=2025-03-10")
        .header("x-client-id", &client)
        .send(app)
        .await;
    let body: Value = response.json();
    assert_eq!(body["completedWorkouts"], 1);
}

#[tokio::test]
async fn test_streak_counts_consecutive_scheduled_days() {
    let (app, resources) = setup().await;
    // Scheduled Monday and Wednesday; assignment starts Sunday 2025-03-02
    let seeded = seed_plan(
        &resources.database,
        &[("Bench Press", 1, 1), ("Barbell Row", 3, 1)],
        date(2025, 3, 2),
    )
    .await;
    let client = seeded.client_id.to_string();

    // Nothing completed: streak is 0 on a scheduled day
    let response = AxumTestRequest::get("/api/workout-streak?today=2025-03-10")
        .header("x-client-id", &client)
        .send(app.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["streak"], 0);

    // Complete Wednesday 3/5 and Monday 3/10; query on Monday evening
    for (exercise, d) in [(&seeded.templates[1], "2025-03-05"), (&seeded.templates[0], "2025-03-10")] {
        AxumTestRequest::post("/api/complete-set")
            .header("x-client-id", &client)
            .json(&json!({
                "planExerciseId": exercise.id,
                "setNumber": 1,
                "date": d
            }))
            .send(app.clone())
            .await;
    }

    let response = AxumTestRequest::get("/api/workout-streak?today=2025-03-10")
        .header("x-client-id", &client)
        .send(app.clone())
        .await;
    let body: Value = response.json();
    // Monday and the previous Wednesday complete; rest days in between skip
    assert_eq!(body["streak"], 2);

    // Unchecking Wednesday breaks the chain behind Monday
    AxumTestRequest::delete("/api/uncheck-set")
        .header("x-client-id", &client)
        .json(&json!({
            "planExerciseId": seeded.templates[1].id,
            "setNumber": 1,
            "date": "2025-03-05"
        }))
        .send(app.clone())
        .await;

    let response = AxumTestRequest::get("/api/workout-streak?today=2025-03-10")
        .header("x-client-id", &client)
        .send(app)
        .await;
    let body: Value = response.json();
    assert_eq!(body["streak"], 1);
}

#[tokio::test]
async fn test_stats_without_active_plan_are_zero() {
    let (app, _resources) = setup().await;
    let client = Uuid::new_v4().to_string();

    let response = AxumTestRequest::get("/api/weekly-stats")
        .header("x-client-id", &client)
        .send(app.clone())
        .await;
    let body: Value = response.json();
    assert_eq!(body["totalWorkouts"], 0);
    assert_eq!(body["completedWorkouts"], 0);

    let response = AxumTestRequest::get("/api/workout-streak")
        .header("x-client-id", &client)
        .send(app)
        .await;
    let body: Value = response.json();
    assert_eq!(body["streak"], 0);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = setup().await;

    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
