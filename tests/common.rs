// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, resource, and plan-seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `trainlog_server` integration tests

use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Once};
use trainlog_server::{
    config::ServerConfig,
    database::Database,
    models::{ClientPlanAssignment, PlanExerciseTemplate, TrainingPlan},
    server::ServerResources,
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Arc<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:")
        .await
        .expect("in-memory database");
    Arc::new(database)
}

/// Create test `ServerResources` backed by an in-memory database
pub async fn create_test_server_resources() -> Arc<ServerResources> {
    init_test_logging();
    let database = Database::new("sqlite::memory:")
        .await
        .expect("in-memory database");
    let config = Arc::new(ServerConfig::default());
    Arc::new(ServerResources::new(database, config))
}

/// A seeded plan: ids needed by the tests
pub struct SeededPlan {
    pub plan: TrainingPlan,
    pub client_id: Uuid,
    pub templates: Vec<PlanExerciseTemplate>,
}

/// Seed a plan with one template per `(name, day_of_week, sets)` tuple and
/// an active assignment for a fresh client starting at `start_date`
pub async fn seed_plan(
    database: &Database,
    exercises: &[(&str, u8, i64)],
    start_date: NaiveDate,
) -> SeededPlan {
    let client_id = Uuid::new_v4();
    let plan = TrainingPlan::new(Uuid::new_v4(), "Test Plan", 1);
    database.create_plan(&plan).await.expect("create plan");

    let mut templates = Vec::new();
    for (name, day_of_week, sets) in exercises {
        let template = PlanExerciseTemplate {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            exercise_name: (*name).to_string(),
            day_of_week: *day_of_week,
            sets: Some(*sets),
            reps: Some(10),
            weight: Some(60.0),
            duration_seconds: None,
            rest_seconds: Some(90),
            notes: None,
            created_at: Utc::now(),
        };
        database
            .create_plan_exercise(&template)
            .await
            .expect("create template");
        templates.push(template);
    }

    let assignment = ClientPlanAssignment {
        id: Uuid::new_v4(),
        plan_id: plan.id,
        client_id,
        start_date,
        end_date: None,
        is_active: true,
    };
    database.assign_plan(&assignment).await.expect("assign plan");

    SeededPlan {
        plan,
        client_id,
        templates,
    }
}

/// Calendar date helper
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
