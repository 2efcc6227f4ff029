// ABOUTME: Seeds a demo training plan and client assignment for local development
// ABOUTME: Prints the ids needed to exercise the API by hand
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seed demo data: one trainer plan with a three-day split, assigned to a
//! demo client starting at the most recent Sunday.

use anyhow::Result;
use chrono::{Datelike, Days, Utc};
use trainlog_server::{
    config::ServerConfig,
    database::Database,
    models::{ClientPlanAssignment, PlanExerciseTemplate, TrainingPlan},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    let database = Database::new(&config.database_url).await?;

    let trainer_id = Uuid::new_v4();
    let client_id = Uuid::new_v4();

    let mut plan = TrainingPlan::new(trainer_id, "Push/Pull/Legs", 1);
    plan.description = Some("Three-day split for demo purposes".into());
    database.create_plan(&plan).await?;

    // (name, day_of_week, sets, reps, weight kg)
    let exercises = [
        ("Bench Press", 1_u8, 4_i64, 8_i64, Some(80.0)),
        ("Overhead Press", 1, 3, 10, Some(40.0)),
        ("Barbell Row", 3, 4, 8, Some(70.0)),
        ("Lat Pulldown", 3, 3, 12, Some(55.0)),
        ("Back Squat", 5, 5, 5, Some(100.0)),
        ("Romanian Deadlift", 5, 3, 10, Some(90.0)),
    ];

    for (name, day, sets, reps, weight) in exercises {
        let template = PlanExerciseTemplate {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            exercise_name: name.into(),
            day_of_week: day,
            sets: Some(sets),
            reps: Some(reps),
            weight,
            duration_seconds: None,
            rest_seconds: Some(120),
            notes: None,
            created_at: Utc::now(),
        };
        database.create_plan_exercise(&template).await?;
    }

    let today = Utc::now().date_naive();
    let start_date = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_sunday())))
        .unwrap_or(today);

    let assignment = ClientPlanAssignment {
        id: Uuid::new_v4(),
        plan_id: plan.id,
        client_id,
        start_date,
        end_date: None,
        is_active: true,
    };
    database.assign_plan(&assignment).await?;

    println!("Seeded demo data into {}", config.database_url);
    println!("  plan_id:   {}", plan.id);
    println!("  client_id: {client_id}");
    println!("  start:     {start_date}");
    println!();
    println!("Try: curl -H 'x-client-id: {client_id}' \\");
    println!("  'http://localhost:{}/api/workout-by-date?date={today}'", config.http_port);

    Ok(())
}
