// ABOUTME: Plan store access - read operations for plans, templates, and assignments
// ABOUTME: Provisioning writes exist for the seeder and tests; the core never calls them
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan store queries
//!
//! The scheduling core consumes plans read-only. The `create_*`/`assign_*`
//! helpers exist so the demo seeder and tests can provision data through the
//! same schema the trainer-facing platform writes to.

use super::{parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ClientPlanAssignment, PlanExerciseTemplate, TrainingPlan};
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Store a training plan
    pub async fn create_plan(&self, plan: &TrainingPlan) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO training_plans (id, trainer_id, name, description, week_cycle, duration_weeks, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.trainer_id.to_string())
        .bind(&plan.name)
        .bind(&plan.description)
        .bind(plan.week_cycle)
        .bind(plan.duration_weeks)
        .bind(plan.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create plan: {e}")))?;

        Ok(())
    }

    /// Store an exercise template for a plan
    pub async fn create_plan_exercise(&self, template: &PlanExerciseTemplate) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO plan_exercises
                (id, plan_id, exercise_name, day_of_week, sets, reps, weight,
                 duration_seconds, rest_seconds, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(template.id.to_string())
        .bind(template.plan_id.to_string())
        .bind(&template.exercise_name)
        .bind(i64::from(template.day_of_week))
        .bind(template.sets)
        .bind(template.reps)
        .bind(template.weight)
        .bind(template.duration_seconds)
        .bind(template.rest_seconds)
        .bind(&template.notes)
        .bind(template.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to create plan exercise: {e}")))?;

        Ok(())
    }

    /// Assign a plan to a client, deactivating any previous assignment
    pub async fn assign_plan(&self, assignment: &ClientPlanAssignment) -> AppResult<()> {
        sqlx::query("UPDATE plan_assignments SET is_active = 0 WHERE client_id = $1")
            .bind(assignment.client_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| AppError::database(format!("Failed to deactivate assignments: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO plan_assignments (id, plan_id, client_id, start_date, end_date, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(assignment.id.to_string())
        .bind(assignment.plan_id.to_string())
        .bind(assignment.client_id.to_string())
        .bind(assignment.start_date.format("%Y-%m-%d").to_string())
        .bind(assignment.end_date.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(assignment.is_active)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to assign plan: {e}")))?;

        Ok(())
    }

    /// Get the client's active plan assignment, if any
    pub async fn get_active_assignment(
        &self,
        client_id: Uuid,
    ) -> AppResult<Option<ClientPlanAssignment>> {
        let row = sqlx::query(
            r"
            SELECT id, plan_id, client_id, start_date, end_date, is_active
            FROM plan_assignments
            WHERE client_id = $1 AND is_active = 1
            ",
        )
        .bind(client_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get active assignment: {e}")))?;

        row.map(|row| {
            let id: String = row.try_get("id")?;
            let plan_id: String = row.try_get("plan_id")?;
            let client_id: String = row.try_get("client_id")?;
            let start_date: String = row.try_get("start_date")?;
            let end_date: Option<String> = row.try_get("end_date")?;
            let is_active: bool = row.try_get("is_active")?;

            Ok(ClientPlanAssignment {
                id: parse_uuid(&id, "plan_assignments.id")?,
                plan_id: parse_uuid(&plan_id, "plan_assignments.plan_id")?,
                client_id: parse_uuid(&client_id, "plan_assignments.client_id")?,
                start_date: parse_date(&start_date, "plan_assignments.start_date")?,
                end_date: end_date
                    .map(|d| parse_date(&d, "plan_assignments.end_date"))
                    .transpose()?,
                is_active,
            })
        })
        .transpose()
    }

    /// Get a plan by id
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<Option<TrainingPlan>> {
        let row = sqlx::query(
            r"
            SELECT id, trainer_id, name, description, week_cycle, duration_weeks, created_at
            FROM training_plans
            WHERE id = $1
            ",
        )
        .bind(plan_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get plan: {e}")))?;

        row.map(|row| {
            let id: String = row.try_get("id")?;
            let trainer_id: String = row.try_get("trainer_id")?;
            let created_at: String = row.try_get("created_at")?;

            Ok(TrainingPlan {
                id: parse_uuid(&id, "training_plans.id")?,
                trainer_id: parse_uuid(&trainer_id, "training_plans.trainer_id")?,
                name: row.try_get("name")?,
                description: row.try_get("description")?,
                week_cycle: row.try_get("week_cycle")?,
                duration_weeks: row.try_get("duration_weeks")?,
                created_at: parse_timestamp(&created_at, "training_plans.created_at")?,
            })
        })
        .transpose()
    }

    /// List a plan's exercise templates, stable in creation order
    pub async fn list_plan_exercises(&self, plan_id: Uuid) -> AppResult<Vec<PlanExerciseTemplate>> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_id, exercise_name, day_of_week, sets, reps, weight,
                   duration_seconds, rest_seconds, notes, created_at
            FROM plan_exercises
            WHERE plan_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(plan_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list plan exercises: {e}")))?;

        rows.iter().map(row_to_template).collect()
    }

    /// Get one exercise template by id
    pub async fn get_plan_exercise(
        &self,
        plan_exercise_id: Uuid,
    ) -> AppResult<Option<PlanExerciseTemplate>> {
        let row = sqlx::query(
            r"
            SELECT id, plan_id, exercise_name, day_of_week, sets, reps, weight,
                   duration_seconds, rest_seconds, notes, created_at
            FROM plan_exercises
            WHERE id = $1
            ",
        )
        .bind(plan_exercise_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get plan exercise: {e}")))?;

        row.as_ref().map(row_to_template).transpose()
    }
}

fn row_to_template(row: &sqlx::sqlite::SqliteRow) -> AppResult<PlanExerciseTemplate> {
    let id: String = row.try_get("id")?;
    let plan_id: String = row.try_get("plan_id")?;
    let day_of_week: i64 = row.try_get("day_of_week")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(PlanExerciseTemplate {
        id: parse_uuid(&id, "plan_exercises.id")?,
        plan_id: parse_uuid(&plan_id, "plan_exercises.plan_id")?,
        exercise_name: row.try_get("exercise_name")?,
        day_of_week: day_of_week as u8,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        weight: row.try_get("weight")?,
        duration_seconds: row.try_get("duration_seconds")?,
        rest_seconds: row.try_get("rest_seconds")?,
        notes: row.try_get("notes")?,
        created_at: parse_timestamp(&created_at, "plan_exercises.created_at")?,
    })
}
