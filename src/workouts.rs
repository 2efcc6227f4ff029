// ABOUTME: Workout service layer - resolves schedules, merges log state, and mutates the log
// ABOUTME: Routes delegate here; this is where validation and storage meet
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Workout Service
//!
//! Thin service layer between the HTTP routes and storage. Resolves the
//! day's schedule, merges completion-log entries into per-set status for the
//! client UI, applies the mutation operations, and derives stats.
//!
//! Validation lives here, at the API boundary: malformed dates never reach
//! this layer (serde rejects them), non-positive set counts and empty notes
//! are rejected before any storage round trip. Duplicate completions and
//! absent-key unchecks are deliberately not errors.

use crate::auth::ClientIdentity;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ClientPlanAssignment, CompletionStatus, PlanExerciseTemplate, SetMetrics, TrainingPlan,
    WorkoutLogEntry,
};
use crate::schedule::{self, ScheduleResolution};
use crate::server::ServerResources;
use crate::stats::{self, WeeklyStats};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// ================================================================================================
// Request/Response Models
// ================================================================================================

/// Response for the workout-by-date endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutByDateResponse {
    /// The day's workout with per-set status, or null on rest days and
    /// when no plan is active
    pub workout: Option<WorkoutView>,
    /// Details of the active plan, when one exists
    pub plan_details: Option<PlanDetails>,
    /// Friendly explanation for empty states
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Active plan summary for the client UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub plan_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub week_cycle: i64,
    pub duration_weeks: i64,
    pub start_date: NaiveDate,
}

/// One day's exercises with completion state merged in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutView {
    pub date: NaiveDate,
    pub day_of_week: u8,
    /// Display week within the plan's cycle (1-based)
    pub week: i64,
    pub exercises: Vec<ExerciseView>,
}

/// One exercise with its prescription and per-set status
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseView {
    pub plan_exercise_id: Uuid,
    pub exercise_name: String,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub rest_seconds: Option<i64>,
    /// Trainer's prescription notes from the template
    pub template_notes: Option<String>,
    /// Client's note for this exercise and date, if saved
    pub client_notes: Option<String>,
    pub total_sets: i64,
    pub completed_sets: i64,
    pub status: CompletionStatus,
    pub set_statuses: Vec<SetStatus>,
}

/// Completion state of one set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatus {
    pub set_number: i64,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<WorkoutLogEntry>,
}

/// Request body for complete-set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSetRequest {
    pub plan_exercise_id: Uuid,
    pub set_number: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub actual_reps: Option<i64>,
    #[serde(default)]
    pub actual_weight: Option<f64>,
    #[serde(default)]
    pub actual_duration_seconds: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for uncheck-set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UncheckSetRequest {
    pub plan_exercise_id: Uuid,
    pub set_number: i64,
    pub date: NaiveDate,
}

/// Request body for complete-exercise-all-sets
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAllSetsRequest {
    pub plan_exercise_id: Uuid,
    pub total_sets: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub actual_reps: Option<i64>,
    #[serde(default)]
    pub actual_weight: Option<f64>,
    #[serde(default)]
    pub actual_duration_seconds: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for save-exercise-notes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotesRequest {
    pub plan_exercise_id: Uuid,
    pub date: NaiveDate,
    pub notes: String,
}

/// Response for complete-set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSetResponse {
    pub entry: WorkoutLogEntry,
    /// True when this call created the entry; false when it already existed
    pub created: bool,
}

/// Response for save-exercise-notes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedNotesResponse {
    pub plan_exercise_id: Uuid,
    pub date: NaiveDate,
    pub notes: String,
}

/// Response for workout-streak
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub streak: i64,
}

// ================================================================================================
// Service
// ================================================================================================

/// Workout service handler
#[derive(Clone)]
pub struct WorkoutService {
    resources: Arc<ServerResources>,
}

impl WorkoutService {
    /// Create a new workout service
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// The client's active plan with its templates, if any
    async fn active_plan(
        &self,
        client: ClientIdentity,
    ) -> AppResult<Option<(TrainingPlan, ClientPlanAssignment, Vec<PlanExerciseTemplate>)>> {
        let db = &self.resources.database;
        let Some(assignment) = db.get_active_assignment(client.client_id).await? else {
            return Ok(None);
        };
        let plan = db
            .get_plan(assignment.plan_id)
            .await?
            .ok_or_else(|| AppError::not_found("Training plan"))?;
        let templates = db.list_plan_exercises(plan.id).await?;
        Ok(Some((plan, assignment, templates)))
    }

    /// Resolve the workout due on `date` and merge per-set completion state
    pub async fn workout_by_date(
        &self,
        client: ClientIdentity,
        date: NaiveDate,
    ) -> AppResult<WorkoutByDateResponse> {
        let Some((plan, assignment, templates)) = self.active_plan(client).await? else {
            return Ok(WorkoutByDateResponse {
                workout: None,
                plan_details: None,
                message: Some("No active training plan".into()),
            });
        };

        let plan_details = PlanDetails {
            plan_id: plan.id,
            name: plan.name.clone(),
            description: plan.description.clone(),
            week_cycle: plan.week_cycle,
            duration_weeks: plan.duration_weeks,
            start_date: assignment.start_date,
        };

        let ScheduleResolution::Resolved(day) =
            schedule::resolve_day(&plan, &assignment, &templates, date)
        else {
            return Ok(WorkoutByDateResponse {
                workout: None,
                plan_details: Some(plan_details),
                message: Some("No active training plan".into()),
            });
        };

        if day.rest_day {
            return Ok(WorkoutByDateResponse {
                workout: None,
                plan_details: Some(plan_details),
                message: Some("Nothing scheduled for this date".into()),
            });
        }

        let db = &self.resources.database;
        let entries = db.list_logs_for_date(client.client_id, date).await?;

        let mut exercises = Vec::with_capacity(day.exercises.len());
        for template in &day.exercises {
            let client_notes = db.get_exercise_notes(template.id, date).await?;
            exercises.push(exercise_view(template, &entries, date, client_notes));
        }

        Ok(WorkoutByDateResponse {
            workout: Some(WorkoutView {
                date: day.date,
                day_of_week: day.day_of_week,
                week: day.week,
                exercises,
            }),
            plan_details: Some(plan_details),
            message: None,
        })
    }

    /// Raw completion entries for the client on one date
    pub async fn logs_for_date(
        &self,
        client: ClientIdentity,
        date: NaiveDate,
    ) -> AppResult<Vec<WorkoutLogEntry>> {
        self.resources
            .database
            .list_logs_for_date(client.client_id, date)
            .await
    }

    /// Record completion of one set; idempotent
    pub async fn complete_set(
        &self,
        client: ClientIdentity,
        request: CompleteSetRequest,
    ) -> AppResult<CompleteSetResponse> {
        if request.set_number < 1 {
            return Err(AppError::out_of_range("setNumber must be >= 1"));
        }
        self.ensure_exercise_exists(request.plan_exercise_id).await?;

        let metrics = SetMetrics {
            actual_reps: request.actual_reps,
            actual_weight: request.actual_weight,
            actual_duration_seconds: request.actual_duration_seconds,
            notes: request.notes,
        };
        let (entry, created) = self
            .resources
            .database
            .complete_set(
                client.client_id,
                request.plan_exercise_id,
                request.set_number,
                request.date,
                &metrics,
            )
            .await?;

        Ok(CompleteSetResponse { entry, created })
    }

    /// Remove the completion for one set; absent entries are a no-op
    pub async fn uncheck_set(
        &self,
        _client: ClientIdentity,
        request: UncheckSetRequest,
    ) -> AppResult<()> {
        if request.set_number < 1 {
            return Err(AppError::out_of_range("setNumber must be >= 1"));
        }
        self.resources
            .database
            .uncheck_set(request.plan_exercise_id, request.set_number, request.date)
            .await?;
        Ok(())
    }

    /// Complete every outstanding set of an exercise
    pub async fn complete_all_sets(
        &self,
        client: ClientIdentity,
        request: CompleteAllSetsRequest,
    ) -> AppResult<Vec<WorkoutLogEntry>> {
        if request.total_sets < 1 {
            return Err(AppError::out_of_range("totalSets must be >= 1"));
        }
        self.ensure_exercise_exists(request.plan_exercise_id).await?;

        let metrics = SetMetrics {
            actual_reps: request.actual_reps,
            actual_weight: request.actual_weight,
            actual_duration_seconds: request.actual_duration_seconds,
            notes: request.notes,
        };
        self.resources
            .database
            .complete_exercise_all_sets(
                client.client_id,
                request.plan_exercise_id,
                request.total_sets,
                request.date,
                &metrics,
            )
            .await
    }

    /// Save the client's note for an exercise and date; last write wins
    pub async fn save_notes(
        &self,
        client: ClientIdentity,
        request: SaveNotesRequest,
    ) -> AppResult<SavedNotesResponse> {
        if request.notes.trim().is_empty() {
            return Err(AppError::invalid_input("notes must not be empty"));
        }
        self.ensure_exercise_exists(request.plan_exercise_id).await?;

        let note = self
            .resources
            .database
            .save_exercise_notes(
                client.client_id,
                request.plan_exercise_id,
                request.date,
                &request.notes,
            )
            .await?;

        Ok(SavedNotesResponse {
            plan_exercise_id: note.plan_exercise_id,
            date: note.date,
            notes: note.notes,
        })
    }

    /// Workout totals for the week window containing `today`
    pub async fn weekly_stats(
        &self,
        client: ClientIdentity,
        today: NaiveDate,
    ) -> AppResult<WeeklyStats> {
        let Some((_plan, _assignment, templates)) = self.active_plan(client).await? else {
            return Ok(WeeklyStats {
                total_workouts: 0,
                completed_workouts: 0,
            });
        };

        let (start, end) = schedule::week_window(today);
        let entries = self
            .resources
            .database
            .list_logs_between(client.client_id, start, end)
            .await?;

        Ok(stats::weekly_stats(&templates, &entries, today))
    }

    /// Consecutive-day completion streak ending at `today`
    pub async fn streak(
        &self,
        client: ClientIdentity,
        today: NaiveDate,
    ) -> AppResult<StreakResponse> {
        let Some((_plan, assignment, templates)) = self.active_plan(client).await? else {
            return Ok(StreakResponse { streak: 0 });
        };

        let from = assignment.start_date.min(today);
        let entries = self
            .resources
            .database
            .list_logs_between(client.client_id, from, today)
            .await?;

        Ok(StreakResponse {
            streak: stats::streak(&templates, &entries, today, assignment.start_date),
        })
    }

    async fn ensure_exercise_exists(&self, plan_exercise_id: Uuid) -> AppResult<()> {
        self.resources
            .database
            .get_plan_exercise(plan_exercise_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Plan exercise"))
    }
}

/// Merge one template with its log entries into the per-set view
fn exercise_view(
    template: &PlanExerciseTemplate,
    entries: &[WorkoutLogEntry],
    date: NaiveDate,
    client_notes: Option<String>,
) -> ExerciseView {
    let total_sets = template.total_sets();
    let completed_sets = stats::completed_set_count(entries, template.id, date);

    let set_statuses = (1..=total_sets)
        .map(|set_number| {
            let entry = entries
                .iter()
                .find(|e| {
                    e.plan_exercise_id == template.id
                        && e.date == date
                        && e.set_number == set_number
                })
                .cloned();
            SetStatus {
                set_number,
                completed: entry.is_some(),
                entry,
            }
        })
        .collect();

    ExerciseView {
        plan_exercise_id: template.id,
        exercise_name: template.exercise_name.clone(),
        sets: template.sets,
        reps: template.reps,
        weight: template.weight,
        duration_seconds: template.duration_seconds,
        rest_seconds: template.rest_seconds,
        template_notes: template.notes.clone(),
        client_notes,
        total_sets,
        completed_sets,
        status: stats::exercise_status(template, entries, date),
        set_statuses,
    }
}
