// ABOUTME: Core data models for training plans, assignments, and completion tracking
// ABOUTME: Defines TrainingPlan, PlanExerciseTemplate, WorkoutLogEntry and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Core data structures shared by the schedule resolver, the completion log
//! store, and the HTTP surface.
//!
//! ## Design Principles
//!
//! - **Calendar-day keyed**: completion is tracked per opaque calendar date
//!   (`NaiveDate`), never per instant; timezone handling belongs to the API
//!   boundary
//! - **Event-log tracking**: one `WorkoutLogEntry` per completed set, unique
//!   on `(plan_exercise_id, set_number, date)`; entries are created and
//!   deleted, never updated in place
//! - **Serializable**: wire-visible models serialize in camelCase for the
//!   client application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A training program consisting of per-day-of-week exercise templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    /// Unique plan identifier
    pub id: Uuid,
    /// Trainer who authored the plan
    pub trainer_id: Uuid,
    /// Display name
    pub name: String,
    /// Optional long-form description
    pub description: Option<String>,
    /// Intended number of distinct weekly patterns (>= 1). Templates carry no
    /// week index, so this never affects which templates apply; it only feeds
    /// the display week number. See `schedule::display_week`.
    pub week_cycle: i64,
    /// Plan length in weeks; 0 means "until goal met"
    pub duration_weeks: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TrainingPlan {
    /// Create a new plan with a generated id
    #[must_use]
    pub fn new(trainer_id: Uuid, name: impl Into<String>, week_cycle: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            trainer_id,
            name: name.into(),
            description: None,
            week_cycle: week_cycle.max(1),
            duration_weeks: 0,
            created_at: Utc::now(),
        }
    }
}

/// The prescription for one exercise on one weekday
///
/// Templates repeat identically every calendar week; there is no week index
/// to pair with `TrainingPlan::week_cycle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExerciseTemplate {
    /// Unique template identifier
    pub id: Uuid,
    /// Owning plan
    pub plan_id: Uuid,
    /// Exercise display name
    pub exercise_name: String,
    /// Calendar day of week, 0 (Sunday) through 6 (Saturday)
    pub day_of_week: u8,
    /// Prescribed number of sets
    pub sets: Option<i64>,
    /// Prescribed repetitions per set
    pub reps: Option<i64>,
    /// Prescribed weight in kilograms
    pub weight: Option<f64>,
    /// Prescribed duration in seconds
    pub duration_seconds: Option<i64>,
    /// Prescribed rest between sets in seconds
    pub rest_seconds: Option<i64>,
    /// Freeform trainer notes
    pub notes: Option<String>,
    /// Creation timestamp; templates for a day are ordered by it
    pub created_at: DateTime<Utc>,
}

impl PlanExerciseTemplate {
    /// Number of sets that must be completed for the exercise to count as
    /// fully completed. A template without a set prescription counts as one.
    #[must_use]
    pub fn total_sets(&self) -> i64 {
        self.sets.filter(|s| *s >= 1).unwrap_or(1)
    }
}

/// Links one client to one plan with a start date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPlanAssignment {
    /// Unique assignment identifier
    pub id: Uuid,
    /// Assigned plan
    pub plan_id: Uuid,
    /// Client the plan is assigned to
    pub client_id: Uuid,
    /// First day of the program
    pub start_date: NaiveDate,
    /// Optional last day of the program
    pub end_date: Option<NaiveDate>,
    /// At most one assignment is active per client, enforced by the plan store
    pub is_active: bool,
}

/// A record that one specific set of one exercise was completed on one date
///
/// Composite identity `(plan_exercise_id, set_number, date)`. Created by a
/// complete-set call, destroyed by uncheck; a re-completion after uncheck
/// creates a fresh entry with a new `completed_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogEntry {
    /// Surrogate row id
    pub id: Uuid,
    /// Template the set belongs to
    pub plan_exercise_id: Uuid,
    /// Client who completed the set
    pub client_id: Uuid,
    /// 1-based set number within the exercise
    pub set_number: i64,
    /// Calendar date the set was completed for
    pub date: NaiveDate,
    /// Actual repetitions performed, overrides the prescription for display
    pub actual_reps: Option<i64>,
    /// Actual weight used in kilograms
    pub actual_weight: Option<f64>,
    /// Actual duration in seconds
    pub actual_duration_seconds: Option<i64>,
    /// Freeform notes captured with the set
    pub notes: Option<String>,
    /// When the completion was recorded
    pub completed_at: DateTime<Utc>,
}

/// Optional actuals captured when a set is completed
///
/// Overrides the template's prescription for display only; absent fields
/// leave the prescription in effect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMetrics {
    /// Actual repetitions performed
    pub actual_reps: Option<i64>,
    /// Actual weight used in kilograms
    pub actual_weight: Option<f64>,
    /// Actual duration in seconds
    pub actual_duration_seconds: Option<i64>,
    /// Freeform notes captured with the set
    pub notes: Option<String>,
}

/// Per-exercise-per-date note, independent of set completion
///
/// Unlike log entries, notes are mutable: repeated saves for the same key
/// overwrite rather than append.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseNote {
    /// Template the note is attached to
    pub plan_exercise_id: Uuid,
    /// Client who wrote the note
    pub client_id: Uuid,
    /// Calendar date the note is attached to
    pub date: NaiveDate,
    /// Note body
    pub notes: String,
    /// Last write timestamp
    pub updated_at: DateTime<Utc>,
}

/// Completion state of one `(plan_exercise_id, date)` pair across its sets
///
/// The only transitions are forward via complete-set and backward via
/// uncheck-set; there is no other path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionStatus {
    /// No valid set entries exist
    NotStarted,
    /// Between 1 and `total_sets - 1` valid entries
    PartiallyCompleted,
    /// At least `total_sets` valid entries
    FullyCompleted,
}

impl CompletionStatus {
    /// Derive the status from a completed-set count and the prescription
    #[must_use]
    pub fn from_counts(completed_sets: i64, total_sets: i64) -> Self {
        if completed_sets <= 0 {
            Self::NotStarted
        } else if completed_sets >= total_sets {
            Self::FullyCompleted
        } else {
            Self::PartiallyCompleted
        }
    }

    /// Whether the exercise counts toward workout-level stats
    #[must_use]
    pub fn is_fully_completed(self) -> bool {
        matches!(self, Self::FullyCompleted)
    }
}
