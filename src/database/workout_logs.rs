// ABOUTME: Completion log store - idempotent per-set completion events plus exercise notes
// ABOUTME: INSERT OR IGNORE against the composite key makes duplicate requests harmless
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion log and notes stores
//!
//! One row per completed set, unique on `(plan_exercise_id, set_number,
//! date)`. Completion never overwrites an existing row; uncheck is the only
//! way to revise a set, and re-completion creates a fresh row. Duplicate and
//! absent-key operations are no-ops rather than errors so client retries are
//! always safe. The unique index serializes concurrent writers on the same
//! key at the storage level.

use super::{parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ExerciseNote, SetMetrics, WorkoutLogEntry};
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Record completion of one set; idempotent on the composite key
    ///
    /// Returns the entry for the key and whether this call created it. An
    /// existing entry is returned untouched; its actuals are never
    /// overwritten by a retry.
    pub async fn complete_set(
        &self,
        client_id: Uuid,
        plan_exercise_id: Uuid,
        set_number: i64,
        date: NaiveDate,
        metrics: &SetMetrics,
    ) -> AppResult<(WorkoutLogEntry, bool)> {
        let entry = WorkoutLogEntry {
            id: Uuid::new_v4(),
            plan_exercise_id,
            client_id,
            set_number,
            date,
            actual_reps: metrics.actual_reps,
            actual_weight: metrics.actual_weight,
            actual_duration_seconds: metrics.actual_duration_seconds,
            notes: metrics.notes.clone(),
            completed_at: Utc::now(),
        };

        let result = sqlx::query(
            r"
            INSERT OR IGNORE INTO workout_logs
                (id, plan_exercise_id, client_id, set_number, date,
                 actual_reps, actual_weight, actual_duration_seconds, notes, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.plan_exercise_id.to_string())
        .bind(entry.client_id.to_string())
        .bind(entry.set_number)
        .bind(entry.date.format("%Y-%m-%d").to_string())
        .bind(entry.actual_reps)
        .bind(entry.actual_weight)
        .bind(entry.actual_duration_seconds)
        .bind(&entry.notes)
        .bind(entry.completed_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to complete set: {e}")))?;

        if result.rows_affected() > 0 {
            return Ok((entry, true));
        }

        // Key already present; return the existing entry untouched
        let existing = self
            .get_log_entry(plan_exercise_id, set_number, date)
            .await?
            .ok_or_else(|| {
                AppError::database("Workout log entry missing after duplicate insert")
            })?;
        Ok((existing, false))
    }

    /// Delete the completion for the composite key; absent key is a no-op
    ///
    /// Returns whether an entry was removed.
    pub async fn uncheck_set(
        &self,
        plan_exercise_id: Uuid,
        set_number: i64,
        date: NaiveDate,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM workout_logs
            WHERE plan_exercise_id = $1 AND set_number = $2 AND date = $3
            ",
        )
        .bind(plan_exercise_id.to_string())
        .bind(set_number)
        .bind(date.format("%Y-%m-%d").to_string())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to uncheck set: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Complete every set of an exercise in `1..=total_sets`
    ///
    /// Each set is individually idempotent, so an interrupted run leaves a
    /// valid, resumable state: re-invoking completes only what is missing.
    /// Returns the entries newly created by this call.
    pub async fn complete_exercise_all_sets(
        &self,
        client_id: Uuid,
        plan_exercise_id: Uuid,
        total_sets: i64,
        date: NaiveDate,
        metrics: &SetMetrics,
    ) -> AppResult<Vec<WorkoutLogEntry>> {
        let mut created = Vec::new();
        for set_number in 1..=total_sets {
            let (entry, was_created) = self
                .complete_set(client_id, plan_exercise_id, set_number, date, metrics)
                .await?;
            if was_created {
                created.push(entry);
            }
        }
        Ok(created)
    }

    /// Get the completion entry for one composite key
    pub async fn get_log_entry(
        &self,
        plan_exercise_id: Uuid,
        set_number: i64,
        date: NaiveDate,
    ) -> AppResult<Option<WorkoutLogEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, plan_exercise_id, client_id, set_number, date,
                   actual_reps, actual_weight, actual_duration_seconds, notes, completed_at
            FROM workout_logs
            WHERE plan_exercise_id = $1 AND set_number = $2 AND date = $3
            ",
        )
        .bind(plan_exercise_id.to_string())
        .bind(set_number)
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get log entry: {e}")))?;

        row.as_ref().map(row_to_entry).transpose()
    }

    /// All completion entries for a client on one date
    pub async fn list_logs_for_date(
        &self,
        client_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<WorkoutLogEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_exercise_id, client_id, set_number, date,
                   actual_reps, actual_weight, actual_duration_seconds, notes, completed_at
            FROM workout_logs
            WHERE client_id = $1 AND date = $2
            ORDER BY completed_at, set_number
            ",
        )
        .bind(client_id.to_string())
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list logs: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// All completion entries for a client across an inclusive date range
    ///
    /// Feeds the aggregator; `YYYY-MM-DD` TEXT compares in date order.
    pub async fn list_logs_between(
        &self,
        client_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<WorkoutLogEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, plan_exercise_id, client_id, set_number, date,
                   actual_reps, actual_weight, actual_duration_seconds, notes, completed_at
            FROM workout_logs
            WHERE client_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date, set_number
            ",
        )
        .bind(client_id.to_string())
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to list logs: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Upsert the note for `(plan_exercise_id, date)`; last write wins
    pub async fn save_exercise_notes(
        &self,
        client_id: Uuid,
        plan_exercise_id: Uuid,
        date: NaiveDate,
        notes: &str,
    ) -> AppResult<ExerciseNote> {
        let note = ExerciseNote {
            plan_exercise_id,
            client_id,
            date,
            notes: notes.to_string(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO exercise_notes (plan_exercise_id, client_id, date, notes, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(plan_exercise_id, date) DO UPDATE SET
                notes = excluded.notes,
                client_id = excluded.client_id,
                updated_at = excluded.updated_at
            ",
        )
        .bind(note.plan_exercise_id.to_string())
        .bind(note.client_id.to_string())
        .bind(date.format("%Y-%m-%d").to_string())
        .bind(&note.notes)
        .bind(note.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to save notes: {e}")))?;

        Ok(note)
    }

    /// Get the note for `(plan_exercise_id, date)`, if any
    pub async fn get_exercise_notes(
        &self,
        plan_exercise_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<String>> {
        let row = sqlx::query(
            "SELECT notes FROM exercise_notes WHERE plan_exercise_id = $1 AND date = $2",
        )
        .bind(plan_exercise_id.to_string())
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::database(format!("Failed to get notes: {e}")))?;

        row.map(|row| row.try_get("notes").map_err(Into::into)).transpose()
    }
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutLogEntry> {
    let id: String = row.try_get("id")?;
    let plan_exercise_id: String = row.try_get("plan_exercise_id")?;
    let client_id: String = row.try_get("client_id")?;
    let date: String = row.try_get("date")?;
    let completed_at: String = row.try_get("completed_at")?;

    Ok(WorkoutLogEntry {
        id: parse_uuid(&id, "workout_logs.id")?,
        plan_exercise_id: parse_uuid(&plan_exercise_id, "workout_logs.plan_exercise_id")?,
        client_id: parse_uuid(&client_id, "workout_logs.client_id")?,
        set_number: row.try_get("set_number")?,
        date: parse_date(&date, "workout_logs.date")?,
        actual_reps: row.try_get("actual_reps")?,
        actual_weight: row.try_get("actual_weight")?,
        actual_duration_seconds: row.try_get("actual_duration_seconds")?,
        notes: row.try_get("notes")?,
        completed_at: parse_timestamp(&completed_at, "workout_logs.completed_at")?,
    })
}
