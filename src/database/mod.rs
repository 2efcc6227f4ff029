// ABOUTME: SQLite storage for plans, assignments, completion logs, and notes
// ABOUTME: Owns the connection pool and the schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! SQLite-backed storage. The completion log and notes stores are the only
//! mutable state this service owns; plan definitions are written only by the
//! provisioning helpers the seeder and tests use, and are read-only to the
//! scheduling/tracking core itself.
//!
//! Idempotency of set completion is enforced at this layer: `workout_logs`
//! carries a unique index on `(plan_exercise_id, set_number, date)` and
//! completion inserts with `INSERT OR IGNORE`, so concurrent duplicate
//! requests commit exactly one row.

mod plans;
mod workout_logs;

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for plan and completion-log storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    pub async fn new(database_url: &str) -> AppResult<Self> {
        if database_url.trim().is_empty() {
            return Err(AppError::config("database URL must not be empty"));
        }

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_plans (
                id TEXT PRIMARY KEY,
                trainer_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                week_cycle INTEGER NOT NULL DEFAULT 1 CHECK (week_cycle >= 1),
                duration_weeks INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS plan_exercises (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL,
                exercise_name TEXT NOT NULL,
                day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
                sets INTEGER,
                reps INTEGER,
                weight REAL,
                duration_seconds INTEGER,
                rest_seconds INTEGER,
                notes TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (plan_id) REFERENCES training_plans (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_plan_exercises_plan_day
             ON plan_exercises(plan_id, day_of_week)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS plan_assignments (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL,
                client_id TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                FOREIGN KEY (plan_id) REFERENCES training_plans (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // The plan store guarantees at most one active assignment per client
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_assignments_active_client
             ON plan_assignments(client_id) WHERE is_active = 1",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_logs (
                id TEXT PRIMARY KEY,
                plan_exercise_id TEXT NOT NULL,
                client_id TEXT NOT NULL,
                set_number INTEGER NOT NULL CHECK (set_number >= 1),
                date TEXT NOT NULL,
                actual_reps INTEGER,
                actual_weight REAL,
                actual_duration_seconds INTEGER,
                notes TEXT,
                completed_at TEXT NOT NULL,
                FOREIGN KEY (plan_exercise_id) REFERENCES plan_exercises (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Composite identity of a completion event; duplicate completions
        // are absorbed by INSERT OR IGNORE against this index
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_workout_logs_key
             ON workout_logs(plan_exercise_id, set_number, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_logs_client_date
             ON workout_logs(client_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_notes (
                plan_exercise_id TEXT NOT NULL,
                client_id TEXT NOT NULL,
                date TEXT NOT NULL,
                notes TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (plan_exercise_id, date),
                FOREIGN KEY (plan_exercise_id) REFERENCES plan_exercises (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Parse a TEXT column holding a UUID
pub(crate) fn parse_uuid(value: &str, column: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Invalid UUID in {column}: {e}")))
}

/// Parse a TEXT column holding a `YYYY-MM-DD` calendar date
pub(crate) fn parse_date(value: &str, column: &str) -> AppResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::database(format!("Invalid date in {column}: {e}")))
}

/// Parse a TEXT column holding an RFC 3339 timestamp
pub(crate) fn parse_timestamp(value: &str, column: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in {column}: {e}")))
}
