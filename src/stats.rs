// ABOUTME: Read-only completion statistics derived from the workout log and resolver
// ABOUTME: Per-exercise set counts, weekly totals, and consecutive-day streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Aggregator
//!
//! Derives per-exercise completion, weekly stats, and streaks from the
//! completion log plus the schedule resolver. Performs no writes; every
//! function here is pure over the supplied entries so the semantics are
//! testable without storage.

use crate::models::{CompletionStatus, PlanExerciseTemplate, WorkoutLogEntry};
use crate::schedule::{day_of_week, week_window};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Workout totals for the week window containing "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Distinct scheduled days in the current week window
    pub total_workouts: i64,
    /// Days among those with at least one fully completed exercise
    pub completed_workouts: i64,
}

/// Valid set numbers completed per `(date, plan_exercise_id)`
///
/// Distinct and filtered to `set_number >= 1`; duplicate or out-of-range
/// entries in the log never inflate counts.
fn completed_sets_by_key(entries: &[WorkoutLogEntry]) -> HashMap<(NaiveDate, Uuid), HashSet<i64>> {
    let mut by_key: HashMap<(NaiveDate, Uuid), HashSet<i64>> = HashMap::new();
    for entry in entries {
        if entry.set_number >= 1 {
            by_key
                .entry((entry.date, entry.plan_exercise_id))
                .or_default()
                .insert(entry.set_number);
        }
    }
    by_key
}

/// Count of distinct valid set numbers for one exercise on one date
#[must_use]
pub fn completed_set_count(entries: &[WorkoutLogEntry], plan_exercise_id: Uuid, date: NaiveDate) -> i64 {
    let distinct: HashSet<i64> = entries
        .iter()
        .filter(|e| e.plan_exercise_id == plan_exercise_id && e.date == date && e.set_number >= 1)
        .map(|e| e.set_number)
        .collect();
    distinct.len() as i64
}

/// Completion state of one exercise on one date
#[must_use]
pub fn exercise_status(
    template: &PlanExerciseTemplate,
    entries: &[WorkoutLogEntry],
    date: NaiveDate,
) -> CompletionStatus {
    let completed = completed_set_count(entries, template.id, date);
    CompletionStatus::from_counts(completed, template.total_sets())
}

/// Whether at least one scheduled exercise is fully completed on `date`
fn day_fully_completed(
    day_templates: &[&PlanExerciseTemplate],
    sets_by_key: &HashMap<(NaiveDate, Uuid), HashSet<i64>>,
    date: NaiveDate,
) -> bool {
    day_templates.iter().any(|t| {
        let completed = sets_by_key
            .get(&(date, t.id))
            .map_or(0, |sets| sets.len() as i64);
        completed >= t.total_sets()
    })
}

/// Weekly totals for the Sunday-aligned week containing `today`
///
/// `entries` must cover at least the week window; extra entries outside it
/// are ignored.
#[must_use]
pub fn weekly_stats(
    templates: &[PlanExerciseTemplate],
    entries: &[WorkoutLogEntry],
    today: NaiveDate,
) -> WeeklyStats {
    let (start, _end) = week_window(today);
    let sets_by_key = completed_sets_by_key(entries);

    let mut total = 0_i64;
    let mut completed = 0_i64;
    for offset in 0..7_u64 {
        let Some(date) = start.checked_add_days(Days::new(offset)) else {
            continue;
        };
        let dow = day_of_week(date);
        let day_templates: Vec<&PlanExerciseTemplate> =
            templates.iter().filter(|t| t.day_of_week == dow).collect();
        if day_templates.is_empty() {
            continue;
        }
        total += 1;
        if day_fully_completed(&day_templates, &sets_by_key, date) {
            completed += 1;
        }
    }

    WeeklyStats {
        total_workouts: total,
        completed_workouts: completed,
    }
}

/// Consecutive-day streak walking backward from `today`
///
/// A scheduled day with at least one fully completed exercise counts one; a
/// scheduled day with none stops the walk (today included, if not yet
/// completed); days with nothing scheduled are skipped and neither count nor
/// break. The walk is bounded below by the assignment `start_date`.
#[must_use]
pub fn streak(
    templates: &[PlanExerciseTemplate],
    entries: &[WorkoutLogEntry],
    today: NaiveDate,
    start_date: NaiveDate,
) -> i64 {
    let sets_by_key = completed_sets_by_key(entries);
    let mut count = 0_i64;
    let mut date = today;

    while date >= start_date {
        let dow = day_of_week(date);
        let day_templates: Vec<&PlanExerciseTemplate> =
            templates.iter().filter(|t| t.day_of_week == dow).collect();

        if !day_templates.is_empty() {
            if day_fully_completed(&day_templates, &sets_by_key, date) {
                count += 1;
            } else {
                break;
            }
        }

        let Some(prev) = date.checked_sub_days(Days::new(1)) else {
            break;
        };
        date = prev;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(dow: u8, sets: Option<i64>) -> PlanExerciseTemplate {
        PlanExerciseTemplate {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            exercise_name: "Deadlift".into(),
            day_of_week: dow,
            sets,
            reps: Some(5),
            weight: Some(120.0),
            duration_seconds: None,
            rest_seconds: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn entry(template: &PlanExerciseTemplate, set_number: i64, d: NaiveDate) -> WorkoutLogEntry {
        WorkoutLogEntry {
            id: Uuid::new_v4(),
            plan_exercise_id: template.id,
            client_id: Uuid::new_v4(),
            set_number,
            date: d,
            actual_reps: None,
            actual_weight: None,
            actual_duration_seconds: None,
            notes: None,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_completed_set_count_distinct_and_valid() {
        let t = template(1, Some(3));
        let monday = date(2025, 3, 10);
        let entries = vec![
            entry(&t, 1, monday),
            entry(&t, 2, monday),
            entry(&t, 2, monday), // duplicate set number
            entry(&t, 0, monday), // invalid set number
            entry(&t, 1, date(2025, 3, 17)), // other date
        ];
        assert_eq!(completed_set_count(&entries, t.id, monday), 2);
    }

    #[test]
    fn test_exercise_status_progression() {
        let t = template(1, Some(3));
        let monday = date(2025, 3, 10);
        let mut entries = vec![entry(&t, 1, monday), entry(&t, 2, monday)];

        assert_eq!(
            exercise_status(&t, &entries, monday),
            CompletionStatus::PartiallyCompleted
        );

        entries.push(entry(&t, 3, monday));
        assert_eq!(
            exercise_status(&t, &entries, monday),
            CompletionStatus::FullyCompleted
        );
    }

    #[test]
    fn test_weekly_stats_counts_scheduled_and_completed_days() {
        // Monday and Wednesday scheduled
        let mon = template(1, Some(3));
        let wed = template(3, Some(2));
        let templates = vec![mon.clone(), wed.clone()];

        // Week of Sunday 2025-03-09; today is Wednesday the 12th
        let monday = date(2025, 3, 10);
        let entries = vec![
            entry(&mon, 1, monday),
            entry(&mon, 2, monday),
            entry(&mon, 3, monday),
        ];

        let stats = weekly_stats(&templates, &entries, date(2025, 3, 12));
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.completed_workouts, 1);
    }

    #[test]
    fn test_weekly_stats_partial_day_not_counted() {
        let mon = template(1, Some(3));
        let templates = vec![mon.clone()];
        let monday = date(2025, 3, 10);

        // Two of three sets: day not yet in completed_workouts
        let mut entries = vec![entry(&mon, 1, monday), entry(&mon, 2, monday)];
        let stats = weekly_stats(&templates, &entries, monday);
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.completed_workouts, 0);

        entries.push(entry(&mon, 3, monday));
        let stats = weekly_stats(&templates, &entries, monday);
        assert_eq!(stats.completed_workouts, 1);
    }

    #[test]
    fn test_streak_zero_when_today_scheduled_and_incomplete() {
        let mon = template(1, Some(3));
        let templates = vec![mon.clone()];
        let monday = date(2025, 3, 10);
        let entries = vec![entry(&mon, 1, monday)]; // partial only

        assert_eq!(streak(&templates, &entries, monday, date(2025, 2, 1)), 0);
    }

    #[test]
    fn test_streak_skips_unscheduled_days() {
        // Scheduled Monday and Wednesday; today is Thursday (rest day)
        let mon = template(1, Some(1));
        let wed = template(3, Some(1));
        let templates = vec![mon.clone(), wed.clone()];

        let entries = vec![
            entry(&mon, 1, date(2025, 3, 10)),
            entry(&wed, 1, date(2025, 3, 12)),
        ];

        // Thursday 13th: unscheduled, skip; Wed and Mon both complete,
        // Tue/Sun skipped; the Wednesday 2025-03-05 before that is
        // scheduled but incomplete, so the walk stops at 2.
        assert_eq!(streak(&templates, &entries, date(2025, 3, 13), date(2025, 2, 1)), 2);
    }

    #[test]
    fn test_streak_resets_at_first_gap() {
        let daily = template(1, Some(1));
        let mut templates = vec![daily];
        // One template per weekday so every day is scheduled
        for dow in [0_u8, 2, 3, 4, 5, 6] {
            templates.push(template(dow, Some(1)));
        }

        let by_dow: HashMap<u8, &PlanExerciseTemplate> =
            templates.iter().map(|t| (t.day_of_week, t)).collect();

        // Completed today (Wed 12th) and yesterday, gap on Monday the 10th
        let entries = vec![
            entry(by_dow[&3], 1, date(2025, 3, 12)),
            entry(by_dow[&2], 1, date(2025, 3, 11)),
            entry(by_dow[&0], 1, date(2025, 3, 9)),
        ];

        assert_eq!(streak(&templates, &entries, date(2025, 3, 12), date(2025, 2, 1)), 2);
    }

    #[test]
    fn test_streak_bounded_by_start_date() {
        let sun = template(0, Some(1));
        let templates = vec![sun.clone()];
        let entries = vec![entry(&sun, 1, date(2025, 3, 9))];

        // Start date is the completed Sunday itself; nothing earlier counts
        assert_eq!(streak(&templates, &entries, date(2025, 3, 9), date(2025, 3, 9)), 1);
    }
}
