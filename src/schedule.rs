// ABOUTME: Cyclical schedule resolution mapping (plan, assignment, date) to due exercises
// ABOUTME: Pure functions with no storage access; the resolver never writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Schedule Resolver
//!
//! Pure resolution of a client's assigned training plan against an arbitrary
//! calendar date. Templates carry no week index, so the same weekday always
//! yields the same template set regardless of elapsed weeks; `week_cycle`
//! feeds only the display week number. This is a known data-model gap in the
//! plan authoring side and is deliberately not papered over here.
//!
//! Day-of-week origin is 0 = Sunday, matching the convention templates are
//! authored in. The weekly stats window is the Sunday-aligned 7-day span.

use crate::models::{ClientPlanAssignment, PlanExerciseTemplate, TrainingPlan};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Outcome of resolving a date against a client's plan state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleResolution {
    /// The client has no active plan assignment; rendered as a friendly
    /// empty state, never as an error
    NoActivePlan,
    /// The plan resolved for the date (possibly a rest day)
    Resolved(DayWorkout),
}

/// The exercises due on one calendar date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWorkout {
    /// The resolved date
    pub date: NaiveDate,
    /// Day of week, 0 (Sunday) through 6 (Saturday)
    pub day_of_week: u8,
    /// Display week number within the plan's cycle (1-based)
    pub week: i64,
    /// True when no templates are scheduled for this weekday
    pub rest_day: bool,
    /// Templates due this date, stable in creation order
    pub exercises: Vec<PlanExerciseTemplate>,
}

/// Day of week for a date with the 0 = Sunday origin
#[must_use]
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Display week number for a date within the plan's cycle (1-based)
///
/// Dates before the assignment start clamp to week 1. Because templates have
/// no week index this value never influences which templates apply.
#[must_use]
pub fn display_week(start_date: NaiveDate, week_cycle: i64, date: NaiveDate) -> i64 {
    let cycle = week_cycle.max(1);
    let days_since = (date - start_date).num_days().max(0);
    (days_since / 7) % cycle + 1
}

/// Resolve the exercises due for `date`
///
/// Pure over the supplied data. An inactive assignment resolves to
/// [`ScheduleResolution::NoActivePlan`]; a weekday with no templates resolves
/// to a rest day. Dates outside the assignment window still resolve; callers
/// needing window enforcement apply it themselves.
#[must_use]
pub fn resolve_day(
    plan: &TrainingPlan,
    assignment: &ClientPlanAssignment,
    templates: &[PlanExerciseTemplate],
    date: NaiveDate,
) -> ScheduleResolution {
    if !assignment.is_active {
        return ScheduleResolution::NoActivePlan;
    }

    let dow = day_of_week(date);
    let mut exercises: Vec<PlanExerciseTemplate> = templates
        .iter()
        .filter(|t| t.plan_id == plan.id && t.day_of_week == dow)
        .cloned()
        .collect();
    exercises.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let rest_day = exercises.is_empty();
    ScheduleResolution::Resolved(DayWorkout {
        date,
        day_of_week: dow,
        week: display_week(assignment.start_date, plan.week_cycle, date),
        rest_day,
        exercises,
    })
}

/// The Sunday-aligned week window containing `today`, as (first, last) day
#[must_use]
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(day_of_week(today));
    // NaiveDate covers +/- ~262000 years; these adds cannot fail for real dates
    let start = today
        .checked_sub_days(Days::new(offset))
        .unwrap_or(today);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
    (start, end)
}
