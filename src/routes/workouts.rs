// ABOUTME: Workout route handlers for schedule resolution, completion, and stats
// ABOUTME: Thin axum handlers; validation and storage live in the workout service
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout routes
//!
//! The HTTP surface the client application consumes. Every endpoint requires
//! the gateway-resolved client identity header; dates travel as `YYYY-MM-DD`
//! strings and are treated as opaque calendar-day keys.

use crate::auth::ClientIdentity;
use crate::errors::AppError;
use crate::server::ServerResources;
use crate::workouts::{
    CompleteAllSetsRequest, CompleteSetRequest, SaveNotesRequest, UncheckSetRequest,
    WorkoutService,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters carrying a calendar date
#[derive(Deserialize)]
struct DateQuery {
    date: NaiveDate,
}

/// Query parameters for the stats endpoints
///
/// `today` lets the caller pin its own calendar day; timezone handling is
/// the boundary's responsibility, so absent it the server's UTC date is used.
#[derive(Deserialize, Default)]
struct StatsQuery {
    #[serde(default)]
    today: Option<NaiveDate>,
}

impl StatsQuery {
    fn today_or_utc(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// Workout route handlers
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/workout-by-date", get(Self::handle_workout_by_date))
            .route("/workout-logs", get(Self::handle_list_logs))
            .route("/complete-set", post(Self::handle_complete_set))
            .route("/uncheck-set", delete(Self::handle_uncheck_set))
            .route(
                "/complete-exercise-all-sets",
                post(Self::handle_complete_all_sets),
            )
            .route("/save-exercise-notes", post(Self::handle_save_notes))
            .route("/weekly-stats", get(Self::handle_weekly_stats))
            .route("/workout-streak", get(Self::handle_streak))
            .with_state(resources)
    }

    /// Handle resolve day's workout
    async fn handle_workout_by_date(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let response = service.workout_by_date(client, params.date).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle list logs for a date
    async fn handle_list_logs(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let entries = service.logs_for_date(client, params.date).await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle complete one set
    ///
    /// 201 when this call created the entry, 200 when it already existed;
    /// both bodies carry the entry so retries see a stable result.
    async fn handle_complete_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CompleteSetRequest>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let response = service.complete_set(client, request).await?;
        let status = if response.created {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        Ok((status, Json(response)).into_response())
    }

    /// Handle uncheck one set; 204 whether or not an entry existed
    async fn handle_uncheck_set(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UncheckSetRequest>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        service.uncheck_set(client, request).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle complete all sets of an exercise
    async fn handle_complete_all_sets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CompleteAllSetsRequest>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let created = service.complete_all_sets(client, request).await?;
        Ok((StatusCode::OK, Json(created)).into_response())
    }

    /// Handle save exercise notes
    async fn handle_save_notes(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SaveNotesRequest>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let saved = service.save_notes(client, request).await?;
        Ok((StatusCode::OK, Json(saved)).into_response())
    }

    /// Handle weekly stats
    async fn handle_weekly_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<StatsQuery>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let stats = service.weekly_stats(client, params.today_or_utc()).await?;
        Ok((StatusCode::OK, Json(stats)).into_response())
    }

    /// Handle workout streak
    async fn handle_streak(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<StatsQuery>,
    ) -> Result<Response, AppError> {
        let client = ClientIdentity::from_headers(&headers)?;
        let service = WorkoutService::new(resources);
        let streak = service.streak(client, params.today_or_utc()).await?;
        Ok((StatusCode::OK, Json(streak)).into_response())
    }
}
