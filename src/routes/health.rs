// ABOUTME: Health check route for liveness probes and monitoring
// ABOUTME: Verifies the database connection is usable
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health check routes

use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Health check route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let db_ok = sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
            .is_ok();

        let status = if db_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (
            status,
            Json(json!({
                "status": if db_ok { "ok" } else { "degraded" },
                "database": db_ok,
                "version": env!("CARGO_PKG_VERSION"),
            })),
        )
            .into_response()
    }
}
