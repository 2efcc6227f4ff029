// ABOUTME: Centralized resource container and HTTP server bootstrap
// ABOUTME: Shares the database and config across handlers and serves the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Server Resources and Bootstrap
//!
//! Centralized resource container for dependency injection. Route handlers
//! receive an `Arc<ServerResources>` instead of constructing their own
//! database handles.

use crate::config::ServerConfig;
use crate::database::Database;
use crate::routes::{HealthRoutes, WorkoutRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        Self {
            database: Arc::new(database),
            config,
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .nest("/api", WorkoutRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

/// Bind and serve until shutdown
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {port}"))?;
    info!("HTTP server listening on port {port}");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
