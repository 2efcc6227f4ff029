// ABOUTME: Server binary for the trainlog scheduling and tracking API
// ABOUTME: Loads environment configuration, connects storage, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Trainlog Server Binary
//!
//! Starts the scheduling/tracking HTTP API with environment-based
//! configuration and SQLite storage.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use trainlog_server::{config::ServerConfig, database::Database, logging, server};

#[derive(Parser)]
#[command(name = "trainlog-server")]
#[command(about = "Training plan scheduling and workout completion tracking API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }

    logging::init_from_env()?;
    info!("starting trainlog-server: {}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("database ready at {}", config.database_url);

    let resources = Arc::new(server::ServerResources::new(database, Arc::new(config)));
    server::serve(resources).await
}
