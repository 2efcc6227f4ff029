// ABOUTME: Application constants and environment variable names organized by domain
// ABOUTME: Single source of truth for defaults shared by config, bins, and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants organized by domain

/// Environment variable names
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Log level (error, warn, info, debug, trace)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/trainlog.db";
}

/// Service identification
pub mod service_names {
    /// Service name used in structured logs
    pub const TRAINLOG_SERVER: &str = "trainlog-server";
}

/// Request headers set by the platform gateway
pub mod headers {
    /// Carries the gateway-resolved client identity after session and role
    /// resolution; requests without it are rejected as unauthenticated
    pub const CLIENT_ID: &str = "x-client-id";
}
