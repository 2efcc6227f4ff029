// ABOUTME: Configuration module organization
// ABOUTME: Environment-based runtime configuration for the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
