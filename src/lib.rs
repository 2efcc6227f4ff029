// ABOUTME: Main library entry point for the trainlog scheduling and tracking API
// ABOUTME: Exposes the schedule resolver, completion log store, aggregator, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Trainlog Server
//!
//! The scheduling and completion-tracking core of a trainer/client fitness
//! platform. Given a client's assigned training plan and a calendar date, it
//! answers which exercises and sets are due, records per-set completion as an
//! idempotent append/delete event log, and derives weekly totals and
//! consecutive-day streaks from that log.
//!
//! ## Architecture
//!
//! - **Schedule resolver** (`schedule`): pure mapping from
//!   `(plan, assignment, date)` to the exercises due that date
//! - **Completion log store** (`database::workout_logs`): one row per
//!   completed set, keyed `(plan_exercise_id, set_number, date)`; duplicate
//!   completions are absorbed, never overwritten
//! - **Aggregator** (`stats`): read-only weekly stats and streaks over the
//!   log plus the resolver
//! - **Routes** (`routes`): the HTTP surface consumed by the client app
//!
//! Authentication, plan authoring, messaging, and payments live in external
//! services; this crate receives the resolved client identity in a request
//! header and treats the plan definitions as read-only data.

/// Resolved client identity passed in by the platform gateway
pub mod auth;

/// Environment-based configuration management
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// `SQLite` storage for plans, completion logs, and notes
pub mod database;

/// Unified error handling with standard error codes and `HTTP` responses
pub mod errors;

/// Logging configuration and structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// `HTTP` routes organized by domain
pub mod routes;

/// Cyclical schedule resolution for training plans
pub mod schedule;

/// Server resource container and `HTTP` bootstrap
pub mod server;

/// Read-only completion statistics derived from the log
pub mod stats;

/// Workout service layer bridging routes and storage
pub mod workouts;
