// ABOUTME: Route module organization for trainlog HTTP endpoints
// ABOUTME: Route definitions and thin handlers that delegate to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route modules organized by domain. Each module contains only route
//! definitions and thin handler functions that delegate to service layers.

/// Health check and system status routes
pub mod health;

/// Workout scheduling, completion, and stats routes
pub mod workouts;

/// Health check route handlers
pub use health::HealthRoutes;
/// Workout route handlers
pub use workouts::WorkoutRoutes;
