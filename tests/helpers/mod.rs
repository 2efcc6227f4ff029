// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the axum request driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod axum_test;
