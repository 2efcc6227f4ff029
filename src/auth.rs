// ABOUTME: Resolved client identity passed in by the platform gateway
// ABOUTME: This crate performs no session or role resolution of its own
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Client identity boundary
//!
//! Authentication, session handling, and role resolution happen upstream in
//! the platform gateway, which only forwards requests from callers already
//! resolved to the client role. The resolved client id arrives in the
//! `x-client-id` header; this module parses it and nothing more.

use crate::constants::headers;
use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;
use uuid::Uuid;

/// The authenticated client a request acts on behalf of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Gateway-resolved client id
    pub client_id: Uuid,
}

impl ClientIdentity {
    /// Extract the resolved identity from request headers
    ///
    /// # Errors
    ///
    /// `AuthRequired` when the header is absent, `AuthInvalid` when it is
    /// not a valid UUID.
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let raw = headers
            .get(headers::CLIENT_ID)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let client_id = Uuid::parse_str(raw)
            .map_err(|e| AppError::auth_invalid(format!("Malformed client id: {e}")))?;

        Ok(Self { client_id })
    }
}
