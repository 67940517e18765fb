//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions; operations whose contract is a human-readable confirmation
//! use `{ "message": ... }`. Use these instead of ad-hoc
//! `serde_json::json!` to get compile-time type safety and consistent
//! serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "message": ... }` confirmation envelope for operations that
/// return no entity (deletes, bans, skill moderation).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
