//! Swap request entity and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full swap request row.
///
/// `status` is stored in its lowercase string form; parse with
/// [`skillswap_core::swap::SwapStatus`] before running state-machine logic.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SwapRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub requested_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /swaps`. The requester is the authenticated
/// caller, never taken from the body.
#[derive(Debug, Deserialize)]
pub struct SwapRequestCreate {
    pub requested_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: Option<String>,
}

/// Request body for `PUT /swaps/{id}`. Both fields optional: only supplied
/// fields are applied (absent means "leave unchanged", the explicit patch
/// form of the dynamic partial update).
#[derive(Debug, Deserialize)]
pub struct SwapRequestUpdate {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// DTO for inserting a new request; the row starts `pending`.
#[derive(Debug)]
pub struct CreateSwapRequest {
    pub requester_id: DbId,
    pub requested_id: DbId,
    pub skill_offered_id: DbId,
    pub skill_wanted_id: DbId,
    pub message: Option<String>,
}
