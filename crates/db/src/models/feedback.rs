//! Feedback entity and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full feedback row. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub swap_request_id: DbId,
    pub giver_id: DbId,
    pub receiver_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for `POST /feedback`. The giver is the authenticated caller.
#[derive(Debug, Deserialize)]
pub struct FeedbackCreate {
    pub swap_request_id: DbId,
    pub receiver_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// DTO for inserting validated feedback.
#[derive(Debug)]
pub struct CreateFeedback {
    pub swap_request_id: DbId,
    pub giver_id: DbId,
    pub receiver_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Ledger-wide rating rollup. An empty ledger reports zeros, never NULL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingSummary {
    pub total_feedback: i64,
    pub average_rating: f64,
    pub min_rating: i32,
    pub max_rating: i32,
}
