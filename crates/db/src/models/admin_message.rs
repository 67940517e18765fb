//! Admin broadcast message entity and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full admin message row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminMessage {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /admin/messages`.
#[derive(Debug, Deserialize)]
pub struct AdminMessageCreate {
    pub title: String,
    pub content: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
