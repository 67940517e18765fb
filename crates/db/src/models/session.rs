//! Refresh-token session entity and DTOs.

use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh-token session row. `refresh_token_hash` is the SHA-256 hex of
/// the opaque token handed to the client; the plaintext is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new session.
#[derive(Debug)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
