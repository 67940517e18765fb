//! Repository for the `swap_requests` table.
//!
//! The duplicate-pending invariant is owned by the database: the partial
//! unique index `uq_swap_requests_pending_tuple` guarantees at most one
//! pending row per tuple even under concurrent inserts. The
//! [`SwapRequestRepo::exists_pending_tuple`] precheck exists only to give a
//! friendly error message in the common, non-racing case.

use skillswap_core::swap::Direction;
use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::swap_request::{CreateSwapRequest, SwapRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_id, requested_id, skill_offered_id, skill_wanted_id, \
                        message, status, created_at, updated_at";

/// Provides CRUD operations for swap requests.
pub struct SwapRequestRepo;

impl SwapRequestRepo {
    /// Insert a new request with status `pending`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSwapRequest) -> Result<SwapRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO swap_requests \
                (requester_id, requested_id, skill_offered_id, skill_wanted_id, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(input.requester_id)
            .bind(input.requested_id)
            .bind(input.skill_offered_id)
            .bind(input.skill_wanted_id)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swap_requests WHERE id = $1");
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Is there already a pending request with this exact tuple?
    pub async fn exists_pending_tuple(
        pool: &PgPool,
        requester_id: DbId,
        requested_id: DbId,
        skill_offered_id: DbId,
        skill_wanted_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM swap_requests
                WHERE requester_id = $1
                  AND requested_id = $2
                  AND skill_offered_id = $3
                  AND skill_wanted_id = $4
                  AND status = 'pending')",
        )
        .bind(requester_id)
        .bind(requested_id)
        .bind(skill_offered_id)
        .bind(skill_wanted_id)
        .fetch_one(pool)
        .await
    }

    /// List a user's requests, newest first, filtered by direction and an
    /// optional exact status match.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        direction: Direction,
        status: Option<&str>,
    ) -> Result<Vec<SwapRequest>, sqlx::Error> {
        let direction_clause = match direction {
            Direction::Sent => "requester_id = $1",
            Direction::Received => "requested_id = $1",
            Direction::All => "(requester_id = $1 OR requested_id = $1)",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM swap_requests
             WHERE {direction_clause}
               AND ($2::text IS NULL OR status = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List all requests (admin view), newest first, optional status filter.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SwapRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM swap_requests
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch a request: only supplied fields are applied, and `updated_at`
    /// is refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        message: Option<&str>,
    ) -> Result<Option<SwapRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE swap_requests SET
                status = COALESCE($2, status),
                message = COALESCE($3, message),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SwapRequest>(&query)
            .bind(id)
            .bind(status)
            .bind(message)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a request. Returns `true` if the row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM swap_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
