//! Repository for the append-only `feedback` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback, RatingSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, swap_request_id, giver_id, receiver_id, rating, comment, created_at";

/// Provides insert and read operations for feedback. There is deliberately
/// no update or delete: feedback records are immutable.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a validated feedback record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (swap_request_id, giver_id, receiver_id, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.swap_request_id)
            .bind(input.giver_id)
            .bind(input.receiver_id)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Feedback received by a user, newest first.
    pub async fn list_for_receiver(
        pool: &PgPool,
        receiver_id: DbId,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback WHERE receiver_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(receiver_id)
            .fetch_all(pool)
            .await
    }

    /// Ledger-wide count/average/min/max. An empty ledger reports zeros.
    pub async fn summary(pool: &PgPool) -> Result<RatingSummary, sqlx::Error> {
        sqlx::query_as::<_, RatingSummary>(
            "SELECT COUNT(id) AS total_feedback,
                    COALESCE(AVG(rating)::float8, 0) AS average_rating,
                    COALESCE(MIN(rating), 0) AS min_rating,
                    COALESCE(MAX(rating), 0) AS max_rating
             FROM feedback",
        )
        .fetch_one(pool)
        .await
    }
}
