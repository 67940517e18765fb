//! Read-only reporting queries for the admin dashboard.

use sqlx::PgPool;

use crate::models::stats::{PlatformStats, PlatformStatsRow, UserActivityRow};

/// Provides aggregation queries. No mutation.
pub struct StatsRepo;

impl StatsRepo {
    /// Platform-wide counts of users, skills, and swaps.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        let row = sqlx::query_as::<_, PlatformStatsRow>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM users WHERE is_active = TRUE) AS active_users,
                (SELECT COUNT(*) FROM skills) AS total_skills,
                (SELECT COUNT(*) FROM skills WHERE is_approved = FALSE) AS pending_skills,
                (SELECT COUNT(*) FROM swap_requests) AS total_swaps,
                (SELECT COUNT(*) FROM swap_requests WHERE status = 'pending') AS pending_swaps,
                (SELECT COUNT(*) FROM swap_requests WHERE status = 'completed') AS completed_swaps",
        )
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }

    /// Per-user swap participation counts (either side of a request).
    pub async fn user_activity(pool: &PgPool) -> Result<Vec<UserActivityRow>, sqlx::Error> {
        sqlx::query_as::<_, UserActivityRow>(
            "SELECT u.id AS user_id, u.username, u.email, u.created_at, u.is_active,
                    COUNT(sr.id) AS total_requests
             FROM users u
             LEFT JOIN swap_requests sr
                    ON sr.requester_id = u.id OR sr.requested_id = u.id
             GROUP BY u.id, u.username, u.email, u.created_at, u.is_active
             ORDER BY u.id",
        )
        .fetch_all(pool)
        .await
    }
}
