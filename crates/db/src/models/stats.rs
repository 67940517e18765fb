//! Read-only admin reporting rollups.

use serde::Serialize;
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Platform-wide entity counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub users: UserCounts,
    pub skills: SkillCounts,
    pub swaps: SwapCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCounts {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillCounts {
    pub total: i64,
    pub approved: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapCounts {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
}

/// Raw single-row result backing [`PlatformStats`].
#[derive(Debug, FromRow)]
pub struct PlatformStatsRow {
    pub total_users: i64,
    pub active_users: i64,
    pub total_skills: i64,
    pub pending_skills: i64,
    pub total_swaps: i64,
    pub pending_swaps: i64,
    pub completed_swaps: i64,
}

impl From<PlatformStatsRow> for PlatformStats {
    fn from(row: PlatformStatsRow) -> Self {
        PlatformStats {
            users: UserCounts {
                total: row.total_users,
                active: row.active_users,
                inactive: row.total_users - row.active_users,
            },
            skills: SkillCounts {
                total: row.total_skills,
                approved: row.total_skills - row.pending_skills,
                pending: row.pending_skills,
            },
            swaps: SwapCounts {
                total: row.total_swaps,
                pending: row.pending_swaps,
                completed: row.completed_swaps,
            },
        }
    }
}

/// Per-user activity line for the admin report: how many swap requests the
/// user participates in on either side.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserActivityRow {
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub is_active: bool,
    pub total_requests: i64,
}
