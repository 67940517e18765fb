//! Repository for the `admin_messages` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin_message::{AdminMessage, AdminMessageCreate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, is_active, created_at, updated_at";

/// Provides CRUD operations for admin broadcast messages.
pub struct AdminMessageRepo;

impl AdminMessageRepo {
    /// Insert a new broadcast message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &AdminMessageCreate,
    ) -> Result<AdminMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_messages (title, content, is_active)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminMessage>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// List messages, newest first, optionally filtered by active flag.
    pub async fn list(
        pool: &PgPool,
        is_active: Option<bool>,
    ) -> Result<Vec<AdminMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_messages
             WHERE ($1::boolean IS NULL OR is_active = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AdminMessage>(&query)
            .bind(is_active)
            .fetch_all(pool)
            .await
    }

    /// Flip the active flag. Returns `None` if no row with the id exists.
    pub async fn toggle(pool: &PgPool, id: DbId) -> Result<Option<AdminMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_messages SET is_active = NOT is_active, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
