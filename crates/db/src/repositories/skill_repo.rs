//! Repository for the `skills` table.

use skillswap_core::types::DbId;
use sqlx::PgPool;

use crate::models::skill::{CreateSkill, Skill};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, description, is_approved, created_at, updated_at";

/// Provides CRUD operations for the skill catalog.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a new (already-normalized) skill, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSkill) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (name, category, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a skill by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a skill by name, case-insensitive exact match.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE LOWER(name) = LOWER($1)");
        sqlx::query_as::<_, Skill>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List approved skills with optional category/name substring filters.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills
             WHERE is_approved = TRUE
               AND ($1::text IS NULL OR category ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY name
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(category)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Distinct non-null categories across approved skills, alphabetical.
    pub async fn categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT category FROM skills
             WHERE category IS NOT NULL AND is_approved = TRUE
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }

    /// Skills awaiting moderation, newest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills WHERE is_approved = FALSE ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// Set the approval flag. Returns `true` if the row was updated.
    pub async fn set_approved(pool: &PgPool, id: DbId, approved: bool) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE skills SET is_approved = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(approved)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a skill. Fails with a foreign-key violation if the skill
    /// is still referenced by any skill set or swap request.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
