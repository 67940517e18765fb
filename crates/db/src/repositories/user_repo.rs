//! Repository for the `users` table and the offered/wanted skill sets.

use skillswap_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::skill::Skill;
use crate::models::user::{CreateUser, UpdateUser, User, UserSearchFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, full_name, location, bio, \
                        availability, profile_photo, is_public, is_active, is_admin, \
                        failed_login_count, locked_until, last_login_at, created_at, updated_at";

/// Skill columns qualified for joins against the skill-set tables.
const SKILL_COLUMNS: &str =
    "s.id, s.name, s.category, s.description, s.is_approved, s.created_at, s.updated_at";

/// Provides CRUD operations for users and their skill sets.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, full_name, location, bio, \
                                availability, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.location)
            .bind(&input.bio)
            .bind(&input.availability)
            .bind(input.is_public)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List users, optionally filtered by active status, newest first.
    pub async fn list(
        pool: &PgPool,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::boolean IS NULL OR is_active = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch a user's profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                location = COALESCE($3, location),
                bio = COALESCE($4, bio),
                availability = COALESCE($5, availability),
                profile_photo = COALESCE($6, profile_photo),
                is_public = COALESCE($7, is_public),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.location)
            .bind(&input.bio)
            .bind(&input.availability)
            .bind(&input.profile_photo)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Set the active flag (ban = false, unban = true).
    ///
    /// Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search public, active members, excluding the caller. Optional
    /// substring filters on location and offered skill name/category.
    pub async fn search(
        pool: &PgPool,
        filter: &UserSearchFilter,
        exclude_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users u
             WHERE u.is_public = TRUE
               AND u.is_active = TRUE
               AND u.id <> $1
               AND ($2::text IS NULL OR u.location ILIKE '%' || $2 || '%')
               AND ($3::text IS NULL OR EXISTS (
                        SELECT 1 FROM user_skills_offered uso
                        JOIN skills s ON s.id = uso.skill_id
                        WHERE uso.user_id = u.id AND s.name ILIKE '%' || $3 || '%'))
               AND ($4::text IS NULL OR EXISTS (
                        SELECT 1 FROM user_skills_offered uso
                        JOIN skills s ON s.id = uso.skill_id
                        WHERE uso.user_id = u.id AND s.category ILIKE '%' || $4 || '%'))
             ORDER BY u.created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(exclude_id)
            .bind(&filter.location)
            .bind(&filter.skill)
            .bind(&filter.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Offered / wanted skill sets
    // -----------------------------------------------------------------------

    /// Does the user's offered set contain the skill?
    pub async fn offers(pool: &PgPool, user_id: DbId, skill_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_skills_offered WHERE user_id = $1 AND skill_id = $2)",
        )
        .bind(user_id)
        .bind(skill_id)
        .fetch_one(pool)
        .await
    }

    /// Does the user's wanted set contain the skill?
    pub async fn wants(pool: &PgPool, user_id: DbId, skill_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_skills_wanted WHERE user_id = $1 AND skill_id = $2)",
        )
        .bind(user_id)
        .bind(skill_id)
        .fetch_one(pool)
        .await
    }

    /// Add a skill to the offered set. Adding an already-present skill is a
    /// no-op success.
    pub async fn add_offered(pool: &PgPool, user_id: DbId, skill_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_skills_offered (user_id, skill_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(skill_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a skill from the offered set. Removing an absent skill is a
    /// no-op success.
    pub async fn remove_offered(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_skills_offered WHERE user_id = $1 AND skill_id = $2")
            .bind(user_id)
            .bind(skill_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Add a skill to the wanted set (idempotent).
    pub async fn add_wanted(pool: &PgPool, user_id: DbId, skill_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_skills_wanted (user_id, skill_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(skill_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a skill from the wanted set (idempotent).
    pub async fn remove_wanted(
        pool: &PgPool,
        user_id: DbId,
        skill_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_skills_wanted WHERE user_id = $1 AND skill_id = $2")
            .bind(user_id)
            .bind(skill_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All skills in the user's offered set, alphabetical.
    pub async fn list_offered(pool: &PgPool, user_id: DbId) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {SKILL_COLUMNS} FROM skills s
             JOIN user_skills_offered uso ON uso.skill_id = s.id
             WHERE uso.user_id = $1
             ORDER BY s.name"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All skills in the user's wanted set, alphabetical.
    pub async fn list_wanted(pool: &PgPool, user_id: DbId) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {SKILL_COLUMNS} FROM skills s
             JOIN user_skills_wanted usw ON usw.skill_id = s.id
             WHERE usw.user_id = $1
             ORDER BY s.name"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Login bookkeeping
    // -----------------------------------------------------------------------

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a user account until the specified timestamp.
    pub async fn lock_account(pool: &PgPool, id: DbId, until: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
