//! Skill catalog entity and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full skill row. All fields are public-safe.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /skills`. Name/category are normalized by the
/// handler before insertion.
#[derive(Debug, Deserialize)]
pub struct SkillCreate {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// DTO for inserting a normalized skill.
#[derive(Debug)]
pub struct CreateSkill {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
}
