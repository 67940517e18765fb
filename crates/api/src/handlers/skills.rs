//! Handlers for the `/skills` resource: catalog browsing, member-submitted
//! creation, and admin moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::skill::normalize_name;
use skillswap_core::types::DbId;
use skillswap_db::models::skill::{CreateSkill, SkillCreate};
use skillswap_db::repositories::SkillRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{ActiveUser, AuthUser};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /skills`.
#[derive(Debug, Deserialize)]
pub struct SkillListParams {
    /// Substring match on category.
    pub category: Option<String>,
    /// Substring match on skill name.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/skills
///
/// List approved skills with optional category/name filters.
pub async fn list_skills(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SkillListParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let skills = SkillRepo::list(
        &state.pool,
        params.category.as_deref(),
        params.search.as_deref(),
        pagination.clamp_limit(),
        pagination.clamp_offset(),
    )
    .await?;

    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/v1/skills/categories
///
/// Distinct categories across approved skills.
pub async fn get_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = SkillRepo::categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/skills
///
/// Create a skill. Names are normalized (trimmed, title-cased) and unique
/// case-insensitively. If the normalized name already exists and is
/// approved, the existing skill is returned (idempotent create); if it
/// exists but is pending approval, the call fails with Conflict.
pub async fn create_skill(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Json(input): Json<SkillCreate>,
) -> AppResult<impl IntoResponse> {
    let name = normalize_name(&input.name);
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Skill name must not be empty".into(),
        )));
    }

    if let Some(existing) = SkillRepo::find_by_name(&state.pool, &name).await? {
        if existing.is_approved {
            return Ok((StatusCode::OK, Json(DataResponse { data: existing })));
        }
        return Err(AppError::Core(CoreError::Conflict(
            "Skill exists but is pending approval".into(),
        )));
    }

    let create = CreateSkill {
        name,
        category: input
            .category
            .as_deref()
            .map(normalize_name)
            .filter(|c| !c.is_empty()),
        description: input.description,
    };
    // uq_skills_name_ci backstops a concurrent create of the same name.
    let skill = SkillRepo::create(&state.pool, &create).await?;

    tracing::info!(skill_id = skill.id, name = %skill.name, user_id = auth.user_id, "Skill created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: skill })))
}

/// GET /api/v1/skills/{skill_id}
pub async fn get_skill(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let skill = SkillRepo::find_by_id(&state.pool, skill_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }))?;

    Ok(Json(DataResponse { data: skill }))
}

/// PUT /api/v1/skills/{skill_id}/approve -- admin only.
pub async fn approve_skill(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_approval(&state, skill_id, true, admin.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Skill approved successfully".into(),
    }))
}

/// PUT /api/v1/skills/{skill_id}/reject -- admin only.
pub async fn reject_skill(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_approval(&state, skill_id, false, admin.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Skill rejected successfully".into(),
    }))
}

/// DELETE /api/v1/skills/{skill_id} -- admin only.
///
/// Hard delete. Fails with Conflict while the skill is referenced by any
/// skill set or swap request; retire such skills via reject instead.
pub async fn delete_skill(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SkillRepo::delete(&state.pool, skill_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }));
    }

    tracing::info!(skill_id, admin_id = admin.user_id, "Skill deleted");

    Ok(Json(MessageResponse {
        message: "Skill deleted successfully".into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn set_approval(
    state: &AppState,
    skill_id: DbId,
    approved: bool,
    admin_id: DbId,
) -> AppResult<()> {
    let updated = SkillRepo::set_approved(&state.pool, skill_id, approved).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }));
    }
    tracing::info!(skill_id, admin_id, approved, "Skill moderation applied");
    Ok(())
}
