//! Handlers for the `/users` resource: profiles, member search, and the
//! per-user offered/wanted skill sets.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::types::DbId;
use skillswap_db::models::user::{PublicUser, UpdateUser, User, UserResponse, UserSearchFilter};
use skillswap_db::repositories::{FeedbackRepo, SkillRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{ActiveUser, AuthUser};
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /users/search`.
#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    /// Substring match on offered skill names.
    pub skill: Option<String>,
    /// Substring match on the user's location.
    pub location: Option<String>,
    /// Substring match on offered skill categories.
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/users/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/users/me
///
/// Patch the caller's profile. Only supplied fields are applied.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// GET /api/v1/users/search
///
/// Search public, active members by offered skill, category, or location.
/// The caller is excluded from results.
pub async fn search_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserSearchParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let filter = UserSearchFilter {
        skill: params.skill,
        category: params.category,
        location: params.location,
    };

    let users = UserRepo::search(
        &state.pool,
        &filter,
        auth.user_id,
        pagination.clamp_limit(),
        pagination.clamp_offset(),
    )
    .await?;

    let data: Vec<PublicUser> = users.into_iter().map(PublicUser::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/{user_id}
///
/// Fetch a member's profile. Private profiles are visible to their owner only.
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, user_id).await?;
    ensure_profile_visible(&user, auth.user_id)?;

    Ok(Json(DataResponse {
        data: PublicUser::from(user),
    }))
}

/// GET /api/v1/users/{user_id}/skills/offered
pub async fn get_user_skills_offered(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, user_id).await?;
    ensure_profile_visible(&user, auth.user_id)?;

    let skills = UserRepo::list_offered(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/v1/users/{user_id}/skills/wanted
pub async fn get_user_skills_wanted(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, user_id).await?;
    ensure_profile_visible(&user, auth.user_id)?;

    let skills = UserRepo::list_wanted(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/v1/users/{user_id}/feedback
///
/// Feedback the user has received, newest first.
pub async fn get_user_feedback(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state, user_id).await?;

    let feedback = FeedbackRepo::list_for_receiver(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: feedback }))
}

/// POST /api/v1/users/me/skills/offered/{skill_id}
///
/// Add a skill to the caller's offered set. Idempotent.
pub async fn add_skill_offered(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;
    UserRepo::add_offered(&state.pool, auth.user_id, skill_id).await?;

    Ok(Json(MessageResponse {
        message: "Skill added successfully".into(),
    }))
}

/// DELETE /api/v1/users/me/skills/offered/{skill_id}
///
/// Remove a skill from the caller's offered set. Idempotent.
pub async fn remove_skill_offered(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;
    UserRepo::remove_offered(&state.pool, auth.user_id, skill_id).await?;

    Ok(Json(MessageResponse {
        message: "Skill removed successfully".into(),
    }))
}

/// POST /api/v1/users/me/skills/wanted/{skill_id}
///
/// Add a skill to the caller's wanted set. Idempotent.
pub async fn add_skill_wanted(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;
    UserRepo::add_wanted(&state.pool, auth.user_id, skill_id).await?;

    Ok(Json(MessageResponse {
        message: "Skill added successfully".into(),
    }))
}

/// DELETE /api/v1/users/me/skills/wanted/{skill_id}
///
/// Remove a skill from the caller's wanted set. Idempotent.
pub async fn remove_skill_wanted(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_skill_exists(&state, skill_id).await?;
    UserRepo::remove_wanted(&state.pool, auth.user_id, skill_id).await?;

    Ok(Json(MessageResponse {
        message: "Skill removed successfully".into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}

async fn ensure_skill_exists(state: &AppState, skill_id: DbId) -> AppResult<()> {
    SkillRepo::find_by_id(&state.pool, skill_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }))?;
    Ok(())
}

/// Private profiles are visible to their owner only.
fn ensure_profile_visible(user: &User, viewer_id: DbId) -> AppResult<()> {
    if !user.is_public && user.id != viewer_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "This profile is private".into(),
        )));
    }
    Ok(())
}
