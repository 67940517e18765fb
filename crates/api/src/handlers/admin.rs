//! Handlers for the `/admin` resource: user moderation, the pending-skill
//! queue, platform-wide swap listings, broadcast messages, and read-only
//! reports. Every route requires the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::types::DbId;
use skillswap_db::models::admin_message::AdminMessageCreate;
use skillswap_db::models::user::{User, UserResponse};
use skillswap_db::repositories::{
    AdminMessageRepo, FeedbackRepo, SkillRepo, StatsRepo, SwapRequestRepo, UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::swaps::parse_status_filter;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct AdminUserListParams {
    pub is_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /admin/swaps`.
#[derive(Debug, Deserialize)]
pub struct AdminSwapListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /admin/messages`.
#[derive(Debug, Deserialize)]
pub struct AdminMessageListParams {
    pub is_active: Option<bool>,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AdminUserListParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let users = UserRepo::list(
        &state.pool,
        params.is_active,
        pagination.clamp_limit(),
        pagination.clamp_offset(),
    )
    .await?;

    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/users/{user_id}/ban
///
/// Deactivate a member account. Admin accounts cannot be banned.
pub async fn ban_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, user_id).await?;

    if user.is_admin {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "Cannot ban an admin user".into(),
        )));
    }

    UserRepo::set_active(&state.pool, user_id, false).await?;

    tracing::info!(user_id, admin_id = admin.user_id, "User banned");

    Ok(Json(MessageResponse {
        message: format!("User {} has been banned", user.username),
    }))
}

/// PUT /api/v1/admin/users/{user_id}/unban
pub async fn unban_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state, user_id).await?;

    UserRepo::set_active(&state.pool, user_id, true).await?;

    tracing::info!(user_id, admin_id = admin.user_id, "User unbanned");

    Ok(Json(MessageResponse {
        message: format!("User {} has been unbanned", user.username),
    }))
}

/// GET /api/v1/admin/skills/pending
///
/// Skills awaiting moderation.
pub async fn pending_skills(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/v1/admin/swaps
///
/// All swap requests, newest first, optional status filter.
pub async fn list_swaps(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AdminSwapListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter(params.status.as_deref())?;
    let pagination = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };

    let swaps = SwapRequestRepo::list_all(
        &state.pool,
        status.map(skillswap_core::swap::SwapStatus::as_str),
        pagination.clamp_limit(),
        pagination.clamp_offset(),
    )
    .await?;

    Ok(Json(DataResponse { data: swaps }))
}

/// GET /api/v1/admin/stats
///
/// Platform-wide counts of users, skills, and swaps.
pub async fn platform_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::platform_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/admin/messages
pub async fn create_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AdminMessageCreate>,
) -> AppResult<impl IntoResponse> {
    let message = AdminMessageRepo::create(&state.pool, &input).await?;

    tracing::info!(message_id = message.id, admin_id = admin.user_id, "Admin message created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/admin/messages
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AdminMessageListParams>,
) -> AppResult<impl IntoResponse> {
    let messages = AdminMessageRepo::list(&state.pool, params.is_active).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// PUT /api/v1/admin/messages/{message_id}/toggle
pub async fn toggle_message(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = AdminMessageRepo::toggle(&state.pool, message_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AdminMessage",
            id: message_id,
        }))?;

    let verb = if message.is_active {
        "activated"
    } else {
        "deactivated"
    };
    Ok(Json(MessageResponse {
        message: format!("Message {verb} successfully"),
    }))
}

/// GET /api/v1/admin/reports/users
///
/// Per-user swap participation counts.
pub async fn user_activity_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = StatsRepo::user_activity(&state.pool).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/admin/reports/feedback
///
/// Ledger-wide rating count/average/min/max; zeros when empty.
pub async fn feedback_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let summary = FeedbackRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
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
