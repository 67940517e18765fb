//! Handlers for the `/swaps` resource -- the swap-request engine.
//!
//! Creation runs the full validation sequence (each failure terminal, no
//! partial effects); status updates are authorized by the state machine in
//! `skillswap_core::swap` under the configured transition policy.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillswap_core::error::CoreError;
use skillswap_core::swap::{
    authorize_delete, authorize_transition, role_of, Direction, SwapStatus, TransitionPolicy,
};
use skillswap_core::types::DbId;
use skillswap_db::models::swap_request::{
    CreateSwapRequest, SwapRequest, SwapRequestCreate, SwapRequestUpdate,
};
use skillswap_db::repositories::{SkillRepo, SwapRequestRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{ActiveUser, AuthUser};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Query parameters for `GET /swaps`.
#[derive(Debug, Deserialize)]
pub struct SwapListParams {
    /// Exact status match, e.g. `?status=pending`.
    pub status: Option<String>,
    /// `sent`, `received`, or `all` (default).
    #[serde(default)]
    pub direction: Direction,
}

/// GET /api/v1/swaps
///
/// List the caller's swap requests, newest first, filtered by direction and
/// an optional status.
pub async fn list_swaps(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SwapListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter(params.status.as_deref())?;

    let requests = SwapRequestRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.direction,
        status.map(SwapStatus::as_str),
    )
    .await?;

    Ok(Json(DataResponse { data: requests }))
}

/// POST /api/v1/swaps
///
/// Create a swap request. The requester is the authenticated caller.
///
/// Validation sequence, each failure terminal:
/// 1. requested user exists and is active
/// 2. not a self-swap
/// 3. both skills exist
/// 4. requester offers the offered skill
/// 5. requested party offers the wanted skill
/// 6. no duplicate pending tuple
pub async fn create_swap(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Json(input): Json<SwapRequestCreate>,
) -> AppResult<impl IntoResponse> {
    // 1. The requested user must exist and be active. An inactive (banned)
    //    account is reported as not found, not as forbidden.
    let requested = UserRepo::find_by_id(&state.pool, input.requested_id).await?;
    if !requested.map(|u| u.is_active).unwrap_or(false) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.requested_id,
        }));
    }

    // 2. No self-swaps.
    if input.requested_id == auth.user_id {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "Cannot request a swap with yourself".into(),
        )));
    }

    // 3. Both skills must exist.
    ensure_skill_exists(&state, input.skill_offered_id).await?;
    ensure_skill_exists(&state, input.skill_wanted_id).await?;

    // 4. The requester must actually offer the skill they propose to teach.
    if !UserRepo::offers(&state.pool, auth.user_id, input.skill_offered_id).await? {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "You don't offer the skill you're proposing to teach".into(),
        )));
    }

    // 5. The requested user must offer the skill the requester wants.
    if !UserRepo::offers(&state.pool, input.requested_id, input.skill_wanted_id).await? {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "The requested user doesn't offer the skill you want to learn".into(),
        )));
    }

    // 6. At most one pending request per tuple. This precheck produces the
    //    friendly message; losing a concurrent race surfaces as the same 409
    //    via the partial unique index.
    let duplicate = SwapRequestRepo::exists_pending_tuple(
        &state.pool,
        auth.user_id,
        input.requested_id,
        input.skill_offered_id,
        input.skill_wanted_id,
    )
    .await?;
    if duplicate {
        return Err(AppError::Core(CoreError::Conflict(
            "A pending request for this skill swap already exists".into(),
        )));
    }

    let create = CreateSwapRequest {
        requester_id: auth.user_id,
        requested_id: input.requested_id,
        skill_offered_id: input.skill_offered_id,
        skill_wanted_id: input.skill_wanted_id,
        message: input.message,
    };
    let request = SwapRequestRepo::create(&state.pool, &create).await?;

    tracing::info!(
        request_id = request.id,
        requester_id = auth.user_id,
        requested_id = request.requested_id,
        "Swap request created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/swaps/{request_id}
///
/// Fetch a single request. Only its two parties may view it.
pub async fn get_swap(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, request_id).await?;

    if role_of(request.requester_id, request.requested_id, auth.user_id).is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not authorized to view this swap request".into(),
        )));
    }

    Ok(Json(DataResponse { data: request }))
}

/// PUT /api/v1/swaps/{request_id}
///
/// Patch a request: status and/or message. Status transitions are authorized
/// by the state machine under the configured policy; message-only patches
/// require the caller to be a party.
pub async fn update_swap(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<SwapRequestUpdate>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, request_id).await?;
    let current = parse_stored_status(&request)?;
    let actor = role_of(request.requester_id, request.requested_id, auth.user_id);

    let target = match input.status.as_deref() {
        Some(raw) => {
            let target: SwapStatus = raw
                .parse()
                .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;
            let policy =
                TransitionPolicy::from_permissive_flag(state.config.permissive_transitions);
            authorize_transition(current, target, actor, policy)
                .map_err(|e| AppError::Core(e.into()))?;
            Some(target)
        }
        None => {
            if actor.is_none() {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Not authorized to update this request".into(),
                )));
            }
            None
        }
    };

    let updated = SwapRequestRepo::update(
        &state.pool,
        request_id,
        target.map(SwapStatus::as_str),
        input.message.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "SwapRequest",
        id: request_id,
    }))?;

    if let Some(target) = target {
        tracing::info!(
            request_id,
            user_id = auth.user_id,
            from = %current,
            to = %target,
            "Swap request status changed"
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/swaps/{request_id}
///
/// Delete a request: the requester only, and only while pending.
pub async fn delete_swap(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = find_request(&state, request_id).await?;
    let current = parse_stored_status(&request)?;
    let actor = role_of(request.requester_id, request.requested_id, auth.user_id);

    authorize_delete(current, actor).map_err(|e| AppError::Core(e.into()))?;

    SwapRequestRepo::delete(&state.pool, request_id).await?;

    tracing::info!(request_id, user_id = auth.user_id, "Swap request deleted");

    Ok(Json(MessageResponse {
        message: "Swap request deleted successfully".into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a request or fail NotFound.
async fn find_request(state: &AppState, request_id: DbId) -> AppResult<SwapRequest> {
    SwapRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SwapRequest",
            id: request_id,
        }))
}

/// Fail NotFound unless the skill exists.
async fn ensure_skill_exists(state: &AppState, skill_id: DbId) -> AppResult<()> {
    SkillRepo::find_by_id(&state.pool, skill_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }))?;
    Ok(())
}

/// Parse the stored status string. The CHECK constraint keeps stored values
/// valid, so a parse failure here is a data integrity error.
fn parse_stored_status(request: &SwapRequest) -> AppResult<SwapStatus> {
    request
        .status
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Internal(e)))
}

/// Parse and normalize an optional `?status=` filter.
pub(crate) fn parse_status_filter(raw: Option<&str>) -> AppResult<Option<SwapStatus>> {
    raw.map(|s| {
        s.parse()
            .map_err(|e: String| AppError::Core(CoreError::Validation(e)))
    })
    .transpose()
}
