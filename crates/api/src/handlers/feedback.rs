//! Handlers for the `/feedback` resource.
//!
//! Feedback is append-only: a party to a swap request rates the other party.
//! The giver is always the authenticated caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use skillswap_core::error::CoreError;
use skillswap_core::feedback::{validate_parties, validate_rating};
use skillswap_db::models::feedback::{CreateFeedback, FeedbackCreate};
use skillswap_db::repositories::{FeedbackRepo, SwapRequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ActiveUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/feedback
///
/// Submit feedback for a swap request. The giver and receiver must be the
/// request's two distinct parties and the rating an integer 1-5.
pub async fn submit_feedback(
    ActiveUser(auth): ActiveUser,
    State(state): State<AppState>,
    Json(input): Json<FeedbackCreate>,
) -> AppResult<impl IntoResponse> {
    let request = SwapRequestRepo::find_by_id(&state.pool, input.swap_request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SwapRequest",
            id: input.swap_request_id,
        }))?;

    validate_rating(input.rating).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    validate_parties(
        request.requester_id,
        request.requested_id,
        auth.user_id,
        input.receiver_id,
    )
    .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let create = CreateFeedback {
        swap_request_id: input.swap_request_id,
        giver_id: auth.user_id,
        receiver_id: input.receiver_id,
        rating: input.rating,
        comment: input.comment,
    };
    let feedback = FeedbackRepo::create(&state.pool, &create).await?;

    tracing::info!(
        feedback_id = feedback.id,
        swap_request_id = feedback.swap_request_id,
        giver_id = feedback.giver_id,
        receiver_id = feedback.receiver_id,
        rating = feedback.rating,
        "Feedback submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}
