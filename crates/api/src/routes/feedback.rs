//! Route definitions for the `/feedback` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST / -> submit_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(feedback::submit_feedback))
}
