//! Route definitions for the `/admin` resource. Every handler here wraps
//! [`crate::middleware::rbac::RequireAdmin`].

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /users                       list_users
/// PUT  /users/{user_id}/ban         ban_user
/// PUT  /users/{user_id}/unban       unban_user
/// GET  /skills/pending              pending_skills
/// GET  /swaps                       list_swaps
/// GET  /stats                       platform_stats
/// GET  /messages                    list_messages
/// POST /messages                    create_message
/// PUT  /messages/{message_id}/toggle toggle_message
/// GET  /reports/users               user_activity_report
/// GET  /reports/feedback            feedback_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{user_id}/ban", put(admin::ban_user))
        .route("/users/{user_id}/unban", put(admin::unban_user))
        .route("/skills/pending", get(admin::pending_skills))
        .route("/swaps", get(admin::list_swaps))
        .route("/stats", get(admin::platform_stats))
        .route(
            "/messages",
            get(admin::list_messages).post(admin::create_message),
        )
        .route("/messages/{message_id}/toggle", put(admin::toggle_message))
        .route("/reports/users", get(admin::user_activity_report))
        .route("/reports/feedback", get(admin::feedback_report))
}
