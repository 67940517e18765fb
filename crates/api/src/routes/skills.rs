//! Route definitions for the `/skills` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /                       list_skills
/// POST   /                       create_skill
/// GET    /categories             get_categories
/// GET    /{skill_id}             get_skill
/// DELETE /{skill_id}             delete_skill (admin only)
/// PUT    /{skill_id}/approve     approve_skill (admin only)
/// PUT    /{skill_id}/reject      reject_skill (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_skills).post(skills::create_skill))
        .route("/categories", get(skills::get_categories))
        .route(
            "/{skill_id}",
            get(skills::get_skill).delete(skills::delete_skill),
        )
        .route("/{skill_id}/approve", put(skills::approve_skill))
        .route("/{skill_id}/reject", put(skills::reject_skill))
}
