//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me                               get_me
/// PUT    /me                               update_me
/// GET    /search                           search_users
/// GET    /{user_id}                        get_user
/// GET    /{user_id}/skills/offered         get_user_skills_offered
/// GET    /{user_id}/skills/wanted          get_user_skills_wanted
/// GET    /{user_id}/feedback               get_user_feedback
/// POST   /me/skills/offered/{skill_id}     add_skill_offered
/// DELETE /me/skills/offered/{skill_id}     remove_skill_offered
/// POST   /me/skills/wanted/{skill_id}      add_skill_wanted
/// DELETE /me/skills/wanted/{skill_id}      remove_skill_wanted
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_me).put(users::update_me))
        .route("/search", get(users::search_users))
        .route(
            "/me/skills/offered/{skill_id}",
            post(users::add_skill_offered).delete(users::remove_skill_offered),
        )
        .route(
            "/me/skills/wanted/{skill_id}",
            post(users::add_skill_wanted).delete(users::remove_skill_wanted),
        )
        .route("/{user_id}", get(users::get_user))
        .route(
            "/{user_id}/skills/offered",
            get(users::get_user_skills_offered),
        )
        .route(
            "/{user_id}/skills/wanted",
            get(users::get_user_skills_wanted),
        )
        .route("/{user_id}/feedback", get(users::get_user_feedback))
}
