//! Route definitions.
//!
//! Each submodule builds the router for one resource; [`api_routes`]
//! assembles the `/api/v1` tree.

pub mod admin;
pub mod auth;
pub mod feedback;
pub mod health;
pub mod skills;
pub mod swaps;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           register (public)
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
///
/// /users/me                                get, update own profile
/// /users/search                            member search
/// /users/{id}                              public profile (privacy-gated)
/// /users/{id}/skills/offered               offered set (privacy-gated)
/// /users/{id}/skills/wanted                wanted set (privacy-gated)
/// /users/{id}/feedback                     received feedback
/// /users/me/skills/offered/{skill_id}      add, remove (idempotent)
/// /users/me/skills/wanted/{skill_id}       add, remove (idempotent)
///
/// /skills                                  list, create
/// /skills/categories                       distinct categories
/// /skills/{id}                             get
/// /skills/{id}/approve                     approve (admin only)
/// /skills/{id}/reject                      reject (admin only)
/// /skills/{id}                             delete (admin only)
///
/// /swaps                                   list own, create
/// /swaps/{id}                              get (parties only), update, delete
///
/// /feedback                                submit
///
/// /admin/users                             list (admin only)
/// /admin/users/{id}/ban                    ban
/// /admin/users/{id}/unban                  unban
/// /admin/skills/pending                    moderation queue
/// /admin/swaps                             all swaps
/// /admin/stats                             platform counts
/// /admin/messages                          create, list
/// /admin/messages/{id}/toggle              flip active flag
/// /admin/reports/users                     per-user activity
/// /admin/reports/feedback                  rating rollup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/skills", skills::router())
        .nest("/swaps", swaps::router())
        .nest("/feedback", feedback::router())
        .nest("/admin", admin::router())
}
