//! Route definitions for the `/swaps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::swaps;
use crate::state::AppState;

/// Routes mounted at `/swaps`.
///
/// ```text
/// GET    /               list_swaps (?status=&direction=)
/// POST   /               create_swap
/// GET    /{request_id}   get_swap (parties only)
/// PUT    /{request_id}   update_swap
/// DELETE /{request_id}   delete_swap
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(swaps::list_swaps).post(swaps::create_swap))
        .route(
            "/{request_id}",
            get(swaps::get_swap)
                .put(swaps::update_swap)
                .delete(swaps::delete_swap),
        )
}
