//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{claim, listing};
use crate::state::AppState;

/// Routes mounted at `/listings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(listing::list).post(listing::create))
        .route(
            "/listings/{id}",
            get(listing::get_by_id)
                .put(listing::update)
                .delete(listing::delete),
        )
        .route("/listings/{id}/claim", post(claim::claim_listing))
}
