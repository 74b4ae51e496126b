pub mod health;
pub mod listing;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy (paths match what the deployed web client calls):
///
/// ```text
/// POST   /listings                   create listing
/// GET    /listings                   browse with filters
/// GET    /listings/{id}              single listing
/// PUT    /listings/{id}              owner update (incl. expiry extension)
/// DELETE /listings/{id}              owner delete
/// POST   /listings/{id}/claim        claim transaction
///
/// GET    /users/{userId}/listings    listings created by a user
/// GET    /users/{userId}/claims      claims made by a user (joined)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(listing::router()).merge(user::router())
}
