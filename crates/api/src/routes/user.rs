//! Route definitions for the `/users/{userId}` lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/{user_id}/listings", get(user::listings))
        .route("/users/{user_id}/claims", get(user::claims))
}
