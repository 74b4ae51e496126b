use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use sharehub_core::claims::ClaimError;
use sharehub_core::error::CoreError;
use sharehub_core::store::StoreError;

use crate::auth::IdentityError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain taxonomy and implements [`IntoResponse`] to produce
/// consistent `{ "error", "code" }` JSON bodies. The `AlreadyClaimed`
/// rejection additionally carries the existing claimant's id so the client
/// can render "claimed by X".
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sharehub-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A claim transaction rejection.
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// An underlying store failure outside the claim path.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<IdentityError> for AppError {
    fn from(_: IdentityError) -> Self {
        AppError::Claim(ClaimError::MissingIdentity)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Claim(claim) => match claim {
                ClaimError::InvalidRequest => {
                    (StatusCode::BAD_REQUEST, "INVALID_REQUEST", claim.to_string())
                }
                ClaimError::MissingIdentity => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_IDENTITY",
                    claim.to_string(),
                ),
                ClaimError::NotFound => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", claim.to_string())
                }
                ClaimError::AlreadyClaimed { .. } => (
                    StatusCode::BAD_REQUEST,
                    "ALREADY_CLAIMED",
                    claim.to_string(),
                ),
                ClaimError::SelfClaimForbidden => (
                    StatusCode::BAD_REQUEST,
                    "SELF_CLAIM_FORBIDDEN",
                    claim.to_string(),
                ),
                ClaimError::Store(err) => store_failure(err),
            },

            AppError::Store(err) => store_failure(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let AppError::Claim(ClaimError::AlreadyClaimed { claimed_by }) = &self {
            body["claimedBy"] = json!(claimed_by);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Map a store failure to a sanitized 500. The raw error goes to the log,
/// never to the caller.
fn store_failure(err: &StoreError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORE_FAILURE",
        "An internal error occurred".to_string(),
    )
}
