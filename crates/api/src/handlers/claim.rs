//! Handler for `POST /listings/{id}/claim`. All business rules live in
//! [`sharehub_core::claims::ClaimService`]; this handler only resolves
//! identity and shapes the response.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use sharehub_core::claim::Claim;
use sharehub_core::claims::ClaimError;
use sharehub_core::listing::Listing;

use crate::auth::{authorization_header, FallbackIdentity};
use crate::error::AppResult;
use crate::state::AppState;

/// Optional body for the claim request. Only consulted for the identity
/// fallback; a missing or malformed body is not an error (legacy clients
/// send none).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Success payload: the created claim record and the updated listing view.
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub message: &'static str,
    pub claim: Claim,
    pub listing: Listing,
}

/// POST /listings/{id}/claim
pub async fn claim_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<ClaimResponse>> {
    // Parse the body leniently: absent or unparseable bodies carry no
    // fallback identity, nothing more.
    let request: ClaimRequest = if body.is_empty() {
        ClaimRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_default()
    };

    let fallback = FallbackIdentity {
        user_id: request.user_id,
        user_name: request.user_name,
    };
    let identity = state
        .resolver
        .resolve(authorization_header(&headers), Some(&fallback))
        .map_err(|_| ClaimError::MissingIdentity)?;

    let success = state.claims.claim(&id, &identity).await?;

    Ok(Json(ClaimResponse {
        message: "Listing claimed successfully",
        claim: success.claim,
        listing: success.listing,
    }))
}
