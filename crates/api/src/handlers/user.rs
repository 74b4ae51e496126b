//! Handlers for the `/users/{userId}` lookups: listings the user created
//! and claims the user made.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use sharehub_core::claim::ClaimWithListing;
use sharehub_core::listing::Listing;

use crate::error::AppResult;
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /users/{userId}/listings
pub async fn listings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ListResponse<Listing>>> {
    let now = Utc::now();
    let items: Vec<Listing> = state
        .store
        .listings_by_owner(&user_id)
        .await?
        .into_iter()
        .map(|l| l.with_effective_status(now))
        .collect();

    Ok(Json(ListResponse::new(items)))
}

/// GET /users/{userId}/claims
///
/// Each claim is enriched with its referenced listing via one deduplicated
/// batch fetch; listings that no longer exist surface as `null`.
pub async fn claims(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<ListResponse<ClaimWithListing>>> {
    let claims = state.store.claims_by_user(&user_id).await?;

    let mut listing_ids: Vec<String> = claims.iter().map(|c| c.listing_id.clone()).collect();
    listing_ids.sort();
    listing_ids.dedup();

    let now = Utc::now();
    let listings: HashMap<String, Listing> = state
        .store
        .get_listings_batch(&listing_ids)
        .await?
        .into_iter()
        .map(|l| (l.id.clone(), l.with_effective_status(now)))
        .collect();

    let items: Vec<ClaimWithListing> = claims
        .into_iter()
        .map(|claim| ClaimWithListing {
            listing: listings.get(&claim.listing_id).cloned(),
            claim,
        })
        .collect();

    Ok(Json(ListResponse::new(items)))
}
