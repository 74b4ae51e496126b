//! Handlers for the `/listings` resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use sharehub_core::error::CoreError;
use sharehub_core::listing::{
    Category, Listing, ListingFilter, ListingStatus, ListingUpdate, DEFAULT_EXPIRY_DAYS,
    DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use sharehub_core::types::{new_entity_id, Timestamp};

use crate::auth::{authorization_header, FallbackIdentity};
use crate::error::{AppError, AppResult};
use crate::response::ListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body for `POST /listings`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: String,
    pub category: Category,
    #[validate(length(min = 1, max = 120, message = "campus must be 1-120 characters"))]
    pub campus: String,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
    /// Self-asserted identity, honored only when the fallback shim is on.
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Body for `PUT /listings/{id}`. All fields optional; unset fields are
/// left untouched. Extending `expiresAt` is the owner's lever for keeping
/// a listing alive.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 2000, message = "description must be 1-2000 characters"))]
    pub description: Option<String>,
    pub category: Option<Category>,
    #[validate(length(min = 1, max = 120, message = "campus must be 1-120 characters"))]
    pub campus: Option<String>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Query parameters for `GET /listings`.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<Category>,
    pub campus: Option<String>,
    /// Matched against the effective status, so `expired` works.
    pub status: Option<ListingStatus>,
    pub search: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /listings
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateListingRequest>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let fallback = FallbackIdentity {
        user_id: input.user_id.clone(),
        user_name: input.user_name.clone(),
    };
    let identity = state
        .resolver
        .resolve(authorization_header(&headers), Some(&fallback))?;

    let now = Utc::now();
    let listing = Listing {
        id: new_entity_id(),
        title: input.title,
        description: input.description,
        category: input.category,
        campus: input.campus,
        image_url: input.image_url,
        created_by: identity.user_id,
        created_by_name: identity.user_name,
        created_at: now,
        expires_at: input
            .expires_at
            .unwrap_or_else(|| now + Duration::days(DEFAULT_EXPIRY_DAYS)),
        status: ListingStatus::Available,
        claimed_by: None,
        claimed_by_name: None,
        claimed_at: None,
    };

    state.store.insert_listing(&listing).await?;
    tracing::info!(listing_id = %listing.id, created_by = %listing.created_by, "listing created");

    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /listings
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> AppResult<Json<ListResponse<Listing>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let filter = ListingFilter {
        category: params.category,
        campus: params.campus,
        status: params.status,
        search: params.search,
        limit: Some(limit),
        offset: Some(offset),
    };

    let now = Utc::now();
    let items: Vec<Listing> = state
        .store
        .list_listings(&filter)
        .await?
        .into_iter()
        .map(|l| l.with_effective_status(now))
        .collect();

    Ok(Json(ListResponse::new(items)))
}

/// GET /listings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Listing>> {
    let listing = state
        .store
        .get_listing(&id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;

    Ok(Json(listing.with_effective_status(Utc::now())))
}

/// PUT /listings/{id}
///
/// Owner-only. The claim fields and creator fields are not updatable.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UpdateListingRequest>,
) -> AppResult<Json<Listing>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let fallback = FallbackIdentity {
        user_id: input.user_id.clone(),
        user_name: input.user_name.clone(),
    };
    let identity = state
        .resolver
        .resolve(authorization_header(&headers), Some(&fallback))?;

    let existing = state
        .store
        .get_listing(&id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Listing",
            id: id.clone(),
        })?;

    if existing.created_by != identity.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the listing owner can modify it".to_string(),
        )));
    }

    let update = ListingUpdate {
        title: input.title,
        description: input.description,
        category: input.category,
        campus: input.campus,
        image_url: input.image_url,
        expires_at: input.expires_at,
    };

    let updated = state
        .store
        .update_listing(&id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Listing",
            id,
        })?;

    Ok(Json(updated.with_effective_status(Utc::now())))
}

/// DELETE /listings/{id}
///
/// Owner-only.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let identity = state
        .resolver
        .resolve(authorization_header(&headers), None)?;

    let existing = state
        .store
        .get_listing(&id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "Listing",
            id: id.clone(),
        })?;

    if existing.created_by != identity.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the listing owner can delete it".to_string(),
        )));
    }

    let deleted = state.store.delete_listing(&id).await?;
    if deleted {
        tracing::info!(listing_id = %id, "listing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))
    }
}
