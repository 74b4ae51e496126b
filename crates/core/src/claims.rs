//! The claim transaction: move a listing from `available` to `claimed` on
//! behalf of a caller, and record a companion claim row.
//!
//! The two writes are an ordered pair, not a cross-row transaction. The
//! listing update lands first because it is the authoritative lock: once it
//! commits, every reader sees the listing as claimed even if the claim-row
//! insert later fails. The inverse order would leave an orphan claim row
//! pointing at a listing that still reads as available.

use std::sync::Arc;

use crate::claim::{Claim, ClaimStatus};
use crate::identity::Identity;
use crate::listing::{Listing, ListingStatus};
use crate::store::{MarketStore, StoreError};
use crate::types::new_entity_id;

/// Bounded attempts for the claim-row insert after the listing transition
/// has already committed.
const CLAIM_INSERT_ATTEMPTS: u32 = 3;

/// Rejection taxonomy for the claim transaction. Every variant carries a
/// user-presentable message; the API layer maps them onto HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// Malformed or missing required input. Retryable with corrected input.
    #[error("Listing ID is required")]
    InvalidRequest,

    /// No usable caller identity. The caller must authenticate and retry.
    #[error("User ID is required (must be authenticated)")]
    MissingIdentity,

    /// The referenced listing does not exist. Terminal for this request.
    #[error("Listing not found")]
    NotFound,

    /// The listing was claimed first by someone else. Terminal; the winner's
    /// id is carried so the caller can render "claimed by X".
    #[error("Listing has already been claimed")]
    AlreadyClaimed { claimed_by: String },

    /// The caller created the listing. Terminal.
    #[error("You cannot claim your own listing")]
    SelfClaimForbidden,

    /// The underlying store failed. Potentially retryable by the caller
    /// with backoff; never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful claim: the created claim record and the updated
/// listing snapshot.
#[derive(Debug, Clone)]
pub struct ClaimSuccess {
    pub claim: Claim,
    pub listing: Listing,
}

/// Executes claim transactions against an injected store.
#[derive(Clone)]
pub struct ClaimService {
    store: Arc<dyn MarketStore>,
}

impl ClaimService {
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Claim listing `listing_id` on behalf of `identity`.
    ///
    /// Preconditions are checked in order, each short-circuiting with its
    /// own rejection: non-empty id, listing exists, not already claimed,
    /// caller is not the creator. On success the listing is conditionally
    /// updated first, then the claim row is inserted with bounded retry.
    pub async fn claim(
        &self,
        listing_id: &str,
        identity: &Identity,
    ) -> Result<ClaimSuccess, ClaimError> {
        if listing_id.trim().is_empty() {
            return Err(ClaimError::InvalidRequest);
        }
        if identity.user_id.is_empty() {
            return Err(ClaimError::MissingIdentity);
        }

        let listing = self
            .store
            .get_listing(listing_id)
            .await?
            .ok_or(ClaimError::NotFound)?;

        if listing.status == ListingStatus::Claimed {
            if let Some(claimed_by) = listing.claimed_by {
                return Err(ClaimError::AlreadyClaimed { claimed_by });
            }
        }

        if listing.created_by == identity.user_id {
            return Err(ClaimError::SelfClaimForbidden);
        }

        let now = chrono::Utc::now();

        // The guarded mutation. A `None` here means another claim committed
        // between our read and this write; re-read to report the winner.
        let updated = self
            .store
            .claim_listing_if_available(listing_id, &identity.user_id, &identity.user_name, now)
            .await?;

        let updated = match updated {
            Some(listing) => listing,
            None => {
                let claimed_by = self
                    .store
                    .get_listing(listing_id)
                    .await?
                    .and_then(|l| l.claimed_by)
                    .unwrap_or_default();
                return Err(ClaimError::AlreadyClaimed { claimed_by });
            }
        };

        tracing::info!(
            listing_id,
            user_id = %identity.user_id,
            "listing transitioned to claimed"
        );

        let claim = Claim {
            id: new_entity_id(),
            listing_id: listing_id.to_string(),
            user_id: identity.user_id.clone(),
            user_name: identity.user_name.clone(),
            status: ClaimStatus::Pending,
            created_at: now,
        };

        // Saga tail: the listing transition stands even if this insert never
        // succeeds. A missing claim row is a recoverable inconsistency that
        // is reconciled out of band, so failures are logged, not returned.
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.store.insert_claim(&claim).await {
                Ok(()) => break,
                Err(err) if attempt < CLAIM_INSERT_ATTEMPTS => {
                    tracing::warn!(
                        listing_id,
                        claim_id = %claim.id,
                        attempt,
                        error = %err,
                        "claim record insert failed, retrying"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        listing_id,
                        claim_id = %claim.id,
                        attempts = attempt,
                        error = %err,
                        "claim record could not be persisted; listing transition stands, \
                         reconciliation required"
                    );
                    break;
                }
            }
        }

        Ok(ClaimSuccess {
            claim,
            listing: updated,
        })
    }
}
