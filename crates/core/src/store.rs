//! The store contract.
//!
//! The claim transaction and the HTTP handlers are written against this
//! trait rather than a concrete client, so a deployment wires in the
//! Postgres implementation while tests run against the in-memory one.
//! No listing state is ever cached outside the store: any cache would
//! reintroduce the lost-update hazard the conditional write exists to close.

use async_trait::async_trait;

use crate::claim::Claim;
use crate::listing::{Listing, ListingFilter, ListingUpdate};
use crate::types::Timestamp;

/// An opaque backend failure. Surfaced to callers as a 500-equivalent;
/// never retried automatically by the domain layer (except the bounded
/// claim-insert saga, see [`crate::claims`]).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Keyed access to the listings and claims collections.
///
/// Ordering guarantees: every listing/claim listing method returns rows
/// newest-first by creation timestamp.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Cheap backend liveness probe.
    async fn health_check(&self) -> Result<(), StoreError>;

    // --- Listings ---

    async fn insert_listing(&self, listing: &Listing) -> Result<(), StoreError>;

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>, StoreError>;

    /// Fetch several listings by id in one round trip. Missing ids are
    /// silently absent from the result; order is unspecified.
    async fn get_listings_batch(&self, ids: &[String]) -> Result<Vec<Listing>, StoreError>;

    /// Browse listings with optional filters, newest first.
    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError>;

    /// All listings created by `user_id`, newest first.
    async fn listings_by_owner(&self, user_id: &str) -> Result<Vec<Listing>, StoreError>;

    /// Apply an owner-scoped partial update. Returns the updated listing,
    /// or `None` when the id does not exist.
    async fn update_listing(
        &self,
        id: &str,
        update: &ListingUpdate,
    ) -> Result<Option<Listing>, StoreError>;

    /// Returns `true` when a row was deleted.
    async fn delete_listing(&self, id: &str) -> Result<bool, StoreError>;

    /// The conditional write at the heart of the claim transaction: set
    /// `status='claimed'` plus the claimant fields, but only if the stored
    /// status is still `available`. Returns the updated row, or `None` when
    /// the precondition no longer holds (a concurrent claim won the race).
    async fn claim_listing_if_available(
        &self,
        id: &str,
        user_id: &str,
        user_name: &str,
        at: Timestamp,
    ) -> Result<Option<Listing>, StoreError>;

    // --- Claims ---

    async fn insert_claim(&self, claim: &Claim) -> Result<(), StoreError>;

    /// All claims made by `user_id`, newest first.
    async fn claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, StoreError>;
}
