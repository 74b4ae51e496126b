//! Postgres-backed store.

use async_trait::async_trait;
use sqlx::PgPool;

use sharehub_core::claim::Claim;
use sharehub_core::listing::{Listing, ListingFilter, ListingUpdate};
use sharehub_core::store::{MarketStore, StoreError};
use sharehub_core::types::Timestamp;

use crate::repositories::{ClaimRepo, ListingRepo};

/// [`MarketStore`] backed by a Postgres connection pool.
///
/// Constructed once at startup and passed into the application state; no
/// process-global client exists.
#[derive(Clone)]
pub struct PgMarketStore {
    pool: PgPool,
}

impl PgMarketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl MarketStore for PgMarketStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(db_err)
    }

    async fn insert_listing(&self, listing: &Listing) -> Result<(), StoreError> {
        ListingRepo::insert(&self.pool, listing).await.map_err(db_err)
    }

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>, StoreError> {
        ListingRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_err)?
            .map(Listing::try_from)
            .transpose()
    }

    async fn get_listings_batch(&self, ids: &[String]) -> Result<Vec<Listing>, StoreError> {
        ListingRepo::find_by_ids(&self.pool, ids)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Listing::try_from)
            .collect()
    }

    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        ListingRepo::list(&self.pool, filter, chrono::Utc::now())
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Listing::try_from)
            .collect()
    }

    async fn listings_by_owner(&self, user_id: &str) -> Result<Vec<Listing>, StoreError> {
        ListingRepo::list_by_owner(&self.pool, user_id)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Listing::try_from)
            .collect()
    }

    async fn update_listing(
        &self,
        id: &str,
        update: &ListingUpdate,
    ) -> Result<Option<Listing>, StoreError> {
        ListingRepo::update(&self.pool, id, update)
            .await
            .map_err(db_err)?
            .map(Listing::try_from)
            .transpose()
    }

    async fn delete_listing(&self, id: &str) -> Result<bool, StoreError> {
        ListingRepo::delete(&self.pool, id).await.map_err(db_err)
    }

    async fn claim_listing_if_available(
        &self,
        id: &str,
        user_id: &str,
        user_name: &str,
        at: Timestamp,
    ) -> Result<Option<Listing>, StoreError> {
        ListingRepo::claim_if_available(&self.pool, id, user_id, user_name, at)
            .await
            .map_err(db_err)?
            .map(Listing::try_from)
            .transpose()
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<(), StoreError> {
        ClaimRepo::insert(&self.pool, claim).await.map_err(db_err)
    }

    async fn claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, StoreError> {
        ClaimRepo::list_by_user(&self.pool, user_id)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(Claim::try_from)
            .collect()
    }
}
