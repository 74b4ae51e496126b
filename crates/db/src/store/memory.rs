//! In-memory store.
//!
//! Backs integration tests and local development with the same contract the
//! Postgres store implements, including the conditional claim write. The
//! lock is held only across synchronous map access, never across an await.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use sharehub_core::claim::Claim;
use sharehub_core::lifecycle::effective_status;
use sharehub_core::listing::{Listing, ListingFilter, ListingUpdate, DEFAULT_LIST_LIMIT};
use sharehub_core::store::{MarketStore, StoreError};
use sharehub_core::types::Timestamp;

#[derive(Default)]
struct Inner {
    listings: HashMap<String, Listing>,
    claims: Vec<Claim>,
}

/// [`MarketStore`] over process-local maps.
#[derive(Default)]
pub struct MemoryMarketStore {
    inner: RwLock<Inner>,
}

impl MemoryMarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a listing directly, bypassing the insert path. Test helper.
    pub fn seed_listing(&self, listing: Listing) {
        if let Ok(mut inner) = self.inner.write() {
            inner.listings.insert(listing.id.clone(), listing);
        }
    }

    /// Number of stored claim rows. Test helper for zero-write assertions.
    pub fn claim_count(&self) -> usize {
        self.inner.read().map(|i| i.claims.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }
}

fn matches_filter(listing: &Listing, filter: &ListingFilter, now: Timestamp) -> bool {
    if let Some(category) = filter.category {
        if listing.category != category {
            return false;
        }
    }
    if let Some(campus) = &filter.campus {
        if &listing.campus != campus {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if effective_status(listing.status, listing.expires_at, now) != status {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let term = search.to_lowercase();
        let hit = listing.title.to_lowercase().contains(&term)
            || listing.description.to_lowercase().contains(&term)
            || listing.created_by_name.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }
    true
}

#[async_trait]
impl MarketStore for MemoryMarketStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn insert_listing(&self, listing: &Listing) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.listings.insert(listing.id.clone(), listing.clone());
        Ok(())
    }

    async fn get_listing(&self, id: &str) -> Result<Option<Listing>, StoreError> {
        Ok(self.read()?.listings.get(id).cloned())
    }

    async fn get_listings_batch(&self, ids: &[String]) -> Result<Vec<Listing>, StoreError> {
        let inner = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.listings.get(id).cloned())
            .collect())
    }

    async fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, StoreError> {
        let now = chrono::Utc::now();
        let inner = self.read()?;

        let mut matched: Vec<Listing> = inner
            .listings
            .values()
            .filter(|l| matches_filter(l, filter, now))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(0) as usize;
        Ok(matched.into_iter().skip(offset).take(limit).collect())
    }

    async fn listings_by_owner(&self, user_id: &str) -> Result<Vec<Listing>, StoreError> {
        let inner = self.read()?;
        let mut owned: Vec<Listing> = inner
            .listings
            .values()
            .filter(|l| l.created_by == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_listing(
        &self,
        id: &str,
        update: &ListingUpdate,
    ) -> Result<Option<Listing>, StoreError> {
        let mut inner = self.write()?;
        let Some(listing) = inner.listings.get_mut(id) else {
            return Ok(None);
        };
        if let Some(title) = &update.title {
            listing.title = title.clone();
        }
        if let Some(description) = &update.description {
            listing.description = description.clone();
        }
        if let Some(category) = update.category {
            listing.category = category;
        }
        if let Some(campus) = &update.campus {
            listing.campus = campus.clone();
        }
        if let Some(image_url) = &update.image_url {
            listing.image_url = Some(image_url.clone());
        }
        if let Some(expires_at) = update.expires_at {
            listing.expires_at = expires_at;
        }
        Ok(Some(listing.clone()))
    }

    async fn delete_listing(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.write()?.listings.remove(id).is_some())
    }

    async fn claim_listing_if_available(
        &self,
        id: &str,
        user_id: &str,
        user_name: &str,
        at: Timestamp,
    ) -> Result<Option<Listing>, StoreError> {
        use sharehub_core::listing::ListingStatus;

        let mut inner = self.write()?;
        let Some(listing) = inner.listings.get_mut(id) else {
            return Ok(None);
        };
        if listing.status != ListingStatus::Available {
            return Ok(None);
        }
        listing.status = ListingStatus::Claimed;
        listing.claimed_by = Some(user_id.to_string());
        listing.claimed_by_name = Some(user_name.to_string());
        listing.claimed_at = Some(at);
        Ok(Some(listing.clone()))
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<(), StoreError> {
        self.write()?.claims.push(claim.clone());
        Ok(())
    }

    async fn claims_by_user(&self, user_id: &str) -> Result<Vec<Claim>, StoreError> {
        let inner = self.read()?;
        let mut mine: Vec<Claim> = inner
            .claims
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(mine)
    }
}
