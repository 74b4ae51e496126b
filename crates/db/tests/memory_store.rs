//! Contract tests for the in-memory store: conditional write semantics,
//! filter behaviour, ordering, and the best-effort batch fetch.

use chrono::{Duration, Utc};

use sharehub_core::claim::{Claim, ClaimStatus};
use sharehub_core::listing::{
    Category, Listing, ListingFilter, ListingStatus, ListingUpdate,
};
use sharehub_core::store::MarketStore;
use sharehub_core::types::Timestamp;
use sharehub_db::store::MemoryMarketStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn listing_at(id: &str, owner: &str, created_at: Timestamp) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Item {id}"),
        description: "A shareable item".to_string(),
        category: Category::Other,
        campus: "Main Campus".to_string(),
        image_url: None,
        created_by: owner.to_string(),
        created_by_name: format!("{owner} Name"),
        created_at,
        expires_at: created_at + Duration::days(30),
        status: ListingStatus::Available,
        claimed_by: None,
        claimed_by_name: None,
        claimed_at: None,
    }
}

fn claim_at(id: &str, listing_id: &str, user_id: &str, created_at: Timestamp) -> Claim {
    Claim {
        id: id.to_string(),
        listing_id: listing_id.to_string(),
        user_id: user_id.to_string(),
        user_name: format!("{user_id} Name"),
        status: ClaimStatus::Pending,
        created_at,
    }
}

// ---------------------------------------------------------------------------
// Test: conditional write succeeds once, then refuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conditional_claim_write_is_first_wins() {
    let store = MemoryMarketStore::new();
    store.seed_listing(listing_at("L1", "U1", Utc::now()));

    let first = store
        .claim_listing_if_available("L1", "U2", "Jane", Utc::now())
        .await
        .unwrap();
    assert!(first.is_some());
    assert_eq!(first.unwrap().claimed_by.as_deref(), Some("U2"));

    // The second write finds the precondition gone and does nothing.
    let second = store
        .claim_listing_if_available("L1", "U3", "Mike", Utc::now())
        .await
        .unwrap();
    assert!(second.is_none());

    let stored = store.get_listing("L1").await.unwrap().unwrap();
    assert_eq!(stored.claimed_by.as_deref(), Some("U2"));
}

// ---------------------------------------------------------------------------
// Test: listing queries come back newest first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_are_ordered_newest_first() {
    let store = MemoryMarketStore::new();
    let now = Utc::now();
    store.seed_listing(listing_at("old", "U1", now - Duration::days(2)));
    store.seed_listing(listing_at("mid", "U1", now - Duration::days(1)));
    store.seed_listing(listing_at("new", "U1", now));

    let browsed = store.list_listings(&ListingFilter::default()).await.unwrap();
    let ids: Vec<&str> = browsed.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["new", "mid", "old"]);

    let owned = store.listings_by_owner("U1").await.unwrap();
    let ids: Vec<&str> = owned.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["new", "mid", "old"]);
}

// ---------------------------------------------------------------------------
// Test: status filter matches effective status, not stored status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_filter_uses_effective_status() {
    let store = MemoryMarketStore::new();
    let now = Utc::now();

    let fresh = listing_at("fresh", "U1", now - Duration::hours(2));
    let mut stale = listing_at("stale", "U1", now - Duration::days(40));
    stale.expires_at = now - Duration::days(10);
    store.seed_listing(fresh);
    store.seed_listing(stale);

    let available = store
        .list_listings(&ListingFilter {
            status: Some(ListingStatus::Available),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, "fresh");

    let expired = store
        .list_listings(&ListingFilter {
            status: Some(ListingStatus::Expired),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, "stale");
}

// ---------------------------------------------------------------------------
// Test: category, campus, and search filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn category_campus_and_search_filters() {
    let store = MemoryMarketStore::new();
    let now = Utc::now();

    let mut books = listing_at("books", "U1", now);
    books.category = Category::Books;
    books.title = "Linear Algebra Done Right".to_string();

    let mut lamp = listing_at("lamp", "U2", now - Duration::hours(1));
    lamp.category = Category::Electronics;
    lamp.campus = "North Campus".to_string();
    lamp.description = "LED desk lamp for late study sessions".to_string();

    store.seed_listing(books);
    store.seed_listing(lamp);

    let electronics = store
        .list_listings(&ListingFilter {
            category: Some(Category::Electronics),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(electronics.len(), 1);
    assert_eq!(electronics[0].id, "lamp");

    let north = store
        .list_listings(&ListingFilter {
            campus: Some("North Campus".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(north.len(), 1);

    // Search is case-insensitive across title and description.
    let hits = store
        .list_listings(&ListingFilter {
            search: Some("ALGEBRA".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "books");

    let hits = store
        .list_listings(&ListingFilter {
            search: Some("desk lamp".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "lamp");
}

// ---------------------------------------------------------------------------
// Test: limit and offset paginate the ordered result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn limit_and_offset_paginate() {
    let store = MemoryMarketStore::new();
    let now = Utc::now();
    for i in 0..5 {
        store.seed_listing(listing_at(&format!("L{i}"), "U1", now - Duration::hours(i)));
    }

    let page = store
        .list_listings(&ListingFilter {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<&str> = page.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["L1", "L2"]);
}

// ---------------------------------------------------------------------------
// Test: batch fetch drops missing ids silently
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_fetch_is_best_effort() {
    let store = MemoryMarketStore::new();
    store.seed_listing(listing_at("L1", "U1", Utc::now()));

    let found = store
        .get_listings_batch(&["L1".to_string(), "ghost".to_string()])
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "L1");
}

// ---------------------------------------------------------------------------
// Test: partial update leaves unset fields alone
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_patches_only_provided_fields() {
    let store = MemoryMarketStore::new();
    let original = listing_at("L1", "U1", Utc::now());
    let original_expiry = original.expires_at;
    store.seed_listing(original);

    let updated = store
        .update_listing(
            "L1",
            &ListingUpdate {
                title: Some("New title".to_string()),
                expires_at: Some(original_expiry + Duration::days(7)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.description, "A shareable item");
    assert_eq!(updated.expires_at, original_expiry + Duration::days(7));

    let missing = store
        .update_listing("ghost", &ListingUpdate::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Test: delete reports whether a row existed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_reports_existence() {
    let store = MemoryMarketStore::new();
    store.seed_listing(listing_at("L1", "U1", Utc::now()));

    assert!(store.delete_listing("L1").await.unwrap());
    assert!(!store.delete_listing("L1").await.unwrap());
    assert!(store.get_listing("L1").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: claims are scoped to the user and ordered newest first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn claims_by_user_scoped_and_ordered() {
    let store = MemoryMarketStore::new();
    let now = Utc::now();
    store
        .insert_claim(&claim_at("C1", "L1", "U2", now - Duration::hours(2)))
        .await
        .unwrap();
    store
        .insert_claim(&claim_at("C2", "L2", "U2", now))
        .await
        .unwrap();
    store
        .insert_claim(&claim_at("C3", "L3", "U9", now))
        .await
        .unwrap();

    let mine = store.claims_by_user("U2").await.unwrap();
    let ids: Vec<&str> = mine.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["C2", "C1"]);
}
