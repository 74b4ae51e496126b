//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod claim_repo;
pub mod listing_repo;

pub use claim_repo::ClaimRepo;
pub use listing_repo::ListingRepo;
