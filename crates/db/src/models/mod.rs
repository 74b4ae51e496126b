//! Row structs matching the database tables.
//!
//! Each row converts into its `sharehub-core` domain type via `TryFrom`;
//! an unparseable enum column surfaces as
//! [`sharehub_core::store::StoreError::Corrupt`] rather than a panic.

pub mod claim;
pub mod listing;

pub use claim::ClaimRow;
pub use listing::ListingRow;
