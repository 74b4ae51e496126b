//! Read-time listing status derivation.
//!
//! Expiry is not a stored transition: a background job never flips rows to
//! `expired`. Readers overlay the expiry projection on the stored status at
//! every read, which keeps the read path consistent without a mutating
//! worker. The stored status itself only ever moves `available -> claimed`.

use crate::listing::ListingStatus;
use crate::types::Timestamp;

/// Compute the status a reader should see.
///
/// `available` past its expiry reads as `expired`. `claimed` is terminal and
/// is reported as-is regardless of `expires_at`. Pure and idempotent; no
/// stored mutation is implied.
pub fn effective_status(
    stored: ListingStatus,
    expires_at: Timestamp,
    now: Timestamp,
) -> ListingStatus {
    match stored {
        ListingStatus::Available if expires_at <= now => ListingStatus::Expired,
        other => other,
    }
}
