//! Claim entity: the record of one user's request to take a listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::Listing;
use crate::types::{EntityId, Timestamp};

/// Claim lifecycle state. The claim transaction always writes `Pending`;
/// later transitions are owned by flows outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown claim status: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim row. Immutable once created, from this service's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: EntityId,
    pub listing_id: EntityId,
    pub user_id: String,
    pub user_name: String,
    pub status: ClaimStatus,
    pub created_at: Timestamp,
}

/// A claim joined with its listing for the claimant lookup.
///
/// The join is best-effort: `listing` is `null` when the referenced listing
/// can no longer be found.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimWithListing {
    #[serde(flatten)]
    pub claim: Claim,
    pub listing: Option<Listing>,
}
