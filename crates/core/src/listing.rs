//! Listing entity, its enums, and the query/update shapes the store accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// Default listing lifetime when the creator does not pick an expiry.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// Default page size for listing queries.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum page size for listing queries.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Books,
    Electronics,
    Furniture,
    Clothing,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Books => "books",
            Self::Electronics => "electronics",
            Self::Furniture => "furniture",
            Self::Clothing => "clothing",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "books" => Ok(Self::Books),
            "electronics" => Ok(Self::Electronics),
            "furniture" => Ok(Self::Furniture),
            "clothing" => Ok(Self::Clothing),
            "other" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown category: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing lifecycle state.
///
/// Storage only ever holds `Available` or `Claimed`; `Expired` exists purely
/// as a read-time projection (see [`crate::lifecycle::effective_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Claimed,
    Expired,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Claimed => "claimed",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "claimed" => Ok(Self::Claimed),
            "expired" => Ok(Self::Expired),
            other => Err(CoreError::Validation(format!(
                "Unknown listing status: '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shareable item posting.
///
/// Wire format is camelCase; the deployed web client depends on these
/// exact field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub campus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub status: ListingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_by_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<Timestamp>,
}

impl Listing {
    /// Overlay the read-time expiry projection onto the stored status.
    pub fn with_effective_status(mut self, now: Timestamp) -> Self {
        self.status = crate::lifecycle::effective_status(self.status, self.expires_at, now);
        self
    }
}

/// Partial update applied by the listing's owner. `None` fields are left
/// untouched. Creator, creation time, and claim fields are never updatable.
#[derive(Debug, Clone, Default)]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub campus: Option<String>,
    pub image_url: Option<String>,
    pub expires_at: Option<Timestamp>,
}

/// Filter for browsing listings. Status is matched against the *effective*
/// status, so `Expired` selects available rows whose expiry has passed.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category: Option<Category>,
    pub campus: Option<String>,
    pub status: Option<ListingStatus>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
