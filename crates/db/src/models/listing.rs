use sqlx::FromRow;

use sharehub_core::listing::Listing;
use sharehub_core::store::StoreError;
use sharehub_core::types::Timestamp;

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub campus: String,
    pub image_url: Option<String>,
    pub created_by: String,
    pub created_by_name: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub status: String,
    pub claimed_by: Option<String>,
    pub claimed_by_name: Option<String>,
    pub claimed_at: Option<Timestamp>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = StoreError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        Ok(Listing {
            category: row
                .category
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("listing {}: {e}", row.id)))?,
            status: row
                .status
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("listing {}: {e}", row.id)))?,
            id: row.id,
            title: row.title,
            description: row.description,
            campus: row.campus,
            image_url: row.image_url,
            created_by: row.created_by,
            created_by_name: row.created_by_name,
            created_at: row.created_at,
            expires_at: row.expires_at,
            claimed_by: row.claimed_by,
            claimed_by_name: row.claimed_by_name,
            claimed_at: row.claimed_at,
        })
    }
}
