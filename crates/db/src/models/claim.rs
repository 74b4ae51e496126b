use sqlx::FromRow;

use sharehub_core::claim::Claim;
use sharehub_core::store::StoreError;
use sharehub_core::types::Timestamp;

/// A row from the `claims` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: String,
    pub listing_id: String,
    pub user_id: String,
    pub user_name: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = StoreError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        Ok(Claim {
            status: row
                .status
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("claim {}: {e}", row.id)))?,
            id: row.id,
            listing_id: row.listing_id,
            user_id: row.user_id,
            user_name: row.user_name,
            created_at: row.created_at,
        })
    }
}
