//! Repository for the `claims` table.

use sqlx::PgPool;

use sharehub_core::claim::Claim;

use crate::models::ClaimRow;

/// Column list for `claims` queries.
const COLUMNS: &str = "id, listing_id, user_id, user_name, status, created_at";

/// Query methods for claims.
pub struct ClaimRepo;

impl ClaimRepo {
    pub async fn insert(pool: &PgPool, claim: &Claim) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO claims (id, listing_id, user_id, user_name, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&claim.id)
        .bind(&claim.listing_id)
        .bind(&claim.user_id)
        .bind(&claim.user_name)
        .bind(claim.status.as_str())
        .bind(claim.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All claims made by `user_id`, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<ClaimRow>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {COLUMNS} FROM claims \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
