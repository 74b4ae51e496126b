//! Repository for the `listings` table.

use sqlx::{PgPool, QueryBuilder};

use sharehub_core::listing::{
    Listing, ListingFilter, ListingStatus, ListingUpdate, DEFAULT_LIST_LIMIT,
};
use sharehub_core::types::Timestamp;

use crate::models::ListingRow;

/// Column list for `listings` queries.
const COLUMNS: &str = "id, title, description, category, campus, image_url, \
     created_by, created_by_name, created_at, expires_at, status, \
     claimed_by, claimed_by_name, claimed_at";

/// Query methods for listings.
pub struct ListingRepo;

impl ListingRepo {
    pub async fn insert(pool: &PgPool, listing: &Listing) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO listings (id, title, description, category, campus, image_url, \
             created_by, created_by_name, created_at, expires_at, status, \
             claimed_by, claimed_by_name, claimed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(&listing.id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.category.as_str())
        .bind(&listing.campus)
        .bind(&listing.image_url)
        .bind(&listing.created_by)
        .bind(&listing.created_by_name)
        .bind(listing.created_at)
        .bind(listing.expires_at)
        .bind(listing.status.as_str())
        .bind(&listing.claimed_by)
        .bind(&listing.claimed_by_name)
        .bind(listing.claimed_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ListingRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingRow>(&format!("SELECT {COLUMNS} FROM listings WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch fetch by id. Ids absent from the table are simply not returned.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[String],
    ) -> Result<Vec<ListingRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {COLUMNS} FROM listings WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Browse listings with optional filters, newest first.
    ///
    /// The status filter matches the *effective* status: `expired` selects
    /// available rows whose expiry has passed, `available` excludes them.
    pub async fn list(
        pool: &PgPool,
        filter: &ListingFilter,
        now: Timestamp,
    ) -> Result<Vec<ListingRow>, sqlx::Error> {
        let mut qb: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM listings WHERE 1=1"));

        if let Some(category) = filter.category {
            qb.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(campus) = &filter.campus {
            qb.push(" AND campus = ").push_bind(campus.clone());
        }
        match filter.status {
            Some(ListingStatus::Available) => {
                qb.push(" AND status = 'available' AND expires_at > ")
                    .push_bind(now);
            }
            Some(ListingStatus::Expired) => {
                qb.push(" AND status = 'available' AND expires_at <= ")
                    .push_bind(now);
            }
            Some(ListingStatus::Claimed) => {
                qb.push(" AND status = 'claimed'");
            }
            None => {}
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR created_by_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(filter.limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .push(" OFFSET ")
            .push_bind(filter.offset.unwrap_or(0));

        qb.build_query_as::<ListingRow>().fetch_all(pool).await
    }

    /// All listings created by `user_id`, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<ListingRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {COLUMNS} FROM listings \
             WHERE created_by = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. Creator, creation time, and claim fields are
    /// never touched here.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        update: &ListingUpdate,
    ) -> Result<Option<ListingRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingRow>(&format!(
            "UPDATE listings SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             category = COALESCE($4, category), \
             campus = COALESCE($5, campus), \
             image_url = COALESCE($6, image_url), \
             expires_at = COALESCE($7, expires_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.category.map(|c| c.as_str()))
        .bind(&update.campus)
        .bind(&update.image_url)
        .bind(update.expires_at)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The guarded claim mutation: transition to `claimed` only if the row
    /// is still `available`. Zero rows back means the precondition failed.
    pub async fn claim_if_available(
        pool: &PgPool,
        id: &str,
        user_id: &str,
        user_name: &str,
        at: Timestamp,
    ) -> Result<Option<ListingRow>, sqlx::Error> {
        sqlx::query_as::<_, ListingRow>(&format!(
            "UPDATE listings SET \
             status = 'claimed', claimed_by = $2, claimed_by_name = $3, claimed_at = $4 \
             WHERE id = $1 AND status = 'available' \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(user_name)
        .bind(at)
        .fetch_optional(pool)
        .await
    }
}
