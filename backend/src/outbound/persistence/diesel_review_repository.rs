//! PostgreSQL-backed `ReviewRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{BidId, Review, ReviewId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ReviewRow;
use super::pool::{DbPool, PoolError};
use super::schema::{bid, review};

/// Diesel-backed implementation of the review repository port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    map_basic_pool_error(error, ReviewRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    map_basic_diesel_error(
        error,
        ReviewRepositoryError::query,
        ReviewRepositoryError::connection,
    )
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::from_uuid(row.id),
            bid_id: BidId::from_uuid(row.bid_id),
            description: row.description,
            created_at: row.created_at,
        }
    }
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: *review.id.as_uuid(),
            bid_id: *review.bid_id.as_uuid(),
            description: review.description.clone(),
            created_at: review.created_at,
        }
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let row = ReviewRow::from(review);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(review::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_bid_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = review::table
            .inner_join(bid::table)
            .filter(bid::author_id.eq(author_id))
            .order((review::description.asc(), review::id.asc()))
            .limit(page.limit_i64())
            .offset(page.offset_i64())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
