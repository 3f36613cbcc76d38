//! PostgreSQL-backed `BidRepository` implementation using Diesel ORM.
//!
//! The `bid` table holds the current version only; superseded rows move to
//! `bid_history` inside the same transaction that replaces the current row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{BidRepository, BidRepositoryError};
use crate::domain::{
    AuthorType, Bid, BidAuthor, BidDraft, BidId, BidStatus, EmployeeId, OrganizationId,
    TenderId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BidHistoryRow, BidRow, NewBidHistoryRow, NewBidRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bid, bid_history};

/// Diesel-backed implementation of the bid repository port.
#[derive(Clone)]
pub struct DieselBidRepository {
    pool: DbPool,
}

impl DieselBidRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BidRepositoryError {
    map_basic_pool_error(error, BidRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BidRepositoryError {
    map_basic_diesel_error(
        error,
        BidRepositoryError::query,
        BidRepositoryError::connection,
    )
}

/// Failure inside the revision transaction.
#[derive(Debug)]
enum RevisionError {
    /// The current row is no longer at the expected version.
    Stale,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for RevisionError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_revision_error(error: RevisionError, previous_version: u32) -> BidRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        RevisionError::Stale
        | RevisionError::Diesel(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            _,
        )) => BidRepositoryError::version_conflict(previous_version),
        RevisionError::Diesel(other) => map_diesel_error(other),
    }
}

fn to_column(value: u32, field: &str) -> Result<i32, BidRepositoryError> {
    i32::try_from(value)
        .map_err(|_| BidRepositoryError::query(format!("{field} {value} out of range")))
}

fn from_column(value: i32, field: &str) -> Result<u32, BidRepositoryError> {
    u32::try_from(value)
        .map_err(|_| BidRepositoryError::query(format!("stored {field} {value} is negative")))
}

fn to_new_row(bid: &Bid) -> Result<NewBidRow<'_>, BidRepositoryError> {
    let author = bid.author();
    Ok(NewBidRow {
        id: *bid.id().as_uuid(),
        name: bid.name(),
        description: bid.description(),
        status: bid.status().as_str(),
        tender_id: *bid.tender_id().as_uuid(),
        tender_version: to_column(bid.tender_version(), "tender version")?,
        author_type: author.author_type().as_str(),
        author_id: author.id(),
        version: to_column(bid.version(), "bid version")?,
        created_at: bid.created_at(),
    })
}

/// Convert a database row into a domain bid.
fn row_to_bid(row: BidRow) -> Result<Bid, BidRepositoryError> {
    let BidRow {
        id,
        name,
        description,
        status,
        tender_id,
        tender_version,
        author_type,
        author_id,
        version,
        created_at,
    } = row;

    let status = status
        .parse::<BidStatus>()
        .map_err(|err| BidRepositoryError::query(err.to_string()))?;
    let author_type = author_type
        .parse::<AuthorType>()
        .map_err(|err| BidRepositoryError::query(err.to_string()))?;

    Ok(Bid::from(BidDraft {
        id: BidId::from_uuid(id),
        name,
        description,
        status,
        tender_id: TenderId::from_uuid(tender_id),
        tender_version: from_column(tender_version, "tender version")?,
        author: BidAuthor::new(author_type, author_id),
        version: from_column(version, "bid version")?,
        created_at,
    }))
}

fn rows_to_bids(rows: Vec<BidRow>) -> Result<Vec<Bid>, BidRepositoryError> {
    rows.into_iter().map(row_to_bid).collect()
}

#[async_trait]
impl BidRepository for DieselBidRepository {
    async fn insert(&self, bid: &Bid) -> Result<(), BidRepositoryError> {
        let new_row = to_new_row(bid)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(bid::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_current(&self, bid_id: BidId) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = bid::table
            .filter(bid::id.eq(bid_id.as_uuid()))
            .select(BidRow::as_select())
            .first::<BidRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_bid).transpose()
    }

    async fn find_historical_version(
        &self,
        bid_id: BidId,
        version: u32,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        let Ok(version) = i32::try_from(version) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let archived = bid_history::table
            .filter(bid_history::bid_id.eq(bid_id.as_uuid()))
            .filter(bid_history::version.eq(version))
            .select(BidHistoryRow::as_select())
            .first::<BidHistoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        if let Some(row) = archived {
            return row_to_bid(row.into()).map(Some);
        }

        let current = bid::table
            .filter(bid::id.eq(bid_id.as_uuid()))
            .filter(bid::version.eq(version))
            .select(BidRow::as_select())
            .first::<BidRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        current.map(row_to_bid).transpose()
    }

    async fn list_by_author(
        &self,
        employee_id: EmployeeId,
        organization_id: Option<OrganizationId>,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let as_user = bid::author_type
            .eq(AuthorType::User.as_str())
            .and(bid::author_id.eq(*employee_id.as_uuid()));
        let query = match organization_id {
            Some(organization_id) => bid::table
                .filter(
                    as_user.or(bid::author_type
                        .eq(AuthorType::Organization.as_str())
                        .and(bid::author_id.eq(*organization_id.as_uuid()))),
                )
                .into_boxed(),
            None => bid::table.filter(as_user).into_boxed(),
        };

        let rows: Vec<BidRow> = query
            .order((bid::name.asc(), bid::id.asc()))
            .limit(page.limit_i64())
            .offset(page.offset_i64())
            .select(BidRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_bids(rows)
    }

    async fn list_by_tender(
        &self,
        tender_id: TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BidRow> = bid::table
            .filter(bid::tender_id.eq(tender_id.as_uuid()))
            .order((bid::name.asc(), bid::id.asc()))
            .limit(page.limit_i64())
            .offset(page.offset_i64())
            .select(BidRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_bids(rows)
    }

    async fn find_by_author_and_tender(
        &self,
        author_id: Uuid,
        tender_id: TenderId,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = bid::table
            .filter(bid::author_id.eq(author_id))
            .filter(bid::tender_id.eq(tender_id.as_uuid()))
            .order(bid::created_at.asc())
            .select(BidRow::as_select())
            .first::<BidRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_bid).transpose()
    }

    async fn record_revision(&self, previous: &Bid, next: &Bid) -> Result<(), BidRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let previous_row = to_new_row(previous)?;
        let history_row = NewBidHistoryRow::from(&previous_row);
        let next_row = to_new_row(next)?;
        let bid_id = previous_row.id;
        let expected_version = previous_row.version;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Archive and replace together so a lost race leaves no orphaned
        // history row behind.
        conn.transaction::<_, RevisionError, _>(|conn| {
            async move {
                diesel::insert_into(bid_history::table)
                    .values(&history_row)
                    .execute(conn)
                    .await?;

                let updated = diesel::update(
                    bid::table
                        .filter(bid::id.eq(bid_id))
                        .filter(bid::version.eq(expected_version)),
                )
                .set(&next_row)
                .execute(conn)
                .await?;

                if updated == 0 {
                    return Err(RevisionError::Stale);
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_revision_error(err, previous.version()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> BidRow {
        BidRow {
            id: Uuid::new_v4(),
            name: "Asphalt supply".to_owned(),
            description: "Forty tonnes".to_owned(),
            status: "Published".to_owned(),
            tender_id: Uuid::new_v4(),
            tender_version: 2,
            author_type: "Organization".to_owned(),
            author_id: Uuid::new_v4(),
            version: 4,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, BidRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(DieselError::NotFound);

        assert!(matches!(repo_err, BidRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn stale_revision_is_a_version_conflict() {
        assert_eq!(
            map_revision_error(RevisionError::Stale, 3),
            BidRepositoryError::version_conflict(3_u32)
        );
    }

    #[rstest]
    fn duplicate_history_row_is_a_version_conflict() {
        let error = RevisionError::from(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));

        assert_eq!(
            map_revision_error(error, 3),
            BidRepositoryError::version_conflict(3_u32)
        );
    }

    #[rstest]
    fn row_conversion_rebuilds_the_author(valid_row: BidRow) {
        let author_id = valid_row.author_id;
        let bid = row_to_bid(valid_row).expect("valid row");

        assert_eq!(
            bid.author(),
            BidAuthor::Organization(OrganizationId::from_uuid(author_id))
        );
        assert_eq!(bid.version(), 4);
        assert_eq!(bid.tender_version(), 2);
        assert_eq!(bid.status(), BidStatus::Published);
    }

    #[rstest]
    fn row_conversion_rejects_unknown_author_type(mut valid_row: BidRow) {
        valid_row.author_type = "Consortium".to_owned();

        let error = row_to_bid(valid_row).expect_err("unknown author type");
        assert!(matches!(error, BidRepositoryError::Query { .. }));
    }

    #[rstest]
    fn history_rows_convert_like_current_rows(valid_row: BidRow) {
        let history = BidHistoryRow {
            bid_id: valid_row.id,
            version: 1,
            name: valid_row.name.clone(),
            description: valid_row.description.clone(),
            status: "Created".to_owned(),
            tender_id: valid_row.tender_id,
            tender_version: valid_row.tender_version,
            author_type: valid_row.author_type.clone(),
            author_id: valid_row.author_id,
            created_at: valid_row.created_at,
        };

        let bid = row_to_bid(history.into()).expect("valid history row");
        assert_eq!(*bid.id().as_uuid(), valid_row.id);
        assert_eq!(bid.version(), 1);
        assert_eq!(bid.status(), BidStatus::Created);
    }

    #[rstest]
    fn new_rows_carry_the_author_discriminant(valid_row: BidRow) {
        let bid = row_to_bid(valid_row).expect("valid row");
        let row = to_new_row(&bid).expect("in range");

        assert_eq!(row.author_type, "Organization");
        assert_eq!(row.version, 4);
        assert_eq!(NewBidHistoryRow::from(&row).bid_id, row.id);
    }
}
