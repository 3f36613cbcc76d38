//! PostgreSQL-backed `TenderRepository` implementation using Diesel ORM.
//!
//! Every version is its own row. The `(tender_id, version)` unique constraint
//! turns a lost append race into [`TenderRepositoryError::VersionConflict`].
//! Listings select the newest row per tender with `DISTINCT ON`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, BigInt, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{TenderRepository, TenderRepositoryError};
use crate::domain::{
    EmployeeId, OrganizationId, ServiceType, Tender, TenderDraft, TenderId, TenderStatus,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTenderRow, TenderRow};
use super::pool::{DbPool, PoolError};
use super::schema::tender;

const CURRENT_TENDERS_SQL: &str = r#"
SELECT DISTINCT ON (tender_id)
    tender_id, name, description, service_type, status, version,
    organization_id, creator_id, created_at
FROM tender
ORDER BY tender_id, version DESC
"#;

/// Diesel-backed implementation of the tender repository port.
#[derive(Clone)]
pub struct DieselTenderRepository {
    pool: DbPool,
}

impl DieselTenderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TenderRepositoryError {
    map_basic_pool_error(error, TenderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TenderRepositoryError {
    map_basic_diesel_error(
        error,
        TenderRepositoryError::query,
        TenderRepositoryError::connection,
    )
}

/// Map an append failure, treating a duplicate `(tender_id, version)` as a
/// lost race.
fn map_append_error(error: diesel::result::Error, version: u32) -> TenderRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TenderRepositoryError::version_conflict(version)
        }
        other => map_diesel_error(other),
    }
}

fn version_to_column(version: u32) -> Result<i32, TenderRepositoryError> {
    i32::try_from(version)
        .map_err(|_| TenderRepositoryError::query(format!("version {version} out of range")))
}

/// Convert a database row into a domain tender.
fn row_to_tender(row: TenderRow) -> Result<Tender, TenderRepositoryError> {
    let TenderRow {
        tender_id,
        name,
        description,
        service_type,
        status,
        version,
        organization_id,
        creator_id,
        created_at,
    } = row;

    let service_type = service_type
        .parse::<ServiceType>()
        .map_err(|err| TenderRepositoryError::query(err.to_string()))?;
    let status = status
        .parse::<TenderStatus>()
        .map_err(|err| TenderRepositoryError::query(err.to_string()))?;
    let version = u32::try_from(version).map_err(|_| {
        TenderRepositoryError::query(format!("stored tender version {version} is negative"))
    })?;

    Ok(Tender::from(TenderDraft {
        id: TenderId::from_uuid(tender_id),
        name,
        description,
        service_type,
        status,
        version,
        organization_id: OrganizationId::from_uuid(organization_id),
        creator_id: EmployeeId::from_uuid(creator_id),
        created_at,
    }))
}

fn rows_to_tenders(rows: Vec<TenderRow>) -> Result<Vec<Tender>, TenderRepositoryError> {
    rows.into_iter().map(row_to_tender).collect()
}

#[async_trait]
impl TenderRepository for DieselTenderRepository {
    async fn append_version(&self, tender: &Tender) -> Result<(), TenderRepositoryError> {
        let new_row = NewTenderRow {
            tender_id: *tender.id().as_uuid(),
            name: tender.name(),
            description: tender.description(),
            service_type: tender.service_type().as_str(),
            status: tender.status().as_str(),
            version: version_to_column(tender.version())?,
            organization_id: *tender.organization_id().as_uuid(),
            creator_id: *tender.creator_id().as_uuid(),
            created_at: tender.created_at(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(tender::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_append_error(err, tender.version()))
    }

    async fn find_current(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = tender::table
            .filter(tender::tender_id.eq(tender_id.as_uuid()))
            .order(tender::version.desc())
            .select(TenderRow::as_select())
            .first::<TenderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_tender).transpose()
    }

    async fn find_version(
        &self,
        tender_id: TenderId,
        version: u32,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        let Ok(version) = i32::try_from(version) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = tender::table
            .filter(tender::tender_id.eq(tender_id.as_uuid()))
            .filter(tender::version.eq(version))
            .select(TenderRow::as_select())
            .first::<TenderRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_tender).transpose()
    }

    async fn latest_version(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<u32>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let latest: Option<i32> = tender::table
            .filter(tender::tender_id.eq(tender_id.as_uuid()))
            .select(diesel::dsl::max(tender::version))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        latest
            .map(|version| {
                u32::try_from(version).map_err(|_| {
                    TenderRepositoryError::query(format!(
                        "stored tender version {version} is negative"
                    ))
                })
            })
            .transpose()
    }

    async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let labels: Vec<String> = service_types
            .iter()
            .map(|service_type| service_type.as_str().to_owned())
            .collect();
        let query = format!(
            "SELECT * FROM ({CURRENT_TENDERS_SQL}) AS current_tender \
             WHERE status = 'Published' \
             AND (cardinality($1::text[]) = 0 OR service_type = ANY($1)) \
             ORDER BY name, tender_id LIMIT $2 OFFSET $3"
        );
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TenderRow> = sql_query(query)
            .bind::<Array<Text>, _>(&labels)
            .bind::<BigInt, _>(page.limit_i64())
            .bind::<BigInt, _>(page.offset_i64())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_tenders(rows)
    }

    async fn list_by_organization(
        &self,
        organization_id: OrganizationId,
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let query = format!(
            "SELECT * FROM ({CURRENT_TENDERS_SQL}) AS current_tender \
             WHERE organization_id = $1 \
             ORDER BY name, tender_id LIMIT $2 OFFSET $3"
        );
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TenderRow> = sql_query(query)
            .bind::<SqlUuid, _>(organization_id.as_uuid())
            .bind::<BigInt, _>(page.limit_i64())
            .bind::<BigInt, _>(page.offset_i64())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_tenders(rows)
    }
}
