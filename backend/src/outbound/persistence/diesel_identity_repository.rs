//! PostgreSQL-backed `IdentityRepository` reading the employee directory.
//!
//! The `employee`, `organization` and `organization_responsible` tables are
//! owned upstream; this adapter only reads them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{IdentityRepository, IdentityRepositoryError};
use crate::domain::{Employee, EmployeeId, Organization, OrganizationId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EmployeeRow, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{employee, organization, organization_responsible};

/// Diesel-backed implementation of the identity directory port.
#[derive(Clone)]
pub struct DieselIdentityRepository {
    pool: DbPool,
}

impl DieselIdentityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IdentityRepositoryError {
    map_basic_pool_error(error, IdentityRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IdentityRepositoryError {
    map_basic_diesel_error(
        error,
        IdentityRepositoryError::query,
        IdentityRepositoryError::connection,
    )
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::from_uuid(row.id),
            username: row.username,
        }
    }
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Self {
            id: OrganizationId::from_uuid(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl IdentityRepository for DieselIdentityRepository {
    async fn find_employee_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = employee::table
            .filter(employee::username.eq(username))
            .select(employee::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(id.map(EmployeeId::from_uuid))
    }

    async fn find_employee_id_if_responsible(
        &self,
        username: &str,
        organization_id: OrganizationId,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = organization_responsible::table
            .inner_join(employee::table)
            .filter(employee::username.eq(username))
            .filter(organization_responsible::organization_id.eq(organization_id.as_uuid()))
            .select(employee::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(id.map(EmployeeId::from_uuid))
    }

    async fn find_employee_by_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>, IdentityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = employee::table
            .filter(employee::id.eq(employee_id.as_uuid()))
            .select(EmployeeRow::as_select())
            .first::<EmployeeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Employee::from))
    }

    async fn find_organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<Organization>, IdentityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = organization::table
            .filter(organization::id.eq(organization_id.as_uuid()))
            .select(OrganizationRow::as_select())
            .first::<OrganizationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Organization::from))
    }

    async fn find_organization_by_employee_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Organization>, IdentityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Several memberships are possible; the lowest organization id wins.
        let row = organization_responsible::table
            .inner_join(organization::table)
            .filter(organization_responsible::user_id.eq(employee_id.as_uuid()))
            .order(organization::id.asc())
            .select(OrganizationRow::as_select())
            .first::<OrganizationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Organization::from))
    }
}
