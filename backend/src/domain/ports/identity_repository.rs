//! Port for the employee and organization directory.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, Organization, OrganizationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity directory adapters.
    pub enum IdentityRepositoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "identity directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "identity directory query failed: {message}",
    }
}

/// Read-only lookups over employees, organizations and responsibility links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Resolve a username to an employee identifier.
    async fn find_employee_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError>;

    /// Resolve a username to an employee only when that employee is
    /// responsible for `organization_id`.
    async fn find_employee_id_if_responsible(
        &self,
        username: &str,
        organization_id: OrganizationId,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError>;

    /// Load an employee by identifier.
    async fn find_employee_by_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>, IdentityRepositoryError>;

    /// Load an organization by identifier.
    async fn find_organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<Organization>, IdentityRepositoryError>;

    /// Load the organization an employee is responsible for, if any.
    async fn find_organization_by_employee_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Organization>, IdentityRepositoryError>;
}
