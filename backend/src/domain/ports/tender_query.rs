//! Driving port for tender reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, ServiceType, Tender, TenderId, TenderStatus};

/// Public listing of published tenders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedTendersRequest {
    /// Service types to include; empty means all.
    pub service_types: Vec<ServiceType>,
    /// Page window.
    pub page: PageRequest,
}

/// Listing of the tenders owned by an employee's organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTendersRequest {
    /// Employee whose organization is listed.
    pub username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Status lookup, anonymous when `username` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderStatusRequest {
    /// Tender to inspect.
    pub tender_id: TenderId,
    /// Acting employee, if any.
    pub username: Option<String>,
}

/// Tender read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderQuery: Send + Sync {
    /// Published tenders, ordered by name.
    async fn list_published(&self, request: PublishedTendersRequest)
    -> Result<Vec<Tender>, Error>;

    /// Tenders of the employee's organization in every status.
    async fn list_for_employee(&self, request: EmployeeTendersRequest)
    -> Result<Vec<Tender>, Error>;

    /// Status of the current tender version.
    async fn status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error>;
}
