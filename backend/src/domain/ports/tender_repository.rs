//! Port for the multi-version tender store.
//!
//! Every tender version is a row keyed by `(tender_id, version)`. Adapters
//! must reject a second row for an existing key with
//! [`TenderRepositoryError::VersionConflict`]; that check is what makes the
//! read-latest-then-append sequence safe under concurrent writers.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{OrganizationId, ServiceType, Tender, TenderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tender repository adapters.
    pub enum TenderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tender repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tender repository query failed: {message}",
        /// Another writer already stored this version.
        VersionConflict { version: u32 } =>
            "tender version {version} already exists",
    }
}

/// Append-only tender persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderRepository: Send + Sync {
    /// Store `tender` as a new version row.
    async fn append_version(&self, tender: &Tender) -> Result<(), TenderRepositoryError>;

    /// Load the highest version of a tender.
    async fn find_current(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<Tender>, TenderRepositoryError>;

    /// Load an exact version of a tender.
    async fn find_version(
        &self,
        tender_id: TenderId,
        version: u32,
    ) -> Result<Option<Tender>, TenderRepositoryError>;

    /// Highest stored version number of a tender.
    async fn latest_version(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<u32>, TenderRepositoryError>;

    /// Current versions with status `Published`, optionally restricted to
    /// `service_types`, ordered by name.
    async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError>;

    /// Current versions owned by an organization in any status, ordered by
    /// name.
    async fn list_by_organization(
        &self,
        organization_id: OrganizationId,
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError>;
}
