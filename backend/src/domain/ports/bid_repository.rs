//! Port for current bids and their version history.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::{Bid, BidId, EmployeeId, OrganizationId, TenderId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bid repository adapters.
    pub enum BidRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "bid repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "bid repository query failed: {message}",
        /// The current row moved past the expected version.
        VersionConflict { version: u32 } =>
            "bid version {version} is no longer current",
    }
}

/// Bid persistence with a separate history store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Store a freshly created bid.
    async fn insert(&self, bid: &Bid) -> Result<(), BidRepositoryError>;

    /// Load the current version of a bid.
    async fn find_current(&self, bid_id: BidId) -> Result<Option<Bid>, BidRepositoryError>;

    /// Load an exact version: a superseded one from history, or the current
    /// row when it carries `version`.
    async fn find_historical_version(
        &self,
        bid_id: BidId,
        version: u32,
    ) -> Result<Option<Bid>, BidRepositoryError>;

    /// Bids authored by the employee as a user, or by `organization_id` as an
    /// organization, ordered by name.
    async fn list_by_author(
        &self,
        employee_id: EmployeeId,
        organization_id: Option<OrganizationId>,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Bids answering a tender, ordered by name.
    async fn list_by_tender(
        &self,
        tender_id: TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError>;

    /// Any bid by `author_id` against `tender_id`.
    async fn find_by_author_and_tender(
        &self,
        author_id: Uuid,
        tender_id: TenderId,
    ) -> Result<Option<Bid>, BidRepositoryError>;

    /// Atomically archive `previous` and replace it with `next`.
    ///
    /// Fails with [`BidRepositoryError::VersionConflict`] and writes nothing
    /// when the stored current row is no longer at `previous.version()`.
    async fn record_revision(&self, previous: &Bid, next: &Bid) -> Result<(), BidRepositoryError>;
}
