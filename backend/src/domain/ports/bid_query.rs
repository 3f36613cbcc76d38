//! Driving port for bid reads.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Bid, BidId, BidStatus, Error, TenderId};

/// Listing of bids authored by an employee or their organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeBidsRequest {
    /// Author employee.
    pub username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Listing of bids answering a tender, for the tender's organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderBidsRequest {
    /// Tender whose bids are listed.
    pub tender_id: TenderId,
    /// Acting employee.
    pub username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Status lookup by the bid's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidStatusRequest {
    /// Bid to inspect.
    pub bid_id: BidId,
    /// Acting employee.
    pub username: String,
}

/// Bid read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidQuery: Send + Sync {
    /// Bids authored by the employee or their organization.
    async fn list_for_employee(&self, request: EmployeeBidsRequest) -> Result<Vec<Bid>, Error>;

    /// Bids answering a tender.
    async fn list_for_tender(&self, request: TenderBidsRequest) -> Result<Vec<Bid>, Error>;

    /// Status of the current bid version.
    async fn status(&self, request: BidStatusRequest) -> Result<BidStatus, Error>;
}
