//! Driving port for bid mutations.

use async_trait::async_trait;

use crate::domain::{Bid, BidDecision, BidEdit, BidId, BidStatus, Error, NewBid};

/// Request to move a bid to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBidStatusRequest {
    /// Bid to update.
    pub bid_id: BidId,
    /// Target status.
    pub status: BidStatus,
    /// Acting employee.
    pub username: String,
}

/// Request to edit bid fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBidRequest {
    /// Bid to edit.
    pub bid_id: BidId,
    /// Acting employee.
    pub username: String,
    /// Fields to replace.
    pub edit: BidEdit,
}

/// Request to restore a historical bid version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackBidRequest {
    /// Bid to roll back.
    pub bid_id: BidId,
    /// Version whose content is restored.
    pub version: u32,
    /// Acting employee.
    pub username: String,
}

/// Decision on a bid by the tender owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitDecisionRequest {
    /// Bid being decided.
    pub bid_id: BidId,
    /// Outcome.
    pub decision: BidDecision,
    /// Acting employee of the tender's organization.
    pub username: String,
}

/// Bid lifecycle mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BidCommand: Send + Sync {
    /// Create a bid at version 1 with status `Created`.
    async fn create(&self, request: NewBid) -> Result<Bid, Error>;

    /// Archive the current version and store the requested status.
    async fn update_status(&self, request: UpdateBidStatusRequest) -> Result<Bid, Error>;

    /// Archive the current version and store the edited fields.
    async fn edit(&self, request: EditBidRequest) -> Result<Bid, Error>;

    /// Archive the current version and restore a historical one on top.
    async fn rollback(&self, request: RollbackBidRequest) -> Result<Bid, Error>;

    /// Record the tender owner's decision, closing the tender on approval.
    async fn submit_decision(&self, request: SubmitDecisionRequest) -> Result<Bid, Error>;
}
