//! Driving port for leaving feedback on bids.

use async_trait::async_trait;

use crate::domain::{Bid, BidId, Error};

/// Feedback from the tender's organization about a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedbackRequest {
    /// Bid the feedback concerns.
    pub bid_id: BidId,
    /// Acting employee.
    pub username: String,
    /// Feedback text.
    pub feedback: String,
}

/// Review mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Store a review and return the bid unchanged.
    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Bid, Error>;
}
