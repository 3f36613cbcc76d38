//! Driving port for reading feedback about a bid author.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, Review, TenderId};

/// Reviews of an author's bids, requested in the context of one tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorReviewsRequest {
    /// Tender the author must have bid on.
    pub tender_id: TenderId,
    /// Author whose bids were reviewed.
    pub author_username: String,
    /// Employee of the tender's organization asking.
    pub requester_username: String,
    /// Page window.
    pub page: PageRequest,
}

/// Review read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Reviews on any bid by the author, ordered by description.
    async fn list_by_bid_author(&self, request: AuthorReviewsRequest)
    -> Result<Vec<Review>, Error>;
}
