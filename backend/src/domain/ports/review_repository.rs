//! Port for review feedback persistence.

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::Review;

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "review repository query failed: {message}",
    }
}

/// Review persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Store a review.
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Reviews on any bid authored by `author_id`, ordered by description.
    async fn list_by_bid_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;
}
