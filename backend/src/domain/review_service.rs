//! Review feedback service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::authorization::AuthorizationGuard;
use super::ports::{
    AuthorReviewsRequest, BidRepository, IdentityRepository, ReviewCommand, ReviewQuery,
    ReviewRepository, SubmitFeedbackRequest, TenderRepository,
};
use super::repository_errors::{map_bid_error, map_review_error, map_tender_error};
use super::{Bid, BidFeedback, BidId, Error, Review, ReviewId, Tender, TenderId};

/// Review service implementing [`ReviewCommand`] and [`ReviewQuery`].
///
/// Feedback is written and read by the tender's organization, never by the
/// bid author.
pub struct ReviewService<R, B, T, I> {
    reviews: Arc<R>,
    bids: Arc<B>,
    tenders: Arc<T>,
    guard: AuthorizationGuard<I>,
    clock: Arc<dyn Clock>,
}

impl<R, B, T, I> Clone for ReviewService<R, B, T, I> {
    fn clone(&self) -> Self {
        Self {
            reviews: Arc::clone(&self.reviews),
            bids: Arc::clone(&self.bids),
            tenders: Arc::clone(&self.tenders),
            guard: self.guard.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, B, T, I> ReviewService<R, B, T, I>
where
    R: ReviewRepository,
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    /// Create a service over the review, bid and tender stores.
    pub fn new(
        reviews: Arc<R>,
        bids: Arc<B>,
        tenders: Arc<T>,
        identity: Arc<I>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reviews,
            bids,
            tenders,
            guard: AuthorizationGuard::new(identity),
            clock,
        }
    }

    async fn current_tender(&self, tender_id: TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_current(tender_id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(Error::tender_not_exists)
    }

    async fn current_bid(&self, bid_id: BidId) -> Result<Bid, Error> {
        self.bids
            .find_current(bid_id)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(Error::bid_not_exists)
    }
}

#[async_trait]
impl<R, B, T, I> ReviewCommand for ReviewService<R, B, T, I>
where
    R: ReviewRepository,
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn submit_feedback(&self, request: SubmitFeedbackRequest) -> Result<Bid, Error> {
        let bid = self.current_bid(request.bid_id).await?;
        let tender = self.current_tender(bid.tender_id()).await?;
        self.guard
            .authorize_for_organization(&request.username, tender.organization_id())
            .await?;
        let feedback = BidFeedback::new(request.feedback)?;

        let review = Review {
            id: ReviewId::random(),
            bid_id: bid.id(),
            description: feedback.as_str().to_owned(),
            created_at: self.clock.utc(),
        };
        self.reviews
            .insert(&review)
            .await
            .map_err(map_review_error)?;
        info!(review_id = %review.id, bid_id = %bid.id(), "bid feedback stored");
        Ok(bid)
    }
}

#[async_trait]
impl<R, B, T, I> ReviewQuery for ReviewService<R, B, T, I>
where
    R: ReviewRepository,
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn list_by_bid_author(
        &self,
        request: AuthorReviewsRequest,
    ) -> Result<Vec<Review>, Error> {
        let author_id = self.guard.resolve_employee(&request.author_username).await?;
        let tender = self.current_tender(request.tender_id).await?;
        self.bids
            .find_by_author_and_tender(*author_id.as_uuid(), tender.id())
            .await
            .map_err(map_bid_error)?
            .ok_or_else(Error::bid_for_tender_not_exists)?;
        self.guard
            .authorize_for_organization(&request.requester_username, tender.organization_id())
            .await?;

        self.reviews
            .list_by_bid_author(*author_id.as_uuid(), request.page)
            .await
            .map_err(map_review_error)
    }
}
