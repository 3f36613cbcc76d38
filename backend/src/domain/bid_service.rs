//! Bid lifecycle service.
//!
//! Bid mutations archive the current version and replace it in one
//! repository call, so the history never holds a version that was not
//! superseded. Decisions are taken by the tender's organization and close the
//! tender on approval.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::authorization::AuthorizationGuard;
use super::ports::{
    BidCommand, BidQuery, BidRepository, BidStatusRequest, EditBidRequest, EmployeeBidsRequest,
    IdentityRepository, RollbackBidRequest, SubmitDecisionRequest, TenderBidsRequest,
    TenderRepository, UpdateBidStatusRequest,
};
use super::repository_errors::{map_bid_error, map_identity_error, map_tender_error};
use super::{
    Bid, BidAuthor, BidDecision, BidDraft, BidId, BidStatus, Error, NewBid, Tender, TenderId,
    TenderStatus,
};

/// Bid service implementing [`BidCommand`] and [`BidQuery`].
pub struct BidService<B, T, I> {
    bids: Arc<B>,
    tenders: Arc<T>,
    identity: Arc<I>,
    guard: AuthorizationGuard<I>,
    clock: Arc<dyn Clock>,
}

impl<B, T, I> Clone for BidService<B, T, I> {
    fn clone(&self) -> Self {
        Self {
            bids: Arc::clone(&self.bids),
            tenders: Arc::clone(&self.tenders),
            identity: Arc::clone(&self.identity),
            guard: self.guard.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, T, I> BidService<B, T, I>
where
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    /// Create a service over the bid and tender stores.
    pub fn new(bids: Arc<B>, tenders: Arc<T>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bids,
            tenders,
            guard: AuthorizationGuard::new(Arc::clone(&identity)),
            identity,
            clock,
        }
    }

    async fn current_bid(&self, bid_id: BidId) -> Result<Bid, Error> {
        self.bids
            .find_current(bid_id)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(Error::bid_not_exists)
    }

    async fn current_tender(&self, tender_id: TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_current(tender_id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(Error::tender_not_exists)
    }

    async fn author_exists(&self, author: BidAuthor) -> Result<bool, Error> {
        let found = match author {
            BidAuthor::User(employee_id) => self
                .identity
                .find_employee_by_id(employee_id)
                .await
                .map_err(map_identity_error)?
                .is_some(),
            BidAuthor::Organization(organization_id) => self
                .identity
                .find_organization_by_id(organization_id)
                .await
                .map_err(map_identity_error)?
                .is_some(),
        };
        Ok(found)
    }

    /// Load the current bid and confirm `username` may act as its author.
    async fn authored_bid(&self, bid_id: BidId, username: &str) -> Result<Bid, Error> {
        let current = self.current_bid(bid_id).await?;
        self.guard
            .authorize_bid_author(username, current.author())
            .await?;
        Ok(current)
    }

    async fn revise(&self, previous: &Bid, next: Bid) -> Result<Bid, Error> {
        self.bids
            .record_revision(previous, &next)
            .await
            .map_err(map_bid_error)?;
        info!(
            bid_id = %next.id(),
            version = next.version(),
            status = %next.status(),
            "bid revision stored"
        );
        Ok(next)
    }
}

#[async_trait]
impl<B, T, I> BidCommand for BidService<B, T, I>
where
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn create(&self, request: NewBid) -> Result<Bid, Error> {
        let content = request.validate()?;
        let tender = self.current_tender(content.tender_id).await?;
        if !self.author_exists(content.author).await? {
            return Err(Error::element_not_exists());
        }

        let bid = Bid::from(BidDraft {
            id: BidId::random(),
            name: content.name,
            description: content.description,
            status: BidStatus::Created,
            tender_id: tender.id(),
            tender_version: tender.version(),
            author: content.author,
            version: 1,
            created_at: self.clock.utc(),
        });
        self.bids.insert(&bid).await.map_err(map_bid_error)?;
        info!(bid_id = %bid.id(), tender_id = %tender.id(), "bid created");
        Ok(bid)
    }

    async fn update_status(&self, request: UpdateBidStatusRequest) -> Result<Bid, Error> {
        let current = self.authored_bid(request.bid_id, &request.username).await?;
        let next = current.with_status(request.status);
        self.revise(&current, next).await
    }

    async fn edit(&self, request: EditBidRequest) -> Result<Bid, Error> {
        let current = self.authored_bid(request.bid_id, &request.username).await?;
        let patch = request.edit.validate()?;
        let next = current.edited(&patch);
        self.revise(&current, next).await
    }

    async fn rollback(&self, request: RollbackBidRequest) -> Result<Bid, Error> {
        let current = self.authored_bid(request.bid_id, &request.username).await?;
        let historical = self
            .bids
            .find_historical_version(request.bid_id, request.version)
            .await
            .map_err(map_bid_error)?
            .ok_or_else(Error::version_not_exists)?;
        let next = historical.restored_onto(current.version());
        self.revise(&current, next).await
    }

    async fn submit_decision(&self, request: SubmitDecisionRequest) -> Result<Bid, Error> {
        let bid = self.current_bid(request.bid_id).await?;
        let tender = self.current_tender(bid.tender_id()).await?;
        self.guard
            .authorize_for_organization(&request.username, tender.organization_id())
            .await?;

        if request.decision == BidDecision::Approved {
            let closed = tender.with_status(TenderStatus::Closed);
            self.tenders
                .append_version(&closed)
                .await
                .map_err(map_tender_error)?;
            info!(
                bid_id = %bid.id(),
                tender_id = %closed.id(),
                version = closed.version(),
                "bid approved; tender closed"
            );
        }
        Ok(bid)
    }
}

#[async_trait]
impl<B, T, I> BidQuery for BidService<B, T, I>
where
    B: BidRepository,
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn list_for_employee(&self, request: EmployeeBidsRequest) -> Result<Vec<Bid>, Error> {
        let employee_id = self.guard.resolve_employee(&request.username).await?;
        let organization = self
            .identity
            .find_organization_by_employee_id(employee_id)
            .await
            .map_err(map_identity_error)?;

        self.bids
            .list_by_author(
                employee_id,
                organization.map(|organization| organization.id),
                request.page,
            )
            .await
            .map_err(map_bid_error)
    }

    async fn list_for_tender(&self, request: TenderBidsRequest) -> Result<Vec<Bid>, Error> {
        let tender = self.current_tender(request.tender_id).await?;
        self.guard
            .authorize_for_organization(&request.username, tender.organization_id())
            .await?;

        self.bids
            .list_by_tender(tender.id(), request.page)
            .await
            .map_err(map_bid_error)
    }

    async fn status(&self, request: BidStatusRequest) -> Result<BidStatus, Error> {
        let current = self.authored_bid(request.bid_id, &request.username).await?;
        Ok(current.status())
    }
}

#[cfg(test)]
#[path = "bid_service_tests.rs"]
mod tests;
