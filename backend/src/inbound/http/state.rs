//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    BidCommand, BidQuery, BidRepository, IdentityRepository, ReviewCommand, ReviewQuery,
    ReviewRepository, TenderCommand, TenderQuery, TenderRepository,
};
use crate::domain::{BidService, ReviewService, TenderService};

/// Driven adapters the lifecycle services are built from.
pub struct HttpStateRepositories<T, B, R, I> {
    pub tenders: Arc<T>,
    pub bids: Arc<B>,
    pub reviews: Arc<R>,
    pub identity: Arc<I>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tenders: Arc<dyn TenderCommand>,
    pub tenders_query: Arc<dyn TenderQuery>,
    pub bids: Arc<dyn BidCommand>,
    pub bids_query: Arc<dyn BidQuery>,
    pub reviews: Arc<dyn ReviewCommand>,
    pub reviews_query: Arc<dyn ReviewQuery>,
}

impl HttpState {
    /// Wire the tender, bid and review services over one set of adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use tenders::inbound::http::state::{HttpState, HttpStateRepositories};
    /// use tenders::outbound::memory::InMemoryProcurementStore;
    ///
    /// let store = Arc::new(InMemoryProcurementStore::new());
    /// let state = HttpState::from_repositories(
    ///     HttpStateRepositories {
    ///         tenders: Arc::clone(&store),
    ///         bids: Arc::clone(&store),
    ///         reviews: Arc::clone(&store),
    ///         identity: store,
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// let _tenders = state.tenders.clone();
    /// ```
    pub fn from_repositories<T, B, R, I>(
        repositories: HttpStateRepositories<T, B, R, I>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        T: TenderRepository + 'static,
        B: BidRepository + 'static,
        R: ReviewRepository + 'static,
        I: IdentityRepository + 'static,
    {
        let HttpStateRepositories {
            tenders,
            bids,
            reviews,
            identity,
        } = repositories;

        let tender_service = Arc::new(TenderService::new(
            Arc::clone(&tenders),
            Arc::clone(&identity),
            Arc::clone(&clock),
        ));
        let bid_service = Arc::new(BidService::new(
            Arc::clone(&bids),
            Arc::clone(&tenders),
            Arc::clone(&identity),
            Arc::clone(&clock),
        ));
        let review_service = Arc::new(ReviewService::new(
            reviews, bids, tenders, identity, clock,
        ));

        Self {
            tenders: tender_service.clone(),
            tenders_query: tender_service,
            bids: bid_service.clone(),
            bids_query: bid_service,
            reviews: review_service.clone(),
            reviews_query: review_service,
        }
    }
}
