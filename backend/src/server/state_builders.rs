//! Builders selecting the repositories behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use tenders::inbound::http::state::{HttpState, HttpStateRepositories};
use tenders::outbound::memory::InMemoryProcurementStore;
use tenders::outbound::persistence::{
    DbPool, DieselBidRepository, DieselIdentityRepository, DieselReviewRepository,
    DieselTenderRepository,
};

use super::ServerConfig;

fn diesel_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repositories(
        HttpStateRepositories {
            tenders: Arc::new(DieselTenderRepository::new(pool.clone())),
            bids: Arc::new(DieselBidRepository::new(pool.clone())),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
            identity: Arc::new(DieselIdentityRepository::new(pool.clone())),
        },
        clock,
    )
}

fn memory_state(store: Arc<InMemoryProcurementStore>, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_repositories(
        HttpStateRepositories {
            tenders: Arc::clone(&store),
            bids: Arc::clone(&store),
            reviews: Arc::clone(&store),
            identity: store,
        },
        clock,
    )
}

/// Build the shared HTTP state, preferring PostgreSQL when a pool exists.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => diesel_state(pool, clock),
        None => {
            warn!("no database configured; serving from an empty in-memory store");
            memory_state(Arc::new(InMemoryProcurementStore::new()), clock)
        }
    };
    web::Data::new(state)
}
