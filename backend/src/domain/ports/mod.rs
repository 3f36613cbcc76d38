//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by the domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod bid_command;
mod bid_query;
mod bid_repository;
mod identity_repository;
mod review_command;
mod review_query;
mod review_repository;
mod tender_command;
mod tender_query;
mod tender_repository;

#[cfg(test)]
pub use bid_command::MockBidCommand;
pub use bid_command::{
    BidCommand, EditBidRequest, RollbackBidRequest, SubmitDecisionRequest, UpdateBidStatusRequest,
};
#[cfg(test)]
pub use bid_query::MockBidQuery;
pub use bid_query::{BidQuery, BidStatusRequest, EmployeeBidsRequest, TenderBidsRequest};
#[cfg(test)]
pub use bid_repository::MockBidRepository;
pub use bid_repository::{BidRepository, BidRepositoryError};
#[cfg(test)]
pub use identity_repository::MockIdentityRepository;
pub use identity_repository::{IdentityRepository, IdentityRepositoryError};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{ReviewCommand, SubmitFeedbackRequest};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{AuthorReviewsRequest, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
#[cfg(test)]
pub use tender_command::MockTenderCommand;
pub use tender_command::{
    EditTenderRequest, RollbackTenderRequest, TenderCommand, UpdateTenderStatusRequest,
};
#[cfg(test)]
pub use tender_query::MockTenderQuery;
pub use tender_query::{
    EmployeeTendersRequest, PublishedTendersRequest, TenderQuery, TenderStatusRequest,
};
#[cfg(test)]
pub use tender_repository::MockTenderRepository;
pub use tender_repository::{TenderRepository, TenderRepositoryError};
