//! Procurement domain: tenders, bids, reviews and the policies between them.
//!
//! Purpose: define strongly typed entities, the driving and driven ports, and
//! the services implementing the versioned lifecycle. Nothing here depends
//! on HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`) with its closed `ErrorCode` taxonomy.
//! - Tender, Bid, Review and their identifiers, labels and request shapes.
//! - TenderService, BidService, ReviewService implementing the driving ports.

mod authorization;
mod bid;
mod bid_service;
pub mod error;
mod identity;
pub mod labels;
pub mod ports;
mod repository_errors;
mod review;
mod review_service;
#[cfg(test)]
mod service_fixtures;
mod tender;
mod tender_service;
pub mod trace_id;
mod validation;

pub use self::authorization::AuthorizationGuard;
pub use self::bid::{
    AuthorType, Bid, BidAuthor, BidContent, BidDecision, BidDraft, BidEdit, BidId, BidPatch,
    BidStatus, NewBid,
};
pub use self::bid_service::BidService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Employee, EmployeeId, Organization, OrganizationId};
pub use self::labels::UnknownLabel;
pub use self::review::{BidFeedback, Review, ReviewId};
pub use self::review_service::ReviewService;
pub use self::tender::{
    NewTender, ServiceType, Tender, TenderContent, TenderDraft, TenderEdit, TenderId,
    TenderPatch, TenderStatus,
};
pub use self::tender_service::TenderService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::{DESCRIPTION_MAX_CHARS, FEEDBACK_MAX_CHARS, NAME_MAX_CHARS};
