//! Translation of driven-port failures into domain errors.
//!
//! Persistence failures surface as internal errors; the HTTP adapter redacts
//! their messages. Version conflicts keep their own kind so callers can retry.

use super::Error;
use super::ports::{
    BidRepositoryError, IdentityRepositoryError, ReviewRepositoryError, TenderRepositoryError,
};

pub(crate) fn map_tender_error(error: TenderRepositoryError) -> Error {
    match error {
        TenderRepositoryError::Connection { message } => {
            Error::internal(format!("tender repository unavailable: {message}"))
        }
        TenderRepositoryError::Query { message } => {
            Error::internal(format!("tender repository error: {message}"))
        }
        TenderRepositoryError::VersionConflict { version } => Error::conflict(format!(
            "tender version {version} was written concurrently; retry the request"
        )),
    }
}

pub(crate) fn map_bid_error(error: BidRepositoryError) -> Error {
    match error {
        BidRepositoryError::Connection { message } => {
            Error::internal(format!("bid repository unavailable: {message}"))
        }
        BidRepositoryError::Query { message } => {
            Error::internal(format!("bid repository error: {message}"))
        }
        BidRepositoryError::VersionConflict { version } => Error::conflict(format!(
            "bid version {version} was changed concurrently; retry the request"
        )),
    }
}

pub(crate) fn map_review_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::internal(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

pub(crate) fn map_identity_error(error: IdentityRepositoryError) -> Error {
    match error {
        IdentityRepositoryError::Connection { message } => {
            Error::internal(format!("identity directory unavailable: {message}"))
        }
        IdentityRepositoryError::Query { message } => {
            Error::internal(format!("identity directory error: {message}"))
        }
    }
}
