//! HTTP inbound adapter exposing the procurement REST endpoints.

pub mod bids;
pub mod error;
pub mod health;
pub mod query;
pub mod reviews;
pub mod state;
pub mod tenders;
#[cfg(test)]
pub mod test_utils;

use actix_web::{Scope, error::JsonPayloadError, web};

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor configuration turning malformed bodies into
/// `InvalidParameter` errors with the usual `{"reason": ...}` body.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req| {
        Error::invalid_parameter(format!("invalid request body: {err}")).into()
    })
}

/// Every `/api` route.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use tenders::inbound::http::{api_scope, json_config};
///
/// let _app = App::new().app_data(json_config()).service(api_scope());
/// ```
#[must_use]
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(health::ping)
        .service(tenders::create_tender)
        .service(tenders::list_published_tenders)
        .service(tenders::list_my_tenders)
        .service(tenders::get_tender_status)
        .service(tenders::update_tender_status)
        .service(tenders::edit_tender)
        .service(tenders::rollback_tender)
        .service(bids::create_bid)
        .service(bids::list_my_bids)
        .service(bids::list_tender_bids)
        .service(bids::get_bid_status)
        .service(bids::update_bid_status)
        .service(bids::edit_bid)
        .service(bids::submit_decision)
        .service(bids::rollback_bid)
        .service(reviews::submit_feedback)
        .service(reviews::list_author_reviews)
}
