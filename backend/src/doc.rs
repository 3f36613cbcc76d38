//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api` route plus the health probes, and the
//! request/response bodies they exchange. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{AuthorType, BidDecision, BidStatus, ServiceType, TenderStatus};
use crate::inbound::http::bids::{BidResponse, CreateBidRequestBody, EditBidRequestBody};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::reviews::ReviewResponse;
use crate::inbound::http::tenders::{
    CreateTenderRequestBody, EditTenderRequestBody, TenderResponse,
};

/// OpenAPI document for the procurement API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tenders API",
        description = "Versioned tenders, bids and bid feedback for procuring organizations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::tenders::create_tender,
        crate::inbound::http::tenders::list_published_tenders,
        crate::inbound::http::tenders::list_my_tenders,
        crate::inbound::http::tenders::get_tender_status,
        crate::inbound::http::tenders::update_tender_status,
        crate::inbound::http::tenders::edit_tender,
        crate::inbound::http::tenders::rollback_tender,
        crate::inbound::http::bids::create_bid,
        crate::inbound::http::bids::list_my_bids,
        crate::inbound::http::bids::list_tender_bids,
        crate::inbound::http::bids::get_bid_status,
        crate::inbound::http::bids::update_bid_status,
        crate::inbound::http::bids::edit_bid,
        crate::inbound::http::bids::submit_decision,
        crate::inbound::http::bids::rollback_bid,
        crate::inbound::http::reviews::submit_feedback,
        crate::inbound::http::reviews::list_author_reviews,
    ),
    components(schemas(
        ErrorResponse,
        TenderResponse,
        CreateTenderRequestBody,
        EditTenderRequestBody,
        BidResponse,
        CreateBidRequestBody,
        EditBidRequestBody,
        ReviewResponse,
        ServiceType,
        TenderStatus,
        BidStatus,
        BidDecision,
        AuthorType,
    )),
    tags(
        (name = "tenders", description = "Tender lifecycle"),
        (name = "bids", description = "Bid lifecycle and decisions"),
        (name = "reviews", description = "Feedback on bids"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
