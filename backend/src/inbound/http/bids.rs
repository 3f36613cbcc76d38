//! Bid HTTP handlers.
//!
//! ```text
//! POST  /api/bids/new
//! GET   /api/bids/my
//! GET   /api/bids/{tenderId}/list
//! GET   /api/bids/{bidId}/status
//! PUT   /api/bids/{bidId}/status
//! PATCH /api/bids/{bidId}/edit
//! PUT   /api/bids/{bidId}/submit_decision
//! PUT   /api/bids/{bidId}/rollback/{version}
//! ```

use actix_web::{HttpResponse, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    BidStatusRequest, EditBidRequest, EmployeeBidsRequest, RollbackBidRequest,
    SubmitDecisionRequest, TenderBidsRequest, UpdateBidStatusRequest,
};
use crate::domain::{AuthorType, Bid, BidDecision, BidEdit, BidId, BidStatus, NewBid};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::query::{QueryParams, parse_path};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tenders::plain_status;

/// Request payload for creating a bid.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequestBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(format = "uuid")]
    pub tender_id: String,
    #[serde(default)]
    #[schema(value_type = AuthorType)]
    pub author_type: String,
    #[serde(default)]
    #[schema(format = "uuid")]
    pub author_id: String,
}

/// Partial bid edit; absent or empty fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditBidRequestBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Bid representation returned by the bid and feedback routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: BidStatus,
    pub tender_id: Uuid,
    pub tender_version: u32,
    pub author_type: AuthorType,
    pub author_id: Uuid,
    pub version: u32,
    pub created_at: DateTime<Utc>,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        let author = bid.author();
        Self {
            id: *bid.id().as_uuid(),
            name: bid.name().to_owned(),
            description: bid.description().to_owned(),
            status: bid.status(),
            tender_id: *bid.tender_id().as_uuid(),
            tender_version: bid.tender_version(),
            author_type: author.author_type(),
            author_id: author.id(),
            version: bid.version(),
            created_at: bid.created_at(),
        }
    }
}

fn into_responses(bids: Vec<Bid>) -> Vec<BidResponse> {
    bids.into_iter().map(BidResponse::from).collect()
}

/// Create a bid against the current tender version.
#[utoipa::path(
    post,
    path = "/api/bids/new",
    request_body = CreateBidRequestBody,
    tags = ["bids"],
    operation_id = "createBid",
    responses(
        (status = 200, description = "Bid created", body = BidResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown tender or author", body = ErrorResponse)
    )
)]
#[post("/bids/new")]
pub async fn create_bid(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBidRequestBody>,
) -> ApiResult<web::Json<BidResponse>> {
    let body = payload.into_inner();
    let bid = state
        .bids
        .create(NewBid {
            name: body.name,
            description: body.description,
            tender_id: body.tender_id,
            author_type: body.author_type,
            author_id: body.author_id,
        })
        .await?;
    Ok(web::Json(BidResponse::from(bid)))
}

/// Bids authored by the caller or the caller's organization.
#[utoipa::path(
    get,
    path = "/api/bids/my",
    params(
        ("username" = String, Query, description = "Acting employee"),
        ("limit" = Option<u32>, Query, description = "Page size, at least 1"),
        ("offset" = Option<u32>, Query, description = "Rows to skip")
    ),
    tags = ["bids"],
    operation_id = "getUserBids",
    responses(
        (status = 200, description = "Bids ordered by name", body = [BidResponse]),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse)
    )
)]
#[get("/bids/my")]
pub async fn list_my_bids(
    state: web::Data<HttpState>,
    params: QueryParams,
) -> ApiResult<web::Json<Vec<BidResponse>>> {
    let request = EmployeeBidsRequest {
        username: params.required("username")?,
        page: params.page()?,
    };
    let bids = state.bids_query.list_for_employee(request).await?;
    Ok(web::Json(into_responses(bids)))
}

/// Bids placed against a tender, visible to its owning organization.
#[utoipa::path(
    get,
    path = "/api/bids/{tenderId}/list",
    params(
        ("tenderId" = Uuid, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting employee"),
        ("limit" = Option<u32>, Query, description = "Page size, at least 1"),
        ("offset" = Option<u32>, Query, description = "Rows to skip")
    ),
    tags = ["bids"],
    operation_id = "getBidsForTender",
    responses(
        (status = 200, description = "Bids ordered by name", body = [BidResponse]),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the tender", body = ErrorResponse),
        (status = 404, description = "Unknown tender", body = ErrorResponse)
    )
)]
#[get("/bids/{tenderId}/list")]
pub async fn list_tender_bids(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<Vec<BidResponse>>> {
    let request = TenderBidsRequest {
        tender_id: parse_path(&path, "tenderId")?,
        username: params.required("username")?,
        page: params.page()?,
    };
    let bids = state.bids_query.list_for_tender(request).await?;
    Ok(web::Json(into_responses(bids)))
}

/// Current bid status as plain text, visible to the author.
#[utoipa::path(
    get,
    path = "/api/bids/{bidId}/status",
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["bids"],
    operation_id = "getBidStatus",
    responses(
        (status = 200, description = "Current status", body = BidStatus, content_type = "text/plain"),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not the bid author", body = ErrorResponse),
        (status = 404, description = "Unknown bid", body = ErrorResponse)
    )
)]
#[get("/bids/{bidId}/status")]
pub async fn get_bid_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<HttpResponse> {
    let request = BidStatusRequest {
        bid_id: parse_path::<BidId>(&path, "bidId")?,
        username: params.required("username")?,
    };
    let status = state.bids_query.status(request).await?;
    Ok(plain_status(status.as_str()))
}

/// Store a new bid version with the requested status.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/status",
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("status" = BidStatus, Query, description = "Target status"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["bids"],
    operation_id = "updateBidStatus",
    responses(
        (status = 200, description = "Updated bid", body = BidResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not the bid author", body = ErrorResponse),
        (status = 404, description = "Unknown bid", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse)
    )
)]
#[put("/bids/{bidId}/status")]
pub async fn update_bid_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<BidResponse>> {
    let request = UpdateBidStatusRequest {
        bid_id: parse_path(&path, "bidId")?,
        status: params.required_parsed("status")?,
        username: params.required("username")?,
    };
    let bid = state.bids.update_status(request).await?;
    Ok(web::Json(BidResponse::from(bid)))
}

/// Replace the provided bid fields in a new version.
#[utoipa::path(
    patch,
    path = "/api/bids/{bidId}/edit",
    request_body = EditBidRequestBody,
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["bids"],
    operation_id = "editBid",
    responses(
        (status = 200, description = "Edited bid", body = BidResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not the bid author", body = ErrorResponse),
        (status = 404, description = "Unknown bid", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse)
    )
)]
#[patch("/bids/{bidId}/edit")]
pub async fn edit_bid(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
    payload: web::Json<EditBidRequestBody>,
) -> ApiResult<web::Json<BidResponse>> {
    let body = payload.into_inner();
    let request = EditBidRequest {
        bid_id: parse_path(&path, "bidId")?,
        username: params.required("username")?,
        edit: BidEdit {
            name: body.name,
            description: body.description,
        },
    };
    let bid = state.bids.edit(request).await?;
    Ok(web::Json(BidResponse::from(bid)))
}

/// Record the tender owner's decision; approval closes the tender.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/submit_decision",
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("decision" = BidDecision, Query, description = "Decision on the bid"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["bids"],
    operation_id = "submitBidDecision",
    responses(
        (status = 200, description = "The bid, unchanged", body = BidResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the tender", body = ErrorResponse),
        (status = 404, description = "Unknown bid or tender", body = ErrorResponse)
    )
)]
#[put("/bids/{bidId}/submit_decision")]
pub async fn submit_decision(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<BidResponse>> {
    let request = SubmitDecisionRequest {
        bid_id: parse_path(&path, "bidId")?,
        decision: params.required_parsed("decision")?,
        username: params.required("username")?,
    };
    let bid = state.bids.submit_decision(request).await?;
    Ok(web::Json(BidResponse::from(bid)))
}

/// Copy a historical bid version on top of the current one.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/rollback/{version}",
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("version" = u32, Path, description = "Version to restore"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["bids"],
    operation_id = "rollbackBid",
    responses(
        (status = 200, description = "Restored bid", body = BidResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not the bid author", body = ErrorResponse),
        (status = 404, description = "Unknown bid or version", body = ErrorResponse),
        (status = 409, description = "Concurrent modification", body = ErrorResponse)
    )
)]
#[put("/bids/{bidId}/rollback/{version}")]
pub async fn rollback_bid(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    params: QueryParams,
) -> ApiResult<web::Json<BidResponse>> {
    let (bid_id, version) = path.into_inner();
    let request = RollbackBidRequest {
        bid_id: parse_path(&bid_id, "bidId")?,
        version: parse_path(&version, "version")?,
        username: params.required("username")?,
    };
    let bid = state.bids.rollback(request).await?;
    Ok(web::Json(BidResponse::from(bid)))
}

#[cfg(test)]
#[path = "bids_tests.rs"]
mod tests;
