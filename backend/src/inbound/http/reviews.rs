//! Bid feedback HTTP handlers.
//!
//! ```text
//! PUT /api/bids/{bidId}/feedback
//! GET /api/bids/{tenderId}/reviews
//! ```
//!
//! Both routes reject query keys they do not understand.

use actix_web::{get, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, Review};
use crate::domain::ports::{AuthorReviewsRequest, SubmitFeedbackRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bids::BidResponse;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::query::{QueryParams, parse_path};
use crate::inbound::http::state::HttpState;

const FEEDBACK_PARAMS: &[&str] = &["username", "bidFeedback"];
const REVIEW_PARAMS: &[&str] = &["authorUsername", "requesterUsername", "limit", "offset"];

/// Review representation. The reviewed bid is not disclosed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: *review.id.as_uuid(),
            description: review.description,
            created_at: review.created_at,
        }
    }
}

/// Leave feedback on a bid as the tender's owning organization.
#[utoipa::path(
    put,
    path = "/api/bids/{bidId}/feedback",
    params(
        ("bidId" = Uuid, Path, description = "Bid identifier"),
        ("bidFeedback" = String, Query, description = "Feedback text"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["reviews"],
    operation_id = "submitBidFeedback",
    responses(
        (status = 200, description = "The reviewed bid", body = BidResponse),
        (status = 400, description = "Invalid parameters or feedback", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the tender", body = ErrorResponse),
        (status = 404, description = "Unknown bid", body = ErrorResponse)
    )
)]
#[put("/bids/{bidId}/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<BidResponse>> {
    params.reject_unknown(FEEDBACK_PARAMS)?;
    let feedback = params
        .first("bidFeedback")
        .ok_or_else(|| Error::invalid_parameter("parameter `bidFeedback` is required"))?;
    let request = SubmitFeedbackRequest {
        bid_id: parse_path(&path, "bidId")?,
        username: params.required("username")?,
        feedback: feedback.to_owned(),
    };
    let bid = state.reviews.submit_feedback(request).await?;
    Ok(web::Json(BidResponse::from(bid)))
}

/// Feedback left on any bid by an author who bid on the given tender.
#[utoipa::path(
    get,
    path = "/api/bids/{tenderId}/reviews",
    params(
        ("tenderId" = Uuid, Path, description = "Tender the author bid on"),
        ("authorUsername" = String, Query, description = "Bid author"),
        ("requesterUsername" = String, Query, description = "Employee of the tender's organization"),
        ("limit" = Option<u32>, Query, description = "Page size, at least 1"),
        ("offset" = Option<u32>, Query, description = "Rows to skip")
    ),
    tags = ["reviews"],
    operation_id = "getBidReviews",
    responses(
        (status = 200, description = "Reviews ordered by text", body = [ReviewResponse]),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Requester not responsible for the tender", body = ErrorResponse),
        (status = 404, description = "Unknown tender or no bid by the author", body = ErrorResponse)
    )
)]
#[get("/bids/{tenderId}/reviews")]
pub async fn list_author_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    params.reject_unknown(REVIEW_PARAMS)?;
    let request = AuthorReviewsRequest {
        tender_id: parse_path(&path, "tenderId")?,
        author_username: params.required("authorUsername")?,
        requester_username: params.required("requesterUsername")?,
        page: params.page()?,
    };
    let reviews = state.reviews_query.list_by_bid_author(request).await?;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

#[cfg(test)]
#[path = "reviews_tests.rs"]
mod tests;
