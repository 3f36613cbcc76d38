//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into `{"reason": ...}` bodies with a
//! status chosen per error kind.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Reason surfaced to clients in place of internal failure details.
pub(crate) const INTERNAL_REASON: &str = "Internal server error";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure reason.
    pub reason: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError | ErrorCode::InvalidParameter => StatusCode::BAD_REQUEST,
        ErrorCode::UserNotExists => StatusCode::UNAUTHORIZED,
        ErrorCode::UnauthorizedAccess => StatusCode::FORBIDDEN,
        ErrorCode::TenderNotExists
        | ErrorCode::BidNotExists
        | ErrorCode::VersionNotExists
        | ErrorCode::ElementNotExists
        | ErrorCode::BidForTenderNotExists => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reason_for(error: &Error) -> String {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_REASON.to_owned()
    } else {
        error.message().to_owned()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = self.message(), "request failed with internal error");
        }

        let mut builder = HttpResponse::build(self.status_code());
        let trace_id = self
            .trace_id()
            .map(str::to_owned)
            .or_else(|| TraceId::current().map(|id| id.to_string()));
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id));
        }

        builder.json(ErrorResponse {
            reason: reason_for(self),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_REASON)
    }
}
