//! Tender HTTP handlers.
//!
//! ```text
//! POST  /api/tenders/new
//! GET   /api/tenders
//! GET   /api/tenders/my
//! GET   /api/tenders/{tenderId}/status
//! PUT   /api/tenders/{tenderId}/status
//! PATCH /api/tenders/{tenderId}/edit
//! PUT   /api/tenders/{tenderId}/rollback/{version}
//! ```

use actix_web::{HttpResponse, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    EditTenderRequest, EmployeeTendersRequest, PublishedTendersRequest, RollbackTenderRequest,
    TenderStatusRequest, UpdateTenderStatusRequest,
};
use crate::domain::{NewTender, ServiceType, Tender, TenderEdit, TenderId, TenderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::query::{QueryParams, parse_path};
use crate::inbound::http::state::HttpState;

/// Request payload for creating a tender.
///
/// Missing text fields deserialize as empty so the domain reports them
/// together in one validation error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderRequestBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(value_type = ServiceType)]
    pub service_type: String,
    #[serde(default)]
    #[schema(format = "uuid")]
    pub organization_id: String,
    #[serde(default)]
    pub creator_username: String,
}

/// Partial tender edit; absent or empty fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderRequestBody {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<ServiceType>)]
    pub service_type: Option<String>,
}

/// Tender representation returned by every tender route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub status: TenderStatus,
    pub version: u32,
    pub organization_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        Self {
            id: *tender.id().as_uuid(),
            name: tender.name().to_owned(),
            description: tender.description().to_owned(),
            service_type: tender.service_type(),
            status: tender.status(),
            version: tender.version(),
            organization_id: *tender.organization_id().as_uuid(),
            created_at: tender.created_at(),
        }
    }
}

fn into_responses(tenders: Vec<Tender>) -> Vec<TenderResponse> {
    tenders.into_iter().map(TenderResponse::from).collect()
}

pub(crate) fn plain_status(label: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(label.to_owned())
}

/// Create a tender at version 1.
#[utoipa::path(
    post,
    path = "/api/tenders/new",
    request_body = CreateTenderRequestBody,
    tags = ["tenders"],
    operation_id = "createTender",
    responses(
        (status = 200, description = "Tender created", body = TenderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the organization", body = ErrorResponse)
    )
)]
#[post("/tenders/new")]
pub async fn create_tender(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTenderRequestBody>,
) -> ApiResult<web::Json<TenderResponse>> {
    let body = payload.into_inner();
    let tender = state
        .tenders
        .create(NewTender {
            name: body.name,
            description: body.description,
            service_type: body.service_type,
            organization_id: body.organization_id,
            creator_username: body.creator_username,
        })
        .await?;
    Ok(web::Json(TenderResponse::from(tender)))
}

/// Published tenders, optionally filtered by repeated `service_type` keys.
#[utoipa::path(
    get,
    path = "/api/tenders",
    params(
        ("service_type" = Option<Vec<ServiceType>>, Query, description = "Service types to include"),
        ("limit" = Option<u32>, Query, description = "Page size, at least 1"),
        ("offset" = Option<u32>, Query, description = "Rows to skip")
    ),
    tags = ["tenders"],
    operation_id = "getTenders",
    responses(
        (status = 200, description = "Published tenders ordered by name", body = [TenderResponse]),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    )
)]
#[get("/tenders")]
pub async fn list_published_tenders(
    state: web::Data<HttpState>,
    params: QueryParams,
) -> ApiResult<web::Json<Vec<TenderResponse>>> {
    let request = PublishedTendersRequest {
        service_types: params.all_parsed("service_type")?,
        page: params.page()?,
    };
    let tenders = state.tenders_query.list_published(request).await?;
    Ok(web::Json(into_responses(tenders)))
}

/// Tenders owned by the caller's organization, in every status.
#[utoipa::path(
    get,
    path = "/api/tenders/my",
    params(
        ("username" = String, Query, description = "Acting employee"),
        ("limit" = Option<u32>, Query, description = "Page size, at least 1"),
        ("offset" = Option<u32>, Query, description = "Rows to skip")
    ),
    tags = ["tenders"],
    operation_id = "getUserTenders",
    responses(
        (status = 200, description = "Organization tenders ordered by name", body = [TenderResponse]),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse)
    )
)]
#[get("/tenders/my")]
pub async fn list_my_tenders(
    state: web::Data<HttpState>,
    params: QueryParams,
) -> ApiResult<web::Json<Vec<TenderResponse>>> {
    let request = EmployeeTendersRequest {
        username: params.required("username")?,
        page: params.page()?,
    };
    let tenders = state.tenders_query.list_for_employee(request).await?;
    Ok(web::Json(into_responses(tenders)))
}

/// Current tender status as plain text.
///
/// Anonymous callers only see published tenders.
#[utoipa::path(
    get,
    path = "/api/tenders/{tenderId}/status",
    params(
        ("tenderId" = Uuid, Path, description = "Tender identifier"),
        ("username" = Option<String>, Query, description = "Acting employee")
    ),
    tags = ["tenders"],
    operation_id = "getTenderStatus",
    responses(
        (status = 200, description = "Current status", body = TenderStatus, content_type = "text/plain"),
        (status = 403, description = "Not visible to the caller", body = ErrorResponse),
        (status = 404, description = "Unknown tender", body = ErrorResponse)
    )
)]
#[get("/tenders/{tenderId}/status")]
pub async fn get_tender_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<HttpResponse> {
    let request = TenderStatusRequest {
        tender_id: parse_path::<TenderId>(&path, "tenderId")?,
        username: params.non_blank("username").map(str::to_owned),
    };
    let status = state.tenders_query.status(request).await?;
    Ok(plain_status(status.as_str()))
}

/// Store a new version with the requested status.
#[utoipa::path(
    put,
    path = "/api/tenders/{tenderId}/status",
    params(
        ("tenderId" = Uuid, Path, description = "Tender identifier"),
        ("status" = TenderStatus, Query, description = "Target status"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["tenders"],
    operation_id = "updateTenderStatus",
    responses(
        (status = 200, description = "Updated tender", body = TenderResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the organization", body = ErrorResponse),
        (status = 404, description = "Unknown tender", body = ErrorResponse)
    )
)]
#[put("/tenders/{tenderId}/status")]
pub async fn update_tender_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
) -> ApiResult<web::Json<TenderResponse>> {
    let request = UpdateTenderStatusRequest {
        tender_id: parse_path(&path, "tenderId")?,
        status: params.required_parsed("status")?,
        username: params.required("username")?,
    };
    let tender = state.tenders.update_status(request).await?;
    Ok(web::Json(TenderResponse::from(tender)))
}

/// Replace the provided tender fields in a new version.
#[utoipa::path(
    patch,
    path = "/api/tenders/{tenderId}/edit",
    request_body = EditTenderRequestBody,
    params(
        ("tenderId" = Uuid, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["tenders"],
    operation_id = "editTender",
    responses(
        (status = 200, description = "Edited tender", body = TenderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the organization", body = ErrorResponse),
        (status = 404, description = "Unknown tender", body = ErrorResponse)
    )
)]
#[patch("/tenders/{tenderId}/edit")]
pub async fn edit_tender(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: QueryParams,
    payload: web::Json<EditTenderRequestBody>,
) -> ApiResult<web::Json<TenderResponse>> {
    let body = payload.into_inner();
    let request = EditTenderRequest {
        tender_id: parse_path(&path, "tenderId")?,
        username: params.required("username")?,
        edit: TenderEdit {
            name: body.name,
            description: body.description,
            service_type: body.service_type,
        },
    };
    let tender = state.tenders.edit(request).await?;
    Ok(web::Json(TenderResponse::from(tender)))
}

/// Copy a historical version on top of the latest one.
#[utoipa::path(
    put,
    path = "/api/tenders/{tenderId}/rollback/{version}",
    params(
        ("tenderId" = Uuid, Path, description = "Tender identifier"),
        ("version" = u32, Path, description = "Version to restore"),
        ("username" = String, Query, description = "Acting employee")
    ),
    tags = ["tenders"],
    operation_id = "rollbackTender",
    responses(
        (status = 200, description = "Restored tender", body = TenderResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 401, description = "Unknown user", body = ErrorResponse),
        (status = 403, description = "Not responsible for the organization", body = ErrorResponse),
        (status = 404, description = "Unknown tender or version", body = ErrorResponse)
    )
)]
#[put("/tenders/{tenderId}/rollback/{version}")]
pub async fn rollback_tender(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    params: QueryParams,
) -> ApiResult<web::Json<TenderResponse>> {
    let (tender_id, version) = path.into_inner();
    let request = RollbackTenderRequest {
        tender_id: parse_path(&tender_id, "tenderId")?,
        version: parse_path(&version, "version")?,
        username: params.required("username")?,
    };
    let tender = state.tenders.rollback(request).await?;
    Ok(web::Json(TenderResponse::from(tender)))
}

#[cfg(test)]
#[path = "tenders_tests.rs"]
mod tests;
