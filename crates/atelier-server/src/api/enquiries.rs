//! Public enquiry submission and the admin status handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use atelier_core::{
    enquiry, CatalogStore, Enquiry, EnquiryForm, EnquiryNotifier, EnquiryStatus, Selection,
};

use crate::middleware::RequestId;

use super::{map_domain_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CreateEnquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateEnquiryStatusRequest {
    pub status: String,
}

/// POST /api/v1/products/:id/enquiries — validate, persist, then relay.
///
/// The record is written first; the relay call comes after, so a failed
/// relay leaves the enquiry stored for the admin dashboard and the visitor
/// sees the channel error.
pub(super) async fn create_enquiry(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<CreateEnquiryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Enquiry>>), ApiError> {
    let rid = &req_id.0;

    let product = state
        .store
        .get_product(product_id)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    let form = EnquiryForm {
        name: body.name,
        email: body.email,
        phone: body.phone,
        message: body.message,
    };
    let selection = Selection {
        fabric: body.fabric,
        color: body.color,
    };

    let draft = enquiry::validate_submission(&form, &product, &selection)
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    let stored = state
        .store
        .create_enquiry(draft.clone())
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    state
        .notifier
        .notify(&draft)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: stored,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// GET /api/v1/admin/enquiries — all enquiries, newest first.
pub(super) async fn list_enquiries(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<Enquiry>>>, ApiError> {
    let enquiries = state
        .store
        .list_enquiries()
        .await
        .map_err(|e| map_domain_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: enquiries,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// PATCH /api/v1/admin/enquiries/:id/status — move an enquiry through the
/// state machine.
pub(super) async fn update_enquiry_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEnquiryStatusRequest>,
) -> Result<Json<ApiResponse<Enquiry>>, ApiError> {
    let rid = &req_id.0;

    let status: EnquiryStatus = body
        .status
        .parse()
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    let updated = state
        .store
        .update_enquiry_status(id, status)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: updated,
        meta: ResponseMeta::new(req_id.0),
    }))
}
