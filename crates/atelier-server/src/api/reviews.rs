//! Public review submission handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use atelier_core::{catalog, CatalogStore, NewReview, Review};

use crate::middleware::RequestId;

use super::{map_domain_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CreateReviewRequest {
    pub author: String,
    pub comment: Option<String>,
    pub rating: i16,
}

/// POST /api/v1/products/:id/reviews — store a visitor review.
pub(super) async fn create_review(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Review>>), ApiError> {
    let rid = &req_id.0;

    let new_review = NewReview {
        author: body.author.trim().to_owned(),
        comment: body
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToOwned::to_owned),
        rating: body.rating,
    };
    catalog::validate_new_review(&new_review).map_err(|e| map_domain_error(rid.clone(), &e))?;

    let review = state
        .store
        .create_review(product_id, new_review)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: review,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
