//! Admin product CRUD and variant-option handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use atelier_core::{
    catalog, CatalogStore, NewProduct, NewVariantOption, Product, ProductUpdate, VariantKind,
    VariantOption,
};

use crate::middleware::RequestId;

use super::{map_domain_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_special: bool,
    pub special_price: Option<Decimal>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddVariantOptionRequest {
    pub kind: VariantKind,
    pub name: String,
    pub image: Option<String>,
    pub code: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/products — create a product.
pub(super) async fn create_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), ApiError> {
    let rid = &req_id.0;

    let new = NewProduct {
        name: body.name.trim().to_owned(),
        description: body.description,
        price: body.price,
        category: body.category.trim().to_owned(),
        stock: body.stock,
        images: body.images,
        is_special: body.is_special,
        special_price: body.special_price,
        is_featured: body.is_featured,
    };
    catalog::validate_new_product(&new).map_err(|e| map_domain_error(rid.clone(), &e))?;

    let product = state
        .store
        .create_product(new)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: product,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// PATCH /api/v1/admin/products/:id — sparse update.
///
/// The special-price invariant is validated against the state the update
/// would leave behind, with the pricing resolver as the authority.
pub(super) async fn update_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let rid = &req_id.0;

    let current = state
        .store
        .get_product(id)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    catalog::validate_product_update(&current, &update)
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    let product = state
        .store
        .update_product(id, update)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: product,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/admin/products/:id — delete a product; options and
/// reviews cascade.
pub(super) async fn delete_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;

    state
        .store
        .delete_product(id)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: serde_json::json!({ "deleted": true }),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/admin/products/:id/options — attach a fabric, color, or size.
pub(super) async fn add_variant_option(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<AddVariantOptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VariantOption>>), ApiError> {
    let rid = &req_id.0;

    let option = NewVariantOption {
        name: body.name.trim().to_owned(),
        image: body.image,
        code: body.code,
    };
    catalog::validate_variant_option(body.kind, &option)
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    let created = state
        .store
        .add_variant_option(product_id, body.kind, option)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: created,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// DELETE /api/v1/admin/options/:kind/:id — detach one option.
pub(super) async fn remove_variant_option(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let rid = &req_id.0;

    let kind: VariantKind = kind.parse().map_err(|e| map_domain_error(rid.clone(), &e))?;

    state
        .store
        .remove_variant_option(kind, id)
        .await
        .map_err(|e| map_domain_error(rid.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: serde_json::json!({ "deleted": true }),
        meta: ResponseMeta::new(req_id.0),
    }))
}
