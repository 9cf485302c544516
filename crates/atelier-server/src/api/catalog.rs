//! Public catalog read handlers.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_core::{filter, pricing, rating, CatalogStore, Product};

use crate::middleware::RequestId;

use super::{map_domain_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// A catalog product plus the derived display values the cards render from.
#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    #[serde(flatten)]
    product: Product,
    average_rating: f64,
    effective_price: Decimal,
    discount_percent: u8,
}

impl ProductItem {
    fn from_product(product: Product) -> Self {
        let average_rating = rating::average_rating(&product.reviews);
        let effective_price = pricing::effective_price(&product);
        let discount_percent = pricing::discount_percent(&product);
        Self {
            product,
            average_rating,
            effective_price,
            discount_percent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CatalogQuery {
    pub category: Option<String>,
    pub sale: Option<bool>,
    pub featured: Option<bool>,
}

/// GET /api/v1/products — the nested catalog, filtered per query.
///
/// `sale=true` and `featured=true` are whole-catalog views, matching the
/// storefront's category grid; otherwise `category` filters exactly, with
/// the `All` sentinel (and no parameter) passing everything through.
pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| map_domain_error(req_id.0.clone(), &e))?;

    let view: Vec<&Product> = if query.sale.unwrap_or(false) {
        filter::sale_only(&products)
    } else if query.featured.unwrap_or(false) {
        filter::featured_only(&products)
    } else {
        let category = query.category.as_deref().unwrap_or(filter::ALL_CATEGORIES);
        filter::by_category(&products, category)
    };

    let data = view
        .into_iter()
        .cloned()
        .map(ProductItem::from_product)
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/products/:id — one product with nested options and reviews.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductItem>>, ApiError> {
    let product = state
        .store
        .get_product(id)
        .await
        .map_err(|e| map_domain_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ProductItem::from_product(product),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/categories — distinct categories with "All" first, derived
/// from the current catalog snapshot.
pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| map_domain_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: filter::distinct_categories(&products),
        meta: ResponseMeta::new(req_id.0),
    }))
}
