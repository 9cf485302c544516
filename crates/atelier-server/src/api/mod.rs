mod admin_products;
mod catalog;
mod enquiries;
mod reviews;

use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use atelier_core::DomainError;
use atelier_db::PgCatalogStore;

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};
use crate::notifier::WebhookNotifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub store: PgCatalogStore,
    pub notifier: WebhookNotifier,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" | "invalid_transition" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "channel_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a domain error onto the wire envelope. Store failures are logged and
/// collapsed to an opaque internal error.
pub(super) fn map_domain_error(request_id: String, error: &DomainError) -> ApiError {
    match error {
        DomainError::Validation(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        DomainError::NotFound => ApiError::new(request_id, "not_found", "record not found"),
        DomainError::InvalidTransition { .. } => {
            ApiError::new(request_id, "invalid_transition", error.to_string())
        }
        DomainError::Channel(message) => {
            tracing::warn!(error = %message, "enquiry relay failed");
            ApiError::new(
                request_id,
                "channel_error",
                "could not deliver the enquiry notification; try again later",
            )
        }
        DomainError::Store(message) => {
            tracing::error!(error = %message, "store operation failed");
            ApiError::new(request_id, "internal_error", "store operation failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

#[must_use]
pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

fn admin_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/products",
            post(admin_products::create_product),
        )
        .route(
            "/api/v1/admin/products/{id}",
            patch(admin_products::update_product).delete(admin_products::delete_product),
        )
        .route(
            "/api/v1/admin/products/{id}/options",
            post(admin_products::add_variant_option),
        )
        .route(
            "/api/v1/admin/options/{kind}/{id}",
            delete(admin_products::remove_variant_option),
        )
        .route("/api/v1/admin/enquiries", get(enquiries::list_enquiries))
        .route(
            "/api/v1/admin/enquiries/{id}/status",
            patch(enquiries::update_enquiry_status),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(catalog::list_products))
        .route("/api/v1/products/{id}", get(catalog::get_product))
        .route("/api/v1/categories", get(catalog::list_categories))
        .route(
            "/api/v1/products/{id}/reviews",
            post(reviews::create_review),
        )
        .route(
            "/api/v1/products/{id}/enquiries",
            post(enquiries::create_enquiry),
        );

    Router::new()
        .merge(public_routes)
        .merge(admin_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match atelier_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}
