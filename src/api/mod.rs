//! REST API endpoints.
//!
//! Read-only axum API over the loaded record store: country, athlete,
//! gender and map analytics plus the dataset view.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::AnalyticsError;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    NoData(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::EmptyResult { .. } => ApiError::NoData(err.to_string()),
            AnalyticsError::InvalidCategory(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::NoData(_) => (StatusCode::NOT_FOUND, "NO_DATA"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Pagination parameters.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(50).clamp(1, 100),
        }
    }

    /// Index of the first item on this page. Saturates for huge page numbers.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }

    /// The slice of `items` on this page.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.page_size as usize).min(items.len());
        &items[start..end]
    }
}

/// Pagination metadata in responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u32) -> Self {
        let total_pages = total_items.div_ceil(pagination.page_size);
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_items,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }
}

/// CORS layer for the configured origin; `*` allows any origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, ApiError> {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        let value = HeaderValue::from_str(origin)
            .map_err(|e| ApiError::BadRequest(format!("Invalid CORS origin {origin:?}: {e}")))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::dataset::health))
        .route("/api/records", get(routes::dataset::records))
        .route("/api/catalog/:kind", get(routes::dataset::catalog))
        .route(
            "/api/countries/:country/profile",
            get(routes::country::profile),
        )
        .route(
            "/api/countries/:country/most-participated",
            get(routes::country::most_participated),
        )
        .route(
            "/api/countries/:country/best-disciplines",
            get(routes::country::best_disciplines),
        )
        .route(
            "/api/countries/:country/trajectory",
            get(routes::country::trajectory),
        )
        .route(
            "/api/countries/:country/trajectory/medals",
            get(routes::country::trajectory_by_medal_type),
        )
        .route("/api/compare", get(routes::country::compare))
        .route("/api/athletes/compare", get(routes::athlete::compare))
        .route("/api/athletes/:name/tally", get(routes::athlete::tally))
        .route(
            "/api/gender/orientation",
            get(routes::gender::orientation),
        )
        .route(
            "/api/gender/orientation/:orientation",
            get(routes::gender::orientation_partition),
        )
        .route("/api/geo/totals", get(routes::geo::totals))
        .route("/api/geo/medals", get(routes::geo::medals))
        .route("/api/geo/top-disciplines", get(routes::geo::top_disciplines))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
