//! REST API endpoints.
//!
//! Read-only axum service over the record store. Each request loads a fresh
//! [`Snapshot`](crate::storage::Snapshot) and recomputes the ranking, so
//! results recorded through the CLI show up without a restart.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::is_cors_origin;
use crate::models::{RecordError, Scope};
use crate::storage::StorageError;
use state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::UnknownRecord { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Common `?scope=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeParams {
    pub scope: Option<String>,
}

/// The requested scope, or the server default when none was given.
pub fn resolve_scope(param: Option<&str>, default: Scope) -> Result<Scope, ApiError> {
    param.map_or(Ok(default), |s| Ok(s.parse::<Scope>()?))
}

/// 1-based page selection, clamped to sane bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.map_or(1, |p| p.max(1)),
            page_size: page_size.map_or(DEFAULT_PAGE_SIZE, |s| s.clamp(1, MAX_PAGE_SIZE)),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }

    /// Cut `items` down to this page and describe where it sits.
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PaginationMeta) {
        let meta = PaginationMeta::new(self, items.len() as u32);
        let page = items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect();
        (page, meta)
    }
}

#[derive(Debug, Clone, Serialize)]
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
        let Pagination { page, page_size } = *pagination;
        let total_pages = total_items.div_ceil(page_size);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Origins are checked by `AppConfig::validate`; anything that still fails
/// here gets no cross-origin access at all.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) if is_cors_origin(origin) => layer.allow_origin(value),
        _ => {
            tracing::warn!(origin, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/ranking", get(routes::ranking::get_ranking))
        .route("/api/players", get(routes::players::list_players))
        .route("/api/players/:id", get(routes::players::get_player))
        .route("/api/penalties", get(routes::penalties::list_penalties))
        .route("/api/decks", get(routes::decks::list_decks))
        .route("/api/tournaments", get(routes::tournaments::list_tournaments))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
