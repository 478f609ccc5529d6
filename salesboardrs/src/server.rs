//! HTTP boundary: thin axum glue over the sales service.
//!
//! Two data routes plus a health probe. Query strings are taken as raw
//! key/value pairs so repeated keys (multi-select filters) survive the
//! trip into `RawSalesQuery`. Every service failure maps to a generic 500
//! with a short message and no internal detail.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::SalesboardError;
use crate::model::{RawSalesQuery, SalesPage, TagsResponse};
use crate::service::SalesService;

pub fn router(service: Arc<SalesService>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/sales", get(get_sales))
        .route("/api/sales/tags", get(get_tags))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn health() -> &'static str {
    "salesboard is running"
}

async fn get_sales(
    State(service): State<Arc<SalesService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SalesPage>, ApiError> {
    let raw = RawSalesQuery::from_pairs(pairs);
    let page = service.get_sales(&raw).await?;
    Ok(Json(page))
}

async fn get_tags(
    State(service): State<Arc<SalesService>>,
) -> Result<Json<TagsResponse>, ApiError> {
    let tags = service.all_tags().await?;
    Ok(Json(TagsResponse {
        tags: tags.as_ref().clone(),
    }))
}

/// Boundary wrapper turning any internal error into a generic 500.
pub struct ApiError(SalesboardError);

impl From<SalesboardError> for ApiError {
    fn from(err: SalesboardError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "message": "Internal server error",
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
