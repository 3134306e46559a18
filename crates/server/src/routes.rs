//! Route registration and request handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use linkpeek_core::{DetailsService, PageDetails};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::auth::BearerViewer;
use crate::error::ApiError;

/// Outer bound on request handling, above the outbound fetch timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared per-process state. Lookups themselves are stateless; this only
/// carries the service wiring.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DetailsService>,
    pub view_token: Option<String>,
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/url-details", get(url_details))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct UrlDetailsQuery {
    url: Option<String>,
}

/// `GET /url-details?url=...` — fetches the remote document and returns its
/// extracted metadata, or one structured error per failure class.
async fn url_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UrlDetailsQuery>,
) -> Result<Json<PageDetails>, ApiError> {
    let viewer = BearerViewer::from_headers(state.view_token.as_deref(), &headers);
    let url_param = query.url.map_or(Value::Null, Value::String);

    match state.service.lookup(&viewer, &url_param).await {
        Ok(details) => Ok(Json(details)),
        Err(err) => {
            debug!(code = err.code(), "url details lookup failed");
            Err(ApiError::from(err))
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
