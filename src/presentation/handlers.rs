// HTTP request handlers
use crate::application::chart_registry::ChartError;
use crate::domain::filters::Selection;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dropdown choices, enumerated once at startup
pub async fn list_options(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    respond(StatusCode::OK, &state.options, accepts_brotli(&headers)).await
}

/// Registered charts and the filters each one reacts to
pub async fn list_charts(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let charts = state.registry.describe();
    respond(StatusCode::OK, &charts, accepts_brotli(&headers)).await
}

/// Recompute one chart for the given dropdown values
pub async fn render_chart(
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let selection = Selection::new(params);

    match state.registry.render(&id, &selection) {
        Ok(figure) => respond(StatusCode::OK, &figure, compress).await,
        Err(e) => {
            let status = match e {
                ChartError::UnknownChart(_) => StatusCode::NOT_FOUND,
                ChartError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            };
            tracing::warn!(chart = %id, "Rejected chart request: {}", e);
            respond(status, &json!({ "error": e.to_string() }), compress).await
        }
    }
}

async fn respond<T: serde::Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
