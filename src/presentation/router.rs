// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, list_charts, list_options, render_chart};
use crate::presentation::page::dashboard_page;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/options", get(list_options))
        .route("/api/charts", get(list_charts))
        .route("/api/charts/:id", get(render_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
