//! HTTP front end for the careform merge.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_request_size_kb * 1024;

    Router::new()
        .route("/api/health", get(api::health_check))
        .route("/api/update-pdf", post(api::update_pdf))
        .route("/api/validate", post(api::validate))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
