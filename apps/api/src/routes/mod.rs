pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::extraction::handlers::handle_extract;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sample-resume", get(handlers::handle_sample_resume))
        // Extraction API
        .route("/api/v1/extract", post(handle_extract))
        // Analysis API
        .route("/api/v1/analyses", post(handlers::handle_create_analysis))
        .route(
            "/api/v1/analyses/:id",
            get(handlers::handle_get_analysis).delete(handlers::handle_discard_analysis),
        )
        .route(
            "/api/v1/analyses/:id/dashboard",
            get(handlers::handle_get_dashboard),
        )
        .route(
            "/api/v1/analyses/:id/report",
            get(handlers::handle_get_report),
        )
        .layer(body_limit)
        .with_state(state)
}
