pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::profile::handlers as profile;
use crate::reports::handlers as reports;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/v1/profile/extract", post(profile::handle_extract_profile))
        .route("/api/v1/profile/upload", post(profile::handle_upload_profile))
        // Reports API
        .route(
            "/api/v1/reports/intelligence",
            post(reports::handle_intelligence),
        )
        .route("/api/v1/reports/upskilling", post(reports::handle_upskilling))
        .route(
            "/api/v1/reports/recommendations",
            post(reports::handle_recommendations),
        )
        .route("/api/v1/reports/training", post(reports::handle_training))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
