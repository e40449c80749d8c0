pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::generation::handlers as generation;
use crate::portfolio::handlers as portfolio;
use crate::research::handlers as research;
use crate::state::AppState;

/// Files one generation request may carry within the body limit.
const BODY_LIMIT_FILES: usize = 4;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes.saturating_mul(BODY_LIMIT_FILES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Generation
        .route(
            "/api/v1/cover-letters",
            post(generation::handle_generate).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/api/v1/cover-letters/quality",
            post(generation::handle_quality),
        )
        // Extraction preview
        .route(
            "/api/v1/job-descriptions/parse",
            post(documents::handle_parse_jd),
        )
        // Collaborators
        .route("/api/v1/research/:company", get(research::handle_get_research))
        .route(
            "/api/v1/portfolio/analyze",
            post(portfolio::handle_analyze_portfolio),
        )
        .with_state(state)
}
