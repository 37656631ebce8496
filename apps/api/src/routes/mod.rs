pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::authenticity::handlers as authenticity;
use crate::matching::handlers as matching;
use crate::parsing::handlers as parsing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Parsing
        .route("/api/v1/resumes/submit", post(parsing::handle_submit))
        .route("/api/v1/resumes/:id", get(parsing::handle_get_resume))
        .route("/api/v1/resumes/:id/tokens", get(parsing::handle_get_tokens))
        // Matching
        .route("/api/v1/resumes/compare", post(matching::handle_compare))
        .route("/api/v1/resumes/batch", post(matching::handle_batch))
        // Authenticity
        .route(
            "/api/v1/resumes/authenticity",
            post(authenticity::handle_authenticity),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
