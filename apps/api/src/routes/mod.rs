pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::document::handlers as draft;
use crate::extraction::handlers as extraction;
use crate::generation::handlers as generation;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/extract", post(extraction::handle_extract))
        .route("/api/v1/draft", post(draft::handle_draft))
        .route("/api/v1/draft/edit", post(draft::handle_draft_edit))
        // Matching
        .route("/api/v1/keywords", post(matching::handle_keywords))
        .route("/api/v1/ats/scan", post(matching::handle_scan))
        .route("/api/v1/tailor", post(matching::handle_tailor))
        // Generation
        .route("/api/v1/generate", post(generation::handle_generate))
        .with_state(state)
}
