use std::sync::Arc;

use crate::config::Config;
use crate::embedding::EmbeddingService;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared read-only; readiness flips once when the startup task finishes loading.
    pub embeddings: Arc<EmbeddingService>,
    /// `None` when LLM_API_KEY is not configured.
    pub llm: Option<LlmClient>,
}
