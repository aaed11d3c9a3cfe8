mod config;
mod document;
mod embedding;
mod errors;
mod extraction;
mod generation;
mod llm_client;
mod matching;
mod routes;
mod state;
mod tailoring;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::http::HttpEmbeddingProvider;
use crate::embedding::EmbeddingService;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Match API v{}", env!("CARGO_PKG_VERSION"));

    // Embedding model loads in the background; requests before it is ready get 412
    let embeddings = Arc::new(EmbeddingService::new(config.embedding_timeout));
    {
        let embeddings = Arc::clone(&embeddings);
        let embedding_config = config.embedding();
        info!(
            "Loading embedding model {} from {}",
            embedding_config.model, embedding_config.base_url
        );
        tokio::spawn(async move {
            embeddings
                .initialize(HttpEmbeddingProvider::connect(embedding_config))
                .await;
        });
    }

    // Initialize LLM client
    let llm = config.llm().map(LlmClient::new);
    match &llm {
        Some(client) => info!("LLM client initialized (model: {})", client.model()),
        None => warn!("LLM_API_KEY not set; CV generation is disabled"),
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        embeddings,
        llm,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
