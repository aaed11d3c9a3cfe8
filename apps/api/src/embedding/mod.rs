//! Embedding — the external sentence-embedding collaborator and the service wrapping it.
//!
//! `EmbeddingProvider` is the seam: anything that maps an ordered batch of strings to
//! one dense vector per string. `EmbeddingService` owns the long-lived provider handle,
//! tracks whether model initialization finished, bounds every call with a timeout and
//! checks that the answer lines up with the request before the core sees it.

pub mod http;

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Dense vector produced by the embedding provider. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model is not ready yet")]
    NotReady,

    #[error("embedding model failed to initialize: {0}")]
    InitFailed(String),

    #[error("embedding call timed out after {0:?}")]
    Timeout(Duration),

    #[error("embedding request failed: {0}")]
    Request(String),

    #[error("embedding provider returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("cannot embed an empty batch")]
    EmptyBatch,
}

/// Maps a batch of strings to vectors, preserving input order, one vector per string.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, batch: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError>;

    /// Model identifier, for logs and health output.
    fn model(&self) -> &str;
}

enum ProviderState {
    Loading,
    Ready(Arc<dyn EmbeddingProvider>),
    Failed(String),
}

/// Readiness as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    Loading,
    Ready { model: String },
    Failed { reason: String },
}

pub struct EmbeddingService {
    state: RwLock<ProviderState>,
    timeout: Duration,
    /// Dimensionality of the first vector seen this session; every later vector must match.
    dimension: OnceLock<usize>,
}

impl EmbeddingService {
    /// A service whose model is still loading.
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: RwLock::new(ProviderState::Loading),
            timeout,
            dimension: OnceLock::new(),
        }
    }

    /// A service with an already initialized provider.
    #[cfg(test)]
    pub fn ready(provider: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        Self {
            state: RwLock::new(ProviderState::Ready(provider)),
            timeout,
            dimension: OnceLock::new(),
        }
    }

    /// Runs the async model setup and records its outcome.
    pub async fn initialize<F>(&self, loader: F)
    where
        F: Future<Output = Result<Arc<dyn EmbeddingProvider>, EmbeddingError>>,
    {
        match loader.await {
            Ok(provider) => {
                info!("Embedding model ready (model: {})", provider.model());
                *self.state.write().await = ProviderState::Ready(provider);
            }
            Err(e) => {
                error!("Embedding model failed to load: {e}");
                *self.state.write().await = ProviderState::Failed(e.to_string());
            }
        }
    }

    pub async fn readiness(&self) -> Readiness {
        match &*self.state.read().await {
            ProviderState::Loading => Readiness::Loading,
            ProviderState::Ready(provider) => Readiness::Ready {
                model: provider.model().to_string(),
            },
            ProviderState::Failed(reason) => Readiness::Failed {
                reason: reason.clone(),
            },
        }
    }

    /// Embeds `batch` in a single provider call.
    pub async fn embed(&self, batch: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        if batch.is_empty() {
            return Err(EmbeddingError::EmptyBatch);
        }

        let provider = match &*self.state.read().await {
            ProviderState::Loading => return Err(EmbeddingError::NotReady),
            ProviderState::Failed(reason) => return Err(EmbeddingError::InitFailed(reason.clone())),
            ProviderState::Ready(provider) => Arc::clone(provider),
        };

        let vectors = tokio::time::timeout(self.timeout, provider.embed(batch))
            .await
            .map_err(|_| EmbeddingError::Timeout(self.timeout))??;

        self.check_batch(batch.len(), &vectors)?;
        Ok(vectors)
    }

    fn check_batch(
        &self,
        expected: usize,
        vectors: &[EmbeddingVector],
    ) -> Result<(), EmbeddingError> {
        if vectors.len() != expected {
            return Err(EmbeddingError::InvalidResponse(format!(
                "{} vectors for {} inputs",
                vectors.len(),
                expected
            )));
        }

        for vector in vectors {
            if vector.dimension() == 0 {
                return Err(EmbeddingError::InvalidResponse(
                    "empty embedding vector".to_string(),
                ));
            }
            let session_dim = *self.dimension.get_or_init(|| vector.dimension());
            if vector.dimension() != session_dim {
                return Err(EmbeddingError::InvalidResponse(format!(
                    "dimension {} differs from session dimension {}",
                    vector.dimension(),
                    session_dim
                )));
            }
        }
        Ok(())
    }
}
