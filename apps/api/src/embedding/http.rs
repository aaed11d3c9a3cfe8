//! HTTP embedding provider for OpenAI-compatible `/embeddings` endpoints
//! (hosted APIs or a local inference server).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::{EmbeddingError, EmbeddingProvider, EmbeddingVector};

const MAX_RETRIES: u32 = 3;
const WARM_UP_TEXT: &str = "embedding model warm-up";

#[derive(Debug, Clone)]
pub struct HttpEmbeddingConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct HttpEmbeddingProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

impl HttpEmbeddingProvider {
    pub fn new(config: &HttpEmbeddingConfig) -> Result<Self, EmbeddingError> {
        if config.model.trim().is_empty() {
            return Err(EmbeddingError::InitFailed(
                "missing embedding model name".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| EmbeddingError::InitFailed(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    /// Builds the provider and proves the model answers before it is handed out.
    pub async fn connect(
        config: HttpEmbeddingConfig,
    ) -> Result<Arc<dyn EmbeddingProvider>, EmbeddingError> {
        let provider = Self::new(&config)?;
        let warm_up = provider.embed(&[WARM_UP_TEXT.to_string()]).await?;
        debug!(
            "Embedding warm-up returned dimension {}",
            warm_up.first().map(EmbeddingVector::dimension).unwrap_or(0)
        );
        Ok(Arc::new(provider))
    }

    fn should_retry(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, batch: &[String]) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: batch,
        };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.endpoint).json(&request_body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Request(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            if Self::should_retry(status) {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Request(format!("status {status}: {body}")));
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Request(format!("status {status}: {body}")));
            }

            let mut parsed: EmbeddingResponse = response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
            parsed.data.sort_by_key(|entry| entry.index);

            debug!(
                "Embedded batch of {} with model {}",
                parsed.data.len(),
                self.model
            );

            return Ok(parsed
                .data
                .into_iter()
                .map(|entry| EmbeddingVector::new(entry.embedding))
                .collect());
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::Request(format!("gave up after {MAX_RETRIES} attempts"))
        }))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, model: &str) -> HttpEmbeddingConfig {
        HttpEmbeddingConfig {
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: Some("  ".to_string()),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider =
            HttpEmbeddingProvider::new(&config("http://localhost:11434/v1/", "m")).unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434/v1/embeddings");
    }

    #[test]
    fn test_blank_api_key_is_dropped() {
        let provider = HttpEmbeddingProvider::new(&config("http://x", "m")).unwrap();
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_missing_model_fails_initialization() {
        let err = HttpEmbeddingProvider::new(&config("http://x", " ")).err().unwrap();
        assert!(matches!(err, EmbeddingError::InitFailed(_)));
    }

    #[test]
    fn test_response_deserializes_out_of_order() {
        let json = r#"{"data":[{"embedding":[0.5],"index":1},{"embedding":[0.1],"index":0}]}"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(json).unwrap();
        parsed.data.sort_by_key(|e| e.index);
        assert_eq!(parsed.data[0].embedding, vec![0.1]);
    }

    #[test]
    fn test_retry_statuses() {
        assert!(HttpEmbeddingProvider::should_retry(StatusCode::TOO_MANY_REQUESTS));
        assert!(HttpEmbeddingProvider::should_retry(StatusCode::BAD_GATEWAY));
        assert!(!HttpEmbeddingProvider::should_retry(StatusCode::UNAUTHORIZED));
    }
}
