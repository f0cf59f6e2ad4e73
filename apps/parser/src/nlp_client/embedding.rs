/// HTTP client for an embedding service speaking the Ollama `/api/embed` shape.
///
/// Request: `{ "model": "...", "input": ["...", ...] }`
/// Response: `{ "embeddings": [[f32, ...], ...] }`
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{NlpError, TextEncoder};

const EMBED_PATH: &str = "/api/embed";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct EmbedErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
    backoff_base: Duration,
}

impl EmbeddingClient {
    pub fn new(base_url: &str, model: impl Into<String>) -> Result<Self, NlpError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint: format!("{}{EMBED_PATH}", base_url.trim_end_matches('/')),
            model: model.into(),
            backoff_base: Duration::from_millis(500),
        })
    }

    /// Overrides the first retry delay; later retries double it.
    pub fn with_backoff(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Retries on 429 and 5xx with exponential backoff.
    async fn request(&self, inputs: &[String]) -> Result<EmbedResponse, NlpError> {
        let body = EmbedRequest {
            model: &self.model,
            input: inputs,
        };

        let mut last_error: Option<NlpError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.endpoint).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(NlpError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, message);
                last_error = Some(NlpError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<EmbedErrorBody>(&raw)
                    .map(|e| e.error)
                    .unwrap_or(raw);
                return Err(NlpError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(NlpError::Component(format!(
            "embedding service unavailable after {MAX_RETRIES} attempts"
        ))))
    }
}

#[async_trait]
impl TextEncoder for EmbeddingClient {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, NlpError> {
        if inputs.is_empty() {
            return Ok(vec![]);
        }

        let response = self.request(inputs).await?;
        if response.embeddings.len() != inputs.len() {
            return Err(NlpError::ShapeMismatch {
                expected: inputs.len(),
                got: response.embeddings.len(),
            });
        }

        debug!(
            "Embedded {} inputs with model {}",
            inputs.len(),
            self.model
        );
        Ok(response.embeddings)
    }
}
