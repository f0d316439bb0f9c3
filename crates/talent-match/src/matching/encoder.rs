use crate::config::EmbeddingConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

/// Maps text to a fixed-width embedding vector.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError>;

    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    #[error("embedding client unavailable: {0}")]
    Client(#[source] reqwest::Error),
    #[error("embedding runtime unavailable: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("embedding request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("embedding endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("embedding response contained no vectors")]
    EmptyResponse,
}

/// Picks the remote encoder when an endpoint is configured, otherwise the
/// local hashing encoder.
pub fn build_encoder(
    config: &EmbeddingConfig,
    timeout: Duration,
) -> Result<Arc<dyn TextEncoder>, EncoderError> {
    match &config.api_url {
        Some(url) => {
            info!(url = %url, model = %config.model, "using remote embedding endpoint");
            let encoder = RemoteEncoder::new(
                url,
                config.api_key.clone(),
                config.model.clone(),
                config.dimensions,
                timeout,
            )?;
            Ok(Arc::new(encoder))
        }
        None => {
            info!(dimensions = config.dimensions, "using local hashing encoder");
            Ok(Arc::new(HashingEncoder::new(config.dimensions)))
        }
    }
}

/// Deterministic bag-of-words encoder.
///
/// Lowercased alphanumeric tokens are hashed (FNV-1a) into buckets and
/// weighted by term frequency, then L2-normalized. Components are never
/// negative, so cosine scores between two encodings already fall in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimensions: usize,
}

impl HashingEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, term: &str) -> usize {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in term.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        (hash % self.dimensions as u64) as usize
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, f32> = HashMap::new();
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
        {
            *counts.entry(token.to_lowercase()).or_default() += 1.0;
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            vector[self.bucket(term)] += count;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for component in &mut vector {
                *component /= norm;
            }
        }
        vector
    }
}

impl TextEncoder for HashingEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Client for an OpenAI-compatible `/embeddings` endpoint.
pub struct RemoteEncoder {
    client: Client,
    runtime: Runtime,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

impl std::fmt::Debug for RemoteEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteEncoder")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

impl RemoteEncoder {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: String,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self, EncoderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EncoderError::Client)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EncoderError::Runtime)?;

        Ok(Self {
            client,
            runtime,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            api_key,
            model,
            dimensions,
        })
    }

    async fn request(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(EncoderError::Transport)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "embedding endpoint error");
            return Err(EncoderError::Status { status, body });
        }

        let payload: EmbeddingResponse =
            response.json().await.map_err(EncoderError::Transport)?;
        payload
            .data
            .into_iter()
            .next()
            .map(|datum| datum.embedding)
            .ok_or(EncoderError::EmptyResponse)
    }
}

impl TextEncoder for RemoteEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        debug!(chars = text.chars().count(), "requesting remote embedding");
        self.runtime.block_on(self.request(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }
}
