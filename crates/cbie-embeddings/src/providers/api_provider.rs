//! OpenAI-compatible embeddings API provider.
//!
//! One HTTP request per batch, bearer auth, no retries: a failed request is
//! fatal to the analysis run that issued it.

use std::time::Duration;

use cbie_core::config::EmbeddingConfig;
use cbie_core::errors::{CbieResult, EmbeddingError};
use cbie_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct ApiProvider {
    model: String,
    endpoint: String,
    api_key: String,
    dimensions: usize,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
pub(crate) struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl ApiProvider {
    pub fn new(config: &EmbeddingConfig, api_key: String) -> CbieResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("runtime error: {e}"),
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("client error: {e}"),
            })?;

        Ok(Self {
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            api_key,
            dimensions: config.dimensions,
            client,
            runtime,
        })
    }

    fn request_embeddings(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };
        debug!(count = texts.len(), model = %self.model, "requesting embeddings");

        let response: EmbedResponse = self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("HTTP error: {e}"),
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("API returned {status}: {body}"),
                });
            }

            response
                .json::<EmbedResponse>()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("JSON parse error: {e}"),
                })
        })?;

        Ok(order_embeddings(response, texts.len(), self.dimensions)?)
    }
}

/// Put response vectors back in request order and check count and width.
pub(crate) fn order_embeddings(
    response: EmbedResponse,
    expected: usize,
    dimensions: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let received = response.data.len();
    if received != expected {
        return Err(EmbeddingError::CountMismatch {
            sent: expected,
            received,
        });
    }

    let mut data = response.data;
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }

    data.into_iter()
        .map(|d| {
            if d.embedding.len() != dimensions {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: dimensions,
                    actual: d.embedding.len(),
                });
            }
            Ok(d.embedding)
        })
        .collect()
}

impl IEmbeddingProvider for ApiProvider {
    fn embed(&self, text: &str) -> CbieResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> CbieResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
