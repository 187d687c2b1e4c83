//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use cbie_core::config::GenerationConfig;
use cbie_core::errors::{CbieResult, GenerationError};
use cbie_core::models::CompletionRequest;
use cbie_core::traits::ITextGenerator;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct ChatCompletionsClient {
    model: String,
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(config: &GenerationConfig, api_key: String) -> CbieResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("runtime error: {e}"),
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("client error: {e}"),
            })?;

        Ok(Self {
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            api_key,
            client,
            runtime,
        })
    }
}

/// Text of the first choice, if any.
pub(crate) fn first_choice_text(response: ChatResponse, provider: &str) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| GenerationError::EmptyResponse {
            provider: provider.to_string(),
        })
}

impl ITextGenerator for ChatCompletionsClient {
    fn complete(&self, request: &CompletionRequest) -> CbieResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        debug!(model = %self.model, max_tokens = request.max_tokens, "requesting completion");

        let response: ChatResponse = self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| GenerationError::RequestFailed {
                    reason: format!("HTTP error: {e}"),
                })?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(GenerationError::RequestFailed {
                    reason: format!("API returned {status}: {text}"),
                });
            }

            response
                .json::<ChatResponse>()
                .await
                .map_err(|e| GenerationError::RequestFailed {
                    reason: format!("JSON parse error: {e}"),
                })
        })?;

        Ok(first_choice_text(response, &self.model)?)
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
