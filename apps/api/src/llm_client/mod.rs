//! LLM Client: the single point of entry for all language model calls.
//!
//! No other module talks to Ollama directly; the pipeline only sees the
//! `LanguageModel` trait so it can run against a stub in tests.
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling options sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub num_ctx: u32,
    pub num_predict: u32,
    pub stop: Vec<String>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            num_ctx: 4096,
            num_predict: 2048,
            stop: vec!["[END]".to_string()],
        }
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// One completion for `prompt`. Not retried.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError>;

    /// Whether the configured model is available to serve requests.
    async fn verify_model(&self) -> Result<bool, LlmError>;

    /// Backend metadata for the configured model, if the backend exposes any.
    async fn model_info(&self) -> Result<serde_json::Value, LlmError> {
        Ok(serde_json::Value::Null)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerationParams,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    eval_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    name: &'a str,
}

/// Ollama HTTP client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    host: String,
    model: String,
}

impl LlmClient {
    pub fn new(host: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String, LlmError> {
        let start = Instant::now();
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: params,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Ollama returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text = body.response.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            response_chars = text.len(),
            eval_count = body.eval_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "LLM call succeeded"
        );
        Ok(text.to_string())
    }

    async fn verify_model(&self) -> Result<bool, LlmError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.host))
            .timeout(Duration::from_secs(5))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let tags: TagsResponse = response.json().await?;
        let available = tags.models.iter().any(|m| m.name == self.model);
        if available {
            info!(model = %self.model, "Model available");
        } else {
            warn!(
                "Model {} not found; pull it with `ollama pull {}`",
                self.model, self.model
            );
        }
        Ok(available)
    }

    /// Raw `/api/show` metadata for the configured model.
    async fn model_info(&self) -> Result<serde_json::Value, LlmError> {
        let response = self
            .client
            .post(format!("{}/api/show", self.host))
            .json(&ShowRequest { name: &self.model })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
