//! OpenAI-compatible completion client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationError, TextGenerator};
use crate::branding;
use crate::config::GenerationConfig;

/// Longest slice of an error body kept in [`GenerationError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Request body for `POST /v1/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Prompt text
    pub prompt: &'a str,
    /// Sampling temperature
    pub temperature: f64,
    /// Output length cap in tokens
    pub max_tokens: u32,
}

/// Response body of `POST /v1/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Candidate outputs
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// A single candidate output.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Generated text
    #[serde(default)]
    pub text: String,
}

impl CompletionResponse {
    /// Returns the first candidate's text with surrounding whitespace trimmed.
    pub fn first_text(&self) -> Result<String, GenerationError> {
        self.choices
            .first()
            .map(|choice| choice.text.trim().to_string())
            .ok_or(GenerationError::NoCandidates)
    }
}

/// Completion client with fixed sampling settings.
///
/// Built once at startup and shared by every request.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Creates a client from the generation config.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(branding::user_agent())
            .build()?;

        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            http,
            endpoint: completions_url(&config.base_url),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Returns the full completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns true if an API key is set.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            prompt,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let key = self.api_key.as_deref().ok_or(GenerationError::NotConfigured)?;

        debug!(model = %self.model, endpoint = %self.endpoint, "sending completion request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let completion: CompletionResponse = serde_json::from_slice(&bytes)?;
        completion.first_text()
    }
}

/// Joins a base URL and the completions path, tolerating a trailing slash
/// or an included `/v1`.
fn completions_url(base_url: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{base}/v1/completions")
}
