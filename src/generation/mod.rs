//! Text generation through an external completion API.
//!
//! [`TextGenerator`] is the seam the page handlers depend on; [`OpenAiClient`]
//! is the production implementation talking to an OpenAI-compatible
//! `/v1/completions` endpoint. Failures are returned as [`GenerationError`]
//! values and never retried.

mod client;

pub use client::{CompletionChoice, CompletionRequest, CompletionResponse, OpenAiClient};

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation call produced no text.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No API key is configured.
    #[error("completion API key is not configured")]
    NotConfigured,

    /// The request could not be sent or the response could not be read.
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The response body was not a completion response.
    #[error("malformed completion response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response contained zero candidate outputs.
    #[error("completion response contained no candidates")]
    NoCandidates,
}

/// Produces text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`, returning the first candidate.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Builds the kaomoji prompt for a short phrase.
#[must_use]
pub fn kaomoji_prompt(word: &str) -> String {
    format!(
        "You are given a sentence with a maximum of 4 words: \"{word}\". \
         Generate a kaomoji without emoji or emoticon to express the sentiment \
         of the sentence or something related to the action of the verb. \
         Don't use words, only the kaomoji."
    )
}
