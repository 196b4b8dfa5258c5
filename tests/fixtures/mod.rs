//! Shared test fixtures for the web page tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kaomoji_web::color_db::ColorDb;
use kaomoji_web::generation::{GenerationError, TextGenerator};
use kaomoji_web::models::SiteMetadata;
use kaomoji_web::web::AppState;

/// Generator with a canned reply that records every prompt it sees.
pub struct MockGenerator {
    reply: Result<String, fn() -> GenerationError>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Generator that always returns `reply`.
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Generator that always fails with the error built by `err`.
    pub fn failing(err: fn() -> GenerationError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Number of generate calls so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_err) => Err(make_err()),
        }
    }
}

/// Deterministic site metadata.
pub fn test_seo() -> SiteMetadata {
    SiteMetadata {
        url: "https://kaomoji.example".to_string(),
        title: "Kaomoji Test".to_string(),
        description: "Test deployment".to_string(),
        image: None,
    }
}

/// App state backed by the embedded color table and `generator`.
pub fn test_state(generator: Arc<dyn TextGenerator>) -> AppState {
    let colors = ColorDb::load().expect("Failed to load embedded colors");
    AppState::new(test_seo(), colors, generator)
}

/// Sends a GET request and returns status, content type and body text.
pub async fn get_page(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    read_response(response).await
}

/// Sends a urlencoded form POST and returns status, content type and body text.
pub async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_response(response).await
}

async fn read_response(
    response: axum::response::Response,
) -> (StatusCode, Option<String>, String) {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}
