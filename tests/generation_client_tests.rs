//! Tests for the completion client against a local stand-in service.

use std::sync::{Arc, Mutex};

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use kaomoji_web::config::GenerationConfig;
use kaomoji_web::generation::{GenerationError, OpenAiClient, TextGenerator};
use kaomoji_web::web::{create_router, AppState};

mod fixtures;
use fixtures::{post_form, test_seo};

/// What the stand-in service saw on its last request.
#[derive(Debug, Default, Clone)]
struct Seen {
    authorization: Option<String>,
    body: Option<Value>,
}

/// Starts a completion service that answers every request with
/// `status` and `body`. Returns its base URL and the request recorder.
async fn spawn_completion_service(status: StatusCode, body: &str) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let recorder = seen.clone();
    let body = body.to_string();

    let app = Router::new().route(
        "/v1/completions",
        post(move |headers: HeaderMap, Json(request): Json<Value>| {
            let recorder = recorder.clone();
            let body = body.clone();
            async move {
                let mut seen = recorder.lock().unwrap();
                seen.authorization = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                seen.body = Some(request);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

fn client_for(base_url: &str) -> OpenAiClient {
    let config = GenerationConfig {
        api_key: "sk-test".to_string(),
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..GenerationConfig::default()
    };
    OpenAiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_generate_returns_first_candidate() {
    let (url, seen) = spawn_completion_service(
        StatusCode::OK,
        r#"{"choices": [{"text": "\n\n(^▽^)"}, {"text": "(T_T)"}]}"#,
    )
    .await;

    let text = client_for(&url).generate("make a kaomoji").await.unwrap();
    assert_eq!(text, "(^▽^)");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer sk-test"));

    let body = seen.body.unwrap();
    assert_eq!(body["prompt"], "make a kaomoji");
    assert_eq!(body["model"], "gpt-3.5-turbo-instruct");
    assert_eq!(body["temperature"], 0.8);
    assert_eq!(body["max_tokens"], 100);
}

#[tokio::test]
async fn test_generate_no_candidates() {
    let (url, _) = spawn_completion_service(StatusCode::OK, r#"{"choices": []}"#).await;

    let err = client_for(&url).generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::NoCandidates), "{err}");
}

#[tokio::test]
async fn test_generate_error_status() {
    let (url, _) = spawn_completion_service(
        StatusCode::UNAUTHORIZED,
        r#"{"error": {"message": "Incorrect API key provided"}}"#,
    )
    .await;

    let err = client_for(&url).generate("prompt").await.unwrap_err();
    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn test_generate_malformed_response() {
    let (url, _) = spawn_completion_service(StatusCode::OK, "not json").await;

    let err = client_for(&url).generate("prompt").await.unwrap_err();
    assert!(matches!(err, GenerationError::Decode(_)), "{err}");
}

#[tokio::test]
async fn test_generate_unreachable_service() {
    // Reserve a port, then free it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(&format!("http://{addr}"))
        .generate("prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Request(_)), "{err}");
}

#[tokio::test]
async fn test_page_renders_with_real_client() {
    let (url, seen) =
        spawn_completion_service(StatusCode::OK, r#"{"choices": [{"text": " (ﾉ◕ヮ◕)ﾉ "}]}"#).await;

    let colors = kaomoji_web::color_db::ColorDb::load().unwrap();
    let state = AppState::new(test_seo(), colors, Arc::new(client_for(&url)));
    let app = create_router(state);

    let (status, _, html) = post_form(&app, "/", "word=so+excited").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("(ﾉ◕ヮ◕)ﾉ"));

    let body = seen.lock().unwrap().body.clone().unwrap();
    assert!(body["prompt"].as_str().unwrap().contains("\"so excited\""));
}

#[tokio::test]
async fn test_page_renders_error_when_service_fails() {
    let (url, _) = spawn_completion_service(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;

    let colors = kaomoji_web::color_db::ColorDb::load().unwrap();
    let state = AppState::new(test_seo(), colors, Arc::new(client_for(&url)));
    let app = create_router(state);

    let (status, _, html) = post_form(&app, "/", "word=so+excited").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("so excited"));
}
