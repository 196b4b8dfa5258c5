//! HTTP layer.
//!
//! Binds routes to the rendering-context builders in [`crate::services`] and
//! renders the resulting page through its askama template.
//!
//! # Endpoints
//!
//! - `GET /` - Kaomoji form
//! - `POST /` - Generate a kaomoji for the `word` form field
//! - `GET /hello-node` - Color page (optional `?randomize=true`)
//! - `POST /hello-node` - Look up the `color` form field
//! - `GET /health` - Health check
//! - anything else - Static files from `public/`

pub mod static_files;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::color_db::ColorDb;
use crate::config::Config;
use crate::generation::{OpenAiClient, TextGenerator};
use crate::models::SiteMetadata;
use crate::services;
use crate::views::{HelloNodePage, IndexPage};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the page handlers.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Site metadata rendered into every page
    seo: Arc<SiteMetadata>,
    /// Color table (immutable after load)
    colors: Arc<ColorDb>,
    /// Completion client
    generator: Arc<dyn TextGenerator>,
}

impl AppState {
    /// Creates application state from already loaded parts.
    pub fn new(seo: SiteMetadata, colors: ColorDb, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            seo: Arc::new(seo),
            colors: Arc::new(colors),
            generator,
        }
    }

    /// Loads site data and builds the completion client from `config`.
    ///
    /// Fails if a configured data file is missing or malformed.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let domain = config.site.project_domain.as_deref();
        let seo = match &config.site.seo_path {
            Some(path) => SiteMetadata::from_path(path, domain)?,
            None => SiteMetadata::load(domain)?,
        };

        let colors = match &config.site.colors_path {
            Some(path) => ColorDb::from_path(path)?,
            None => ColorDb::load()?,
        };
        info!("Loaded {} colors", colors.len());

        let client = OpenAiClient::new(&config.generation)
            .context("Failed to build completion client")?;
        if !client.has_api_key() {
            warn!("No completion API key configured; kaomoji generation will fail");
        }
        info!("Completion endpoint: {}", client.endpoint());

        Ok(Self::new(seo, colors, Arc::new(client)))
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Form body of `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct WordForm {
    /// Phrase to turn into a kaomoji
    #[serde(default)]
    pub word: Option<String>,
}

/// Form body of `POST /hello-node`.
#[derive(Debug, Default, Deserialize)]
pub struct ColorForm {
    /// Free-text color name
    #[serde(default)]
    pub color: Option<String>,
}

/// Query parameters of `GET /hello-node`.
#[derive(Debug, Default, Deserialize)]
pub struct HelloNodeQuery {
    /// Show a random color
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub randomize: bool,
}

/// Interprets a query flag value.
///
/// Empty, `false`, `0`, `off` and `no` (any case) are false; every other
/// value is true.
pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "off" | "no"
    )
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().is_some_and(is_truthy))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET / - Landing page.
async fn index(State(state): State<AppState>) -> IndexPage {
    IndexPage::base(state.seo.clone())
}

/// POST / - Generate a kaomoji.
///
/// Always renders the page; a failed generation shows an in-page error.
async fn generate_kaomoji(State(state): State<AppState>, Form(form): Form<WordForm>) -> IndexPage {
    services::generate_kaomoji_page(
        state.seo.clone(),
        state.generator.as_ref(),
        form.word.as_deref(),
    )
    .await
}

/// GET /hello-node - Color page, optionally with a random color.
async fn hello_node(
    State(state): State<AppState>,
    Query(query): Query<HelloNodeQuery>,
) -> HelloNodePage {
    services::hello_node_page(
        state.seo.clone(),
        &state.colors,
        query.randomize,
        &mut rand::thread_rng(),
    )
}

/// POST /hello-node - Look up a color by name.
async fn lookup_color(
    State(state): State<AppState>,
    Form(form): Form<ColorForm>,
) -> HelloNodePage {
    services::lookup_color_page(state.seo.clone(), &state.colors, form.color.as_deref())
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the router with all page routes and static file fallback.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(generate_kaomoji))
        .route("/hello-node", get(hello_node).post(lookup_color))
        .route("/health", get(health_check))
        .fallback(static_files::serve_static)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if site data fails to load or the address cannot be
/// bound.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config.server.resolve_addr().await?;
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {err}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Shutdown signal received");
}
