//! Configuration management for the application.
//!
//! This module handles loading and validating the server configuration from
//! TOML, layering environment variables on top, with platform-specific
//! directory resolution for the default config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::branding::APP_DATA_DIR;

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address: an IP (e.g. "0.0.0.0") or a resolvable hostname
    pub host: String,
    /// Listening port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Resolves the socket address to bind.
    ///
    /// IP literals are used as-is; hostnames go through the system resolver
    /// and the first address wins.
    pub async fn resolve_addr(&self) -> Result<SocketAddr> {
        let host = self.host.trim();
        tokio::net::lookup_host((host, self.port))
            .await
            .context(format!("Failed to resolve bind host: {host}"))?
            .next()
            .context(format!("Bind host resolved to no addresses: {host}"))
    }
}

/// Completion API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// API key sent as a bearer token (usually from `OPENAI_API_KEY`)
    pub api_key: String,
    /// Base URL of the OpenAI-compatible service
    pub base_url: String,
    /// Completion model identifier
    pub model: String,
    /// Sampling temperature (0.0-2.0)
    pub temperature: f64,
    /// Output length cap in tokens
    pub max_tokens: u32,
    /// Transport timeout for a single call, in seconds
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            temperature: 0.8,
            max_tokens: 100,
            timeout_secs: 30,
        }
    }
}

/// Static site data sources.
///
/// Unset paths fall back to the tables embedded in the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// JSON file with the `seo` record
    pub seo_path: Option<PathBuf>,
    /// JSON file with the color table
    pub colors_path: Option<PathBuf>,
    /// Deployment domain used to resolve the `seo.url` placeholder
    pub project_domain: Option<String>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/kaomoji-web/config.toml`
/// - macOS: `~/Library/Application Support/kaomoji-web/config.toml`
/// - Windows: `%APPDATA%\kaomoji-web\config.toml`
///
/// # Environment
///
/// `PORT`, `HOST`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` and
/// `PROJECT_DOMAIN` override the file values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP listener
    pub server: ServerConfig,
    /// Completion API
    pub generation: GenerationConfig,
    /// Site data
    pub site: SiteConfig,
}

impl Config {
    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration.
    ///
    /// Reads `path` if given (it must exist), otherwise the default config
    /// file if present, otherwise defaults, then applies environment
    /// overrides. Callers validate after their own overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::config_file_path() {
                Ok(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).context(format!("Failed to parse config file: {}", path.display()))
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .context(format!("PORT is not a valid port number: {port}"))?;
        }
        if let Some(host) = var("HOST") {
            self.server.host = host.trim().to_string();
        }
        if let Some(key) = var("OPENAI_API_KEY") {
            self.generation.api_key = key.trim().to_string();
        }
        if let Some(url) = var("OPENAI_BASE_URL") {
            self.generation.base_url = url.trim().to_string();
        }
        if let Some(model) = var("OPENAI_MODEL") {
            self.generation.model = model.trim().to_string();
        }
        if let Some(domain) = var("PROJECT_DOMAIN") {
            self.site.project_domain = Some(domain.trim().to_string());
        }

        Ok(())
    }

    /// Applies command-line overrides on top of file and environment values.
    pub fn apply_overrides(&mut self, port: Option<u16>, host: Option<&str>) {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(host) = host {
            self.server.host = host.trim().to_string();
        }
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `host` is non-empty and contains no whitespace
    /// - `temperature` is within 0.0-2.0
    /// - `max_tokens` and `timeout_secs` are non-zero
    /// - `model` is set
    /// - `base_url` is an http(s) URL
    pub fn validate(&self) -> Result<()> {
        let host = self.server.host.trim();
        if host.is_empty() || host.contains(char::is_whitespace) {
            anyhow::bail!("Invalid bind host '{}'", self.server.host);
        }

        let generation = &self.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            anyhow::bail!(
                "Invalid temperature {}. Must be between 0.0 and 2.0",
                generation.temperature
            );
        }
        if generation.max_tokens == 0 {
            anyhow::bail!("max_tokens must be greater than 0");
        }
        if generation.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        if generation.model.trim().is_empty() {
            anyhow::bail!("Completion model must not be empty");
        }
        let base_url = generation.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("Invalid base_url '{base_url}'. Must start with http:// or https://");
        }

        Ok(())
    }
}
