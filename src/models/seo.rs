//! Site metadata (`seo`) shared by every rendered page.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder `url` value replaced with the deployment domain at load time.
pub const URL_SENTINEL: &str = "glitch-default";

/// Site-wide metadata rendered into every page head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    /// Canonical site URL
    pub url: String,
    /// Page title
    pub title: String,
    /// Meta description
    pub description: String,
    /// Social preview image
    #[serde(default)]
    pub image: Option<String>,
}

impl SiteMetadata {
    /// Loads the metadata embedded in the binary.
    ///
    /// `project_domain` resolves the [`URL_SENTINEL`] placeholder.
    pub fn load(project_domain: Option<&str>) -> Result<Self> {
        Self::from_json(include_str!("seo.json"), project_domain)
            .context("Failed to parse embedded seo.json")
    }

    /// Loads metadata from a JSON file on disk.
    pub fn from_path(path: &Path, project_domain: Option<&str>) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read site metadata: {}", path.display()))?;
        Self::from_json(&content, project_domain)
            .context(format!("Failed to parse site metadata: {}", path.display()))
    }

    /// Parses metadata from a JSON string and resolves the URL placeholder.
    pub fn from_json(json: &str, project_domain: Option<&str>) -> Result<Self> {
        let mut seo: Self = serde_json::from_str(json)?;
        seo.resolve_url(project_domain);
        Ok(seo)
    }

    fn resolve_url(&mut self, project_domain: Option<&str>) {
        if self.url != URL_SENTINEL {
            return;
        }

        match project_domain.map(str::trim).filter(|d| !d.is_empty()) {
            Some(domain) => self.url = format!("https://{domain}.glitch.me"),
            None => {
                warn!("seo.url is a placeholder and PROJECT_DOMAIN is not set; leaving url empty");
                self.url = String::new();
            }
        }
    }
}
