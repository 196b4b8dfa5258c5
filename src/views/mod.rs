//! Typed page contexts.
//!
//! Each struct is both the rendering context a page expects and the askama
//! template that renders it, so a template referring to a field the context
//! does not provide fails to compile. Every page carries the site `seo`
//! record.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;

use crate::models::{ColorEntry, SiteMetadata};

/// Landing page with the kaomoji form.
#[derive(Debug, Clone, Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Site metadata
    pub seo: Arc<SiteMetadata>,
    /// Generated kaomoji, set on success
    pub kaomoji: Option<String>,
    /// The submitted phrase, echoed back on failure
    pub word: Option<String>,
    /// True when generation failed
    pub error: bool,
}

impl IndexPage {
    /// Page with only the site metadata.
    pub fn base(seo: Arc<SiteMetadata>) -> Self {
        Self {
            seo,
            kaomoji: None,
            word: None,
            error: false,
        }
    }

    /// Page showing a generated kaomoji.
    pub fn generated(seo: Arc<SiteMetadata>, kaomoji: String) -> Self {
        Self {
            seo,
            kaomoji: Some(kaomoji),
            word: None,
            error: false,
        }
    }

    /// Page reporting that generation failed for `word`.
    pub fn failed(seo: Arc<SiteMetadata>, word: String) -> Self {
        Self {
            seo,
            kaomoji: None,
            word: Some(word),
            error: true,
        }
    }
}

/// Color page with the lookup form.
#[derive(Debug, Clone, Template, WebTemplate)]
#[template(path = "hello-node.html")]
pub struct HelloNodePage {
    /// Site metadata
    pub seo: Arc<SiteMetadata>,
    /// The matched or randomly chosen color
    pub color: Option<ColorEntry>,
    /// The submitted text when no color matched
    pub color_error: Option<String>,
}

impl HelloNodePage {
    /// Page with only the site metadata.
    pub fn base(seo: Arc<SiteMetadata>) -> Self {
        Self {
            seo,
            color: None,
            color_error: None,
        }
    }

    /// Page showing `color`.
    pub fn found(seo: Arc<SiteMetadata>, color: ColorEntry) -> Self {
        Self {
            seo,
            color: Some(color),
            color_error: None,
        }
    }

    /// Page reporting that `input` matched no color.
    pub fn not_found(seo: Arc<SiteMetadata>, input: String) -> Self {
        Self {
            seo,
            color: None,
            color_error: Some(input),
        }
    }
}
