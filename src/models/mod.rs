//! Data models shared by the lookup store, context builders and templates.
//!
//! Models are independent of the HTTP layer.

pub mod color;
pub mod rgb;
pub mod seo;

// Re-export all model types
pub use color::ColorEntry;
pub use rgb::RgbColor;
pub use seo::SiteMetadata;
