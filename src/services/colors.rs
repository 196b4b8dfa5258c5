//! Color lookup and random color pages.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::color_db::{normalize_color_name, ColorDb};
use crate::models::SiteMetadata;
use crate::views::HelloNodePage;

/// Builds the color page for a submitted `color` name.
///
/// Blank input gives the base page. Otherwise the input is normalized
/// (whitespace removed, lowercased) and looked up as an exact key; a miss
/// echoes the original, non-normalized input.
pub fn lookup_color_page(
    seo: Arc<SiteMetadata>,
    colors: &ColorDb,
    color: Option<&str>,
) -> HelloNodePage {
    let Some(input) = color.filter(|c| !c.is_empty()) else {
        return HelloNodePage::base(seo);
    };

    let key = normalize_color_name(input);
    match colors.get(&key) {
        Some(entry) => HelloNodePage::found(seo, entry.clone()),
        None => {
            debug!(input = %input, key = %key, "no color matched");
            HelloNodePage::not_found(seo, input.to_string())
        }
    }
}

/// Builds the color page, showing a random color when `randomize` is set.
pub fn hello_node_page<R: Rng + ?Sized>(
    seo: Arc<SiteMetadata>,
    colors: &ColorDb,
    randomize: bool,
    rng: &mut R,
) -> HelloNodePage {
    if !randomize {
        return HelloNodePage::base(seo);
    }

    match colors.random(rng) {
        Some(entry) => HelloNodePage::found(seo, entry.clone()),
        None => HelloNodePage::base(seo),
    }
}
