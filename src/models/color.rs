//! Named color entries served by the color lookup pages.

use serde::Serialize;

use super::RgbColor;

/// A single named color from the color table.
///
/// Entries are created once when the table is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    /// Lookup key: lowercase, no whitespace (e.g. "skyblue")
    pub key: String,
    /// Display name (e.g. "Sky Blue")
    pub name: String,
    /// Hex value as written in the table (e.g. "#87CEEB")
    pub hex: String,
    /// Parsed channels of `hex`
    pub rgb: RgbColor,
}

impl ColorEntry {
    /// Creates an entry, parsing `hex` into its RGB channels.
    ///
    /// # Errors
    ///
    /// Returns an error if `hex` is not a `#RRGGBB` value.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        hex: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let hex = hex.into();
        let rgb = RgbColor::from_hex(&hex)?;
        Ok(Self {
            key: key.into(),
            name: name.into(),
            hex: rgb.to_hex(),
            rgb,
        })
    }

    /// Readable text color for content drawn on a swatch of this color.
    pub fn text_color(&self) -> &'static str {
        self.rgb.contrast_text()
    }
}
