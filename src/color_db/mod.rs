//! Named color table and lookup.
//!
//! This module provides the read-only color table used by the color pages.
//! The table is loaded once at startup (from the embedded `colors.json` or a
//! file named in the config) and shared between requests without locking.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::models::ColorEntry;

/// Normalizes free-text color input into a table key.
///
/// Removes every whitespace character and lowercases the rest, so
/// `"  Sky Blue "` becomes `"skyblue"`. Applying it twice gives the same
/// result as applying it once.
///
/// Whitespace here is the ECMAScript `\s` class: Unicode white space plus
/// the byte order mark (U+FEFF), but not NEXT LINE (U+0085).
#[must_use]
pub fn normalize_color_name(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !is_input_space(c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_input_space(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

/// Raw color record from colors.json.
#[derive(Debug, Deserialize)]
struct ColorRecord {
    name: String,
    hex: String,
}

/// Database schema from colors.json.
#[derive(Debug, Deserialize)]
struct ColorDatabase {
    #[allow(dead_code)]
    version: String,
    colors: BTreeMap<String, ColorRecord>,
}

/// Immutable color table with O(1) lookup by normalized key.
///
/// Entries keep the key order of the source table (sorted by key), which
/// makes index-based selection deterministic for a given unit value.
#[derive(Debug, Clone)]
pub struct ColorDb {
    /// All color entries
    colors: Vec<ColorEntry>,
    /// Fast lookup by key
    lookup: HashMap<String, usize>,
}

impl ColorDb {
    /// Loads the color table from the embedded JSON file.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("colors.json")).context("Failed to load embedded colors.json")
    }

    /// Loads the color table from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read color table: {}", path.display()))?;
        Self::from_json(&content)
            .context(format!("Failed to load color table: {}", path.display()))
    }

    /// Parses a color table from a JSON string.
    ///
    /// Fails if the JSON is malformed, a hex value is invalid, a key is not
    /// already in normalized form, or the table is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let db: ColorDatabase = serde_json::from_str(json).context("Malformed color table")?;

        let entries = db
            .colors
            .into_iter()
            .map(|(key, record)| {
                ColorEntry::new(key.clone(), record.name, &record.hex)
                    .context(format!("Invalid color '{key}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_entries(entries)
    }

    /// Builds a table from already constructed entries.
    pub fn from_entries(colors: Vec<ColorEntry>) -> Result<Self> {
        if colors.is_empty() {
            anyhow::bail!("Color table is empty");
        }

        let mut lookup = HashMap::with_capacity(colors.len());
        for (idx, color) in colors.iter().enumerate() {
            if color.key.is_empty() || normalize_color_name(&color.key) != color.key {
                anyhow::bail!(
                    "Color key '{}' must be lowercase without whitespace",
                    color.key
                );
            }
            if lookup.insert(color.key.clone(), idx).is_some() {
                anyhow::bail!("Duplicate color key '{}'", color.key);
            }
        }

        Ok(Self { colors, lookup })
    }

    /// Gets a color by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColorEntry> {
        let idx = self.lookup.get(key)?;
        self.colors.get(*idx)
    }

    /// Selects an entry from a unit value in `[0, 1)`.
    ///
    /// The table is split into `len` equal-width buckets, so a uniform unit
    /// value gives a uniform choice. Values outside the range are clamped.
    #[must_use]
    pub fn pick(&self, unit: f64) -> Option<&ColorEntry> {
        if self.colors.is_empty() {
            return None;
        }
        let unit = if unit.is_nan() { 0.0 } else { unit.clamp(0.0, 1.0) };
        let idx = ((self.colors.len() as f64) * unit) as usize;
        self.colors.get(idx.min(self.colors.len() - 1))
    }

    /// Selects an entry uniformly at random.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ColorEntry> {
        self.pick(rng.gen::<f64>())
    }

    /// Returns the number of colors in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
