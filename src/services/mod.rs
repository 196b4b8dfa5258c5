//! Rendering-context builders.
//!
//! Each builder turns raw request input into the typed page context its
//! template expects. Builders never fail: generation errors and lookup misses
//! become page states, not HTTP errors.

pub mod colors;
pub mod kaomoji;

// Re-export commonly used functions
pub use colors::{hello_node_page, lookup_color_page};
pub use kaomoji::generate_kaomoji_page;
