//! Kaomoji Web Library
//!
//! This library provides the pieces of the kaomoji web application:
//! the color lookup table, the completion API client, the rendering-context
//! builders for each page, and the axum router that ties them together.

// Module declarations
pub mod branding;
pub mod color_db;
pub mod config;
pub mod generation;
pub mod models;
pub mod services;
pub mod views;
pub mod web;
