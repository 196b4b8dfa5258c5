//! Branding and application identity.
//!
//! Centralizes the names used in log lines, the config directory and the
//! outbound `User-Agent` header.

/// The human-readable display name of the application.
pub const APP_DISPLAY_NAME: &str = "Kaomoji Web";

/// The binary/executable name (lowercase, no spaces).
///
/// Used in:
/// - Cargo.toml package name
/// - Command examples in documentation
/// - The `User-Agent` sent to the completion API
pub const APP_BINARY_NAME: &str = "kaomoji-web";

/// The directory name for application data (config file).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "kaomoji-web";

/// Short description for help text.
pub const APP_DESCRIPTION: &str = "Server-rendered kaomoji generator and color lookup pages";

/// `User-Agent` header value for outbound requests.
pub fn user_agent() -> String {
    format!("{}/{}", APP_BINARY_NAME, env!("CARGO_PKG_VERSION"))
}
