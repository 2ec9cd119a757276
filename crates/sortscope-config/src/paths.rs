//! Platform-specific settings location.
//!
//! - Linux: `~/.config/sortscope/settings.toml`
//! - macOS: `~/Library/Application Support/sortscope/settings.toml`
//! - Windows: `%APPDATA%\sortscope\settings.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "sortscope";

/// File name of the persisted settings.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the working directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default settings file path.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}
