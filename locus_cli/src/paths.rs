//! Centralized path management for the locus CLI

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "locus";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the path to the configuration directory
///
/// `XDG_CONFIG_HOME` wins on Unix-like systems. Otherwise the platform
/// config directory is used:
/// - `~/.config/locus` on Linux
/// - `~/Library/Application Support/locus` on macOS
/// - `%APPDATA%/locus` on Windows
///
/// Falls back to `.locus` in the current directory if neither can be determined.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".locus"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
