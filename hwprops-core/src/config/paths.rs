//! Default path resolution for configuration files
//!
//! Uses XDG Base Directory specification when available, with sensible fallbacks.

use std::path::PathBuf;

/// Returns the default path for the static configuration file.
///
/// Uses XDG config directory if available:
/// - Linux/macOS: `~/.config/hwprops/config.toml`
/// - Fallback: `/etc/hwprops/config.toml`
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the default path for the CLI configuration file.
///
/// - Linux/macOS: `~/.config/hwprops/cli.toml`
/// - Fallback: `/etc/hwprops/cli.toml`
pub fn default_cli_config_path() -> PathBuf {
    config_dir().join("cli.toml")
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("hwprops")
}
