//! Static configuration loaded once at startup
//!
//! This configuration is read-only after the daemon starts.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::DEFAULT_THERMAL_SERVICE;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the daemon listens on
    pub hostname: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Thermal service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalConfig {
    /// Name the thermal service is looked up under
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Fixture file served as the thermal HAL
    ///
    /// When unset and not in mock mode, no service is registered and every
    /// query answers with an empty result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
}

fn default_service_name() -> String {
    DEFAULT_THERMAL_SERVICE.to_string()
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            fixture: None,
        }
    }
}

/// Static configuration for the hwprops daemon.
///
/// Located at `~/.config/hwprops/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Server configuration (hostname, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Thermal service lookup
    #[serde(default)]
    pub thermal: ThermalConfig,
}

impl StaticConfig {
    /// Parse StaticConfig from TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize StaticConfig to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
