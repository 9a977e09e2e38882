//! Configuration loading for the daemon
//!
//! Reads the static TOML configuration, creating it with defaults on first
//! run, and builds the service manager the bridge looks the thermal HAL up in.

use hwprops_core::{HwPropsError, Result, StaticConfig};
use hwprops_hal::{FixtureThermal, ServiceManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

/// Load static config from TOML file, creating with defaults if missing.
pub async fn load_static_config(path: &Path) -> Result<StaticConfig> {
    if !path.exists() {
        info!(
            "Static config not found at {}. Creating with defaults.",
            path.display()
        );

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                HwPropsError::Config(format!(
                    "Failed to create config directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let config = StaticConfig::default();
        let toml_str = config
            .to_toml()
            .map_err(|e| HwPropsError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, &toml_str)
            .await
            .map_err(|e| HwPropsError::Config(format!("Failed to write config file: {}", e)))?;

        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| HwPropsError::Config(format!("Failed to read config file: {}", e)))?;

    StaticConfig::from_toml(&content)
        .map_err(|e| HwPropsError::Config(format!("Failed to parse config file: {}", e)))
}

/// Where the thermal HAL data comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ThermalSource {
    /// Built-in demo data set
    Demo,
    /// Fixture file
    Fixture(PathBuf),
    /// Nothing registered; the bridge runs without a service
    None,
}

impl ThermalSource {
    /// Pick the source: `--mock` wins, then `--fixture`, then the config file.
    pub fn resolve(mock: bool, fixture_flag: Option<PathBuf>, config: &StaticConfig) -> Self {
        if mock {
            ThermalSource::Demo
        } else if let Some(path) = fixture_flag.or_else(|| config.thermal.fixture.clone()) {
            ThermalSource::Fixture(path)
        } else {
            ThermalSource::None
        }
    }
}

/// Register the thermal service under `service_name` according to `source`.
pub fn build_service_manager(service_name: &str, source: &ThermalSource) -> Result<ServiceManager> {
    let mut services = ServiceManager::new();

    match source {
        ThermalSource::Demo => {
            info!("Mock mode: serving built-in demo thermal data");
            services.register(service_name, Arc::new(FixtureThermal::demo()));
        }
        ThermalSource::Fixture(path) => {
            info!("Serving thermal data from fixture {}", path.display());
            services.register(service_name, Arc::new(FixtureThermal::from_path(path)?));
        }
        ThermalSource::None => {
            warn!(
                "No thermal service configured. Use --mock or --fixture <path>; all queries will return empty results."
            );
        }
    }

    Ok(services)
}
