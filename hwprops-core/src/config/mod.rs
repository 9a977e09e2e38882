//! Configuration types for hwprops
//!
//! - [`StaticConfig`] - Server and thermal service settings, loaded once at startup
//! - [`default_config_path`] / [`default_cli_config_path`] - XDG-aware file locations

mod paths;
mod static_config;

pub use paths::{default_cli_config_path, default_config_path};
pub use static_config::{ServerConfig, StaticConfig, ThermalConfig};
