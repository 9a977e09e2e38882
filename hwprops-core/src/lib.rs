//! hwprops Core Library
//!
//! Shared types, API models, and configuration for the hwprops thermal
//! bridge. This crate is used by the HAL bridge, the daemon, and the CLI.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{default_cli_config_path, default_config_path, StaticConfig};
pub use error::*;
pub use types::*;
