//! hwprops CLI Library
//!
//! This library provides the core functionality for the hwprops CLI tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::HwPropsClient`] which provides
//! programmatic access to the hwprops server. Configuration types are also
//! available via [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use hwpropsctl::client::HwPropsClient;
//! use hwprops_core::{TemperatureSource, TemperatureType};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HwPropsClient::with_config(
//!     "http://localhost:3000".to_string(),
//!     10,  // timeout in seconds
//!     3,   // max retries
//!     Duration::from_millis(500),  // retry delay unit
//! )?;
//!
//! let temps = client
//!     .get_device_temperatures(TemperatureType::Cpu, TemperatureSource::Current)
//!     .await?;
//! println!("{:?}", temps.values);
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for communicating with the hwprops server.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
