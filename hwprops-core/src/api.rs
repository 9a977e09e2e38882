//! API models for the hwprops REST API
//!
//! This module contains request and response models shared by the daemon
//! and the CLI client.

use crate::types::{CpuUsageInfo, TemperatureSource, TemperatureType};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ApiResponse<T> {
    #[serde(rename = "success")]
    Success { data: T },
    #[serde(rename = "error")]
    Error { error: String },
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Create an error response
    pub fn error(error: String) -> Self {
        Self::Error { error }
    }
}

/// Server information response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Server version
    pub version: String,
    /// Name the thermal service is looked up under
    pub service_name: String,
    /// Whether a thermal service handle is held
    pub hal_connected: bool,
    /// Whether the daemon serves the built-in demo fixture
    #[serde(default)]
    pub mock_mode: bool,
    /// Server uptime in seconds
    pub uptime: u64,
    /// Software information
    pub software: String,
}

/// Fan speeds, one entry per cooling device in HAL order
///
/// A speed the HAL cannot read is `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FanSpeedsResponse {
    pub speeds: Vec<Option<f32>>,
}

impl FanSpeedsResponse {
    pub fn new(speeds: Vec<f32>) -> Self {
        Self {
            speeds: speeds.into_iter().map(known).collect(),
        }
    }
}

/// Temperatures of one device type, projected by source
///
/// JSON has no NaN, so values the HAL does not know travel as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceTemperaturesResponse {
    #[serde(rename = "type")]
    pub kind: TemperatureType,
    pub source: TemperatureSource,
    pub values: Vec<Option<f32>>,
}

impl DeviceTemperaturesResponse {
    pub fn new(kind: TemperatureType, source: TemperatureSource, values: Vec<f32>) -> Self {
        Self {
            kind,
            source,
            values: values.into_iter().map(known).collect(),
        }
    }
}

/// `None` for values JSON cannot carry
fn known(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// CPU usages; `None` marks an offline CPU and keeps its position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuUsagesResponse {
    pub usages: Vec<Option<CpuUsageInfo>>,
}
