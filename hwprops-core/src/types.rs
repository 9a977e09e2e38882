//! Core types and data structures for hwprops
//!
//! Records mirror the thermal HAL data model. Caller-facing values
//! ([`TemperatureSource`], [`CpuUsageInfo`]) are what the bridge hands out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default name the thermal service is registered under
pub const DEFAULT_THERMAL_SERVICE: &str = "thermal";

/// Device class a temperature sensor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureType {
    Unknown,
    Cpu,
    Gpu,
    Battery,
    Skin,
}

impl TemperatureType {
    /// All variants, in HAL value order
    pub const ALL: [TemperatureType; 5] = [
        TemperatureType::Unknown,
        TemperatureType::Cpu,
        TemperatureType::Gpu,
        TemperatureType::Battery,
        TemperatureType::Skin,
    ];

    /// Integer value used by the HAL
    pub fn as_raw(self) -> i32 {
        match self {
            TemperatureType::Unknown => -1,
            TemperatureType::Cpu => 0,
            TemperatureType::Gpu => 1,
            TemperatureType::Battery => 2,
            TemperatureType::Skin => 3,
        }
    }

    /// Map a HAL integer back to a type
    pub fn from_raw(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_raw() == value)
    }

    /// Lowercase name, as used in configuration and query strings
    pub fn name(self) -> &'static str {
        match self {
            TemperatureType::Unknown => "unknown",
            TemperatureType::Cpu => "cpu",
            TemperatureType::Gpu => "gpu",
            TemperatureType::Battery => "battery",
            TemperatureType::Skin => "skin",
        }
    }
}

impl fmt::Display for TemperatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureType {
    type Err = String;

    /// Accepts the lowercase name (case-insensitive) or the HAL integer
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<i32>() {
            return Self::from_raw(raw).ok_or_else(|| format!("Unknown temperature type: {}", raw));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid temperature type '{}'. Expected one of: unknown, cpu, gpu, battery, skin",
                    s
                )
            })
    }
}

/// Which value of a temperature record the caller wants
///
/// The integer values are a stable contract with callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemperatureSource {
    /// Current reading
    Current,
    /// Threshold at which throttling starts
    Throttling,
    /// Threshold at which the device shuts down
    Shutdown,
    /// Throttling threshold used while in VR mode
    ThrottlingBelowVrMin,
}

impl TemperatureSource {
    pub const ALL: [TemperatureSource; 4] = [
        TemperatureSource::Current,
        TemperatureSource::Throttling,
        TemperatureSource::Shutdown,
        TemperatureSource::ThrottlingBelowVrMin,
    ];

    pub fn as_raw(self) -> i32 {
        match self {
            TemperatureSource::Current => 0,
            TemperatureSource::Throttling => 1,
            TemperatureSource::Shutdown => 2,
            TemperatureSource::ThrottlingBelowVrMin => 3,
        }
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_raw() == value)
    }

    pub fn name(self) -> &'static str {
        match self {
            TemperatureSource::Current => "current",
            TemperatureSource::Throttling => "throttling",
            TemperatureSource::Shutdown => "shutdown",
            TemperatureSource::ThrottlingBelowVrMin => "throttling-below-vr-min",
        }
    }

    /// Pick the field of `temperature` this source refers to
    pub fn select(self, temperature: &Temperature) -> f32 {
        match self {
            TemperatureSource::Current => temperature.current_value,
            TemperatureSource::Throttling => temperature.throttling_threshold,
            TemperatureSource::Shutdown => temperature.shutdown_threshold,
            TemperatureSource::ThrottlingBelowVrMin => temperature.vr_throttling_threshold,
        }
    }
}

impl fmt::Display for TemperatureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<i32>() {
            return Self::from_raw(raw)
                .ok_or_else(|| format!("Unknown temperature source: {}", raw));
        }
        let normalized = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|src| src.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| {
                format!(
                    "Invalid temperature source '{}'. Expected one of: current, throttling, shutdown, throttling-below-vr-min",
                    s
                )
            })
    }
}

/// Kind of cooling device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingType {
    /// Fan whose value is reported in RPM
    FanRpm,
}

/// Cooling device record reported by the HAL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolingDevice {
    #[serde(rename = "type")]
    pub kind: CoolingType,
    pub name: String,
    /// Current speed (RPM for fans)
    pub current_value: f32,
}

/// Temperature record reported by the HAL
///
/// Thresholds the HAL does not know are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(rename = "type")]
    pub kind: TemperatureType,
    pub name: String,
    pub current_value: f32,
    #[serde(default = "nan")]
    pub throttling_threshold: f32,
    #[serde(default = "nan")]
    pub shutdown_threshold: f32,
    #[serde(default = "nan")]
    pub vr_throttling_threshold: f32,
}

fn nan() -> f32 {
    f32::NAN
}

/// Per-CPU usage record reported by the HAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuUsage {
    pub name: String,
    /// Active time since boot
    pub active: u64,
    /// Total time since boot
    pub total: u64,
    pub is_online: bool,
}

/// Usage of one online CPU as handed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuUsageInfo {
    pub active: u64,
    pub total: u64,
}

impl From<&CpuUsage> for CpuUsageInfo {
    fn from(usage: &CpuUsage) -> Self {
        Self {
            active: usage.active,
            total: usage.total,
        }
    }
}

/// Status code attached to every HAL reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalStatusCode {
    #[default]
    Success,
    Failure,
}

/// HAL reply status
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThermalStatus {
    pub code: ThermalStatusCode,
    #[serde(default)]
    pub debug_message: String,
}

impl ThermalStatus {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failure(debug_message: impl Into<String>) -> Self {
        Self {
            code: ThermalStatusCode::Failure,
            debug_message: debug_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == ThermalStatusCode::Success
    }
}
