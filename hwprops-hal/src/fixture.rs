//! Fixture-backed thermal HAL
//!
//! Serves a fixed data set loaded from TOML. Used for mock mode and for
//! hosts without a thermal service. Records are served verbatim.
//!
//! ```toml
//! [[cooling_devices]]
//! type = "fan_rpm"
//! name = "cpu_fan"
//! current_value = 1200.0
//!
//! [[temperatures]]
//! type = "cpu"
//! name = "cpu0"
//! current_value = 45.5
//! throttling_threshold = 85.0
//!
//! [[cpu_usages]]
//! name = "cpu0"
//! active = 1500
//! total = 4000
//! is_online = true
//!
//! [faults.temperatures]
//! kind = "status"
//! debug_message = "sensor bus offline"
//! ```

use crate::thermal::{ExceptionCode, HalCallback, Thermal, TransportError, TransportResult};
use hwprops_core::{
    CoolingDevice, CoolingType, CpuUsage, HwPropsError, Result, Temperature, TemperatureType,
    ThermalStatus,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Injected failure for one getter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fault {
    /// The HAL replies with a failure status and no records
    Status { debug_message: String },
    /// The remote call fails at the transport level
    Transport {
        code: ExceptionCode,
        #[serde(default)]
        message: String,
        /// Deliver the records before failing
        #[serde(default)]
        after_reply: bool,
    },
}

/// Per-getter fault injection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_devices: Option<Fault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperatures: Option<Fault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usages: Option<Fault>,
}

/// HAL data set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalFixture {
    #[serde(default)]
    pub cooling_devices: Vec<CoolingDevice>,
    #[serde(default)]
    pub temperatures: Vec<Temperature>,
    #[serde(default)]
    pub cpu_usages: Vec<CpuUsage>,
    #[serde(default)]
    pub faults: Faults,
}

impl ThermalFixture {
    /// Parse and validate a fixture from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        let fixture: ThermalFixture = toml::from_str(content)
            .map_err(|e| HwPropsError::Fixture(format!("failed to parse fixture: {}", e)))?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Offline CPUs carry no meaningful counters and are not checked
    fn validate(&self) -> Result<()> {
        for usage in &self.cpu_usages {
            if usage.is_online && usage.active > usage.total {
                return Err(HwPropsError::Fixture(format!(
                    "cpu '{}': active time {} exceeds total {}",
                    usage.name, usage.active, usage.total
                )));
            }
        }
        Ok(())
    }
}

/// `Thermal` implementation serving a [`ThermalFixture`]
#[derive(Debug, Clone)]
pub struct FixtureThermal {
    fixture: ThermalFixture,
}

impl FixtureThermal {
    pub fn new(fixture: ThermalFixture) -> Self {
        Self { fixture }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self::new(ThermalFixture::from_toml(content)?))
    }

    /// Load a fixture file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let thermal = Self::from_toml(&content).map_err(|e| match e {
            HwPropsError::Fixture(msg) => HwPropsError::Fixture(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        debug!(
            "Loaded thermal fixture from {} ({} cooling devices, {} temperatures, {} cpus)",
            path.display(),
            thermal.fixture.cooling_devices.len(),
            thermal.fixture.temperatures.len(),
            thermal.fixture.cpu_usages.len()
        );
        Ok(thermal)
    }

    /// Built-in data set for mock mode
    pub fn demo() -> Self {
        let fan = |name: &str, rpm: f32| CoolingDevice {
            kind: CoolingType::FanRpm,
            name: name.to_string(),
            current_value: rpm,
        };
        let temp = |kind, name: &str, current, throttling, shutdown, vr| Temperature {
            kind,
            name: name.to_string(),
            current_value: current,
            throttling_threshold: throttling,
            shutdown_threshold: shutdown,
            vr_throttling_threshold: vr,
        };
        let cpu = |name: &str, active, total, is_online| CpuUsage {
            name: name.to_string(),
            active,
            total,
            is_online,
        };

        Self::new(ThermalFixture {
            cooling_devices: vec![fan("cpu_fan", 1200.0), fan("case_fan", 850.0)],
            temperatures: vec![
                temp(TemperatureType::Cpu, "cpu0", 45.5, 85.0, 95.0, f32::NAN),
                temp(TemperatureType::Cpu, "cpu1", 47.0, 85.0, 95.0, f32::NAN),
                temp(TemperatureType::Gpu, "gpu0", 52.0, 90.0, 100.0, f32::NAN),
                temp(TemperatureType::Battery, "battery", 31.0, f32::NAN, 60.0, f32::NAN),
                temp(TemperatureType::Skin, "skin", 33.5, 40.0, 45.0, 42.0),
            ],
            cpu_usages: vec![
                cpu("cpu0", 15_000, 40_000, true),
                cpu("cpu1", 12_500, 40_000, true),
                cpu("cpu2", 0, 0, false),
                cpu("cpu3", 9_800, 40_000, true),
            ],
            faults: Faults::default(),
        })
    }

    pub fn fixture(&self) -> &ThermalFixture {
        &self.fixture
    }
}

fn serve<T: Clone>(records: &[T], fault: Option<&Fault>, callback: HalCallback<'_, T>) -> TransportResult {
    match fault {
        None => {
            callback(ThermalStatus::success(), records.to_vec());
            Ok(())
        }
        Some(Fault::Status { debug_message }) => {
            callback(ThermalStatus::failure(debug_message.clone()), Vec::new());
            Ok(())
        }
        Some(Fault::Transport {
            code,
            message,
            after_reply,
        }) => {
            if *after_reply {
                callback(ThermalStatus::success(), records.to_vec());
            }
            Err(TransportError::new(*code, message.clone()))
        }
    }
}

impl Thermal for FixtureThermal {
    fn get_cooling_devices(&self, callback: HalCallback<'_, CoolingDevice>) -> TransportResult {
        serve(
            &self.fixture.cooling_devices,
            self.fixture.faults.cooling_devices.as_ref(),
            callback,
        )
    }

    fn get_temperatures(&self, callback: HalCallback<'_, Temperature>) -> TransportResult {
        serve(
            &self.fixture.temperatures,
            self.fixture.faults.temperatures.as_ref(),
            callback,
        )
    }

    fn get_cpu_usages(&self, callback: HalCallback<'_, CpuUsage>) -> TransportResult {
        serve(
            &self.fixture.cpu_usages,
            self.fixture.faults.cpu_usages.as_ref(),
            callback,
        )
    }
}
