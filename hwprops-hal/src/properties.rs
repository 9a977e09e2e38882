//! Hardware properties bridge
//!
//! Forwards fan speed, device temperature and CPU usage queries to the
//! thermal HAL and converts the replies into plain values for callers.
//!
//! Every query degrades to an empty result: a missing service, a HAL failure
//! status or a transport failure is logged and never surfaced as an error.
//! Queries are not retried.

use crate::service_manager::ServiceManager;
use crate::thermal::{HalCallback, Thermal, TransportResult};
use hwprops_core::{CpuUsageInfo, TemperatureSource, TemperatureType, ThermalStatus};
use std::sync::Arc;
use tracing::{debug, error};

/// Bridge between callers and the thermal HAL
pub struct HardwareProperties {
    service_name: String,
    thermal: Option<Arc<dyn Thermal>>,
}

impl HardwareProperties {
    /// Create a bridge for the named service. No lookup happens until [`init`](Self::init).
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            thermal: None,
        }
    }

    /// Create a bridge already holding a handle
    pub fn with_service(service_name: impl Into<String>, thermal: Arc<dyn Thermal>) -> Self {
        Self {
            service_name: service_name.into(),
            thermal: Some(thermal),
        }
    }

    /// Acquire the thermal service handle if none is held yet.
    ///
    /// Returns whether a handle is held afterwards.
    pub fn init(&mut self, services: &ServiceManager) -> bool {
        if self.thermal.is_none() {
            self.thermal = services.get_service(&self.service_name);
        }

        if self.thermal.is_none() {
            error!("Unable to get thermal service '{}'", self.service_name);
            return false;
        }
        true
    }

    pub fn is_connected(&self) -> bool {
        self.thermal.is_some()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Current speed of every cooling device, in HAL order
    pub fn fan_speeds(&self) -> Vec<f32> {
        self.fetch("fan speeds", |thermal, callback| {
            thermal.get_cooling_devices(callback)
        })
        .into_iter()
        .map(|device| device.current_value)
        .collect()
    }

    /// Selected value of every temperature sensor of the given type, in HAL order
    ///
    /// Unknown thresholds are NaN.
    pub fn device_temperatures(&self, kind: TemperatureType, source: TemperatureSource) -> Vec<f32> {
        self.fetch("device temperatures", |thermal, callback| {
            thermal.get_temperatures(callback)
        })
        .into_iter()
        .filter(|temperature| temperature.kind == kind)
        .map(|temperature| source.select(&temperature))
        .collect()
    }

    /// Usage of every CPU; offline CPUs keep their position as `None`
    pub fn cpu_usages(&self) -> Vec<Option<CpuUsageInfo>> {
        self.fetch("cpu usages", |thermal, callback| thermal.get_cpu_usages(callback))
            .iter()
            .map(|usage| usage.is_online.then(|| CpuUsageInfo::from(usage)))
            .collect()
    }

    /// Perform one HAL call and return the records it accepted
    fn fetch<T>(
        &self,
        what: &str,
        call: impl FnOnce(&dyn Thermal, HalCallback<'_, T>) -> TransportResult,
    ) -> Vec<T> {
        let Some(thermal) = self.thermal.as_deref() else {
            error!("Cannot get {}: thermal service is not available", what);
            return Vec::new();
        };

        let mut records = Vec::new();
        let mut on_reply = |status: ThermalStatus, values: Vec<T>| {
            if status.is_success() {
                records = values;
            } else {
                error!(
                    "Failed to get {} from thermal HAL: {}",
                    what, status.debug_message
                );
            }
        };

        if let Err(err) = call(thermal, &mut on_reply) {
            error!(
                "Thermal HAL call for {} failed with exception code {}: {}",
                what,
                err.code.as_raw(),
                err.message
            );
        }

        debug!("Thermal HAL returned {} records for {}", records.len(), what);
        records
    }
}

impl std::fmt::Debug for HardwareProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HardwareProperties")
            .field("service_name", &self.service_name)
            .field("connected", &self.is_connected())
            .finish()
    }
}
