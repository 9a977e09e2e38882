//! hwprops-hal
//!
//! Thermal HAL abstraction and the hardware properties bridge. The daemon
//! uses this crate to answer fan speed, temperature and CPU usage queries.
//!
//! Public API:
//! - `thermal::Thermal`: the thermal HAL query interface
//! - `service_manager::ServiceManager`: named lookup of thermal services
//! - `properties::HardwareProperties`: the bridge callers talk to
//! - `fixture::FixtureThermal`: a HAL serving a fixed data set

pub mod fixture;
pub mod properties;
pub mod service_manager;
pub mod thermal;

pub use fixture::{Fault, Faults, FixtureThermal, ThermalFixture};
pub use properties::HardwareProperties;
pub use service_manager::ServiceManager;
pub use thermal::{ExceptionCode, HalCallback, Thermal, TransportError, TransportResult};
