//! Thermal HAL interface
//!
//! The thermal service is an external collaborator. Each getter performs one
//! remote call, hands the HAL status and the returned records to the
//! callback (synchronously, at most once), and reports the transport status
//! of the call itself as its return value.

use hwprops_core::{CoolingDevice, CpuUsage, Temperature, ThermalStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Callback receiving one HAL reply
pub type HalCallback<'a, T> = &'a mut dyn FnMut(ThermalStatus, Vec<T>);

/// Transport-level exception codes of a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ExceptionCode {
    Security,
    BadParcelable,
    IllegalArgument,
    NullPointer,
    IllegalState,
    UnsupportedOperation,
    ServiceSpecific,
    TransactionFailed,
}

impl ExceptionCode {
    pub fn as_raw(self) -> i32 {
        match self {
            ExceptionCode::Security => -1,
            ExceptionCode::BadParcelable => -2,
            ExceptionCode::IllegalArgument => -3,
            ExceptionCode::NullPointer => -4,
            ExceptionCode::IllegalState => -5,
            ExceptionCode::UnsupportedOperation => -7,
            ExceptionCode::ServiceSpecific => -8,
            ExceptionCode::TransactionFailed => -129,
        }
    }

    pub fn from_raw(value: i32) -> Option<Self> {
        match value {
            -1 => Some(ExceptionCode::Security),
            -2 => Some(ExceptionCode::BadParcelable),
            -3 => Some(ExceptionCode::IllegalArgument),
            -4 => Some(ExceptionCode::NullPointer),
            -5 => Some(ExceptionCode::IllegalState),
            -7 => Some(ExceptionCode::UnsupportedOperation),
            -8 => Some(ExceptionCode::ServiceSpecific),
            -129 => Some(ExceptionCode::TransactionFailed),
            _ => None,
        }
    }
}

impl TryFrom<i32> for ExceptionCode {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        Self::from_raw(value).ok_or_else(|| format!("unknown exception code {}", value))
    }
}

impl From<ExceptionCode> for i32 {
    fn from(code: ExceptionCode) -> Self {
        code.as_raw()
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_raw())
    }
}

/// A remote call that did not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct TransportError {
    pub code: ExceptionCode,
    pub message: String,
}

impl TransportError {
    pub fn new(code: ExceptionCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of a remote call at the transport level
pub type TransportResult = std::result::Result<(), TransportError>;

/// Thermal HAL query interface
///
/// Implementations must be callable from any thread. A call may block for
/// the duration of the remote round-trip.
pub trait Thermal: Send + Sync {
    /// Retrieve all cooling devices
    fn get_cooling_devices(&self, callback: HalCallback<'_, CoolingDevice>) -> TransportResult;

    /// Retrieve all temperature sensors
    fn get_temperatures(&self, callback: HalCallback<'_, Temperature>) -> TransportResult;

    /// Retrieve usage of every CPU, online or not
    fn get_cpu_usages(&self, callback: HalCallback<'_, CpuUsage>) -> TransportResult;
}
