//! Error types for the hwprops system

use thiserror::Error;

/// Core error type for hwprops operations
#[derive(Error, Debug)]
pub enum HwPropsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fixture files that do not describe a valid HAL data set
    #[error("Invalid fixture: {0}")]
    Fixture(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for hwprops operations
pub type Result<T> = std::result::Result<T, HwPropsError>;
