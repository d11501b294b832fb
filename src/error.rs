//! Error types for the rjsocks client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the rjsocks client.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer is smaller than the region an operation needs
    #[error("Buffer too short: need {needed} bytes, got {actual}")]
    BufferTooShort { needed: usize, actual: usize },

    /// Vendor attribute list could not be walked
    #[error("Malformed vendor attribute at offset {offset}: {reason}")]
    MalformedAttribute { offset: usize, reason: String },

    /// No interface with the requested name
    #[error("Network adapter not found: {0}")]
    AdapterNotFound(String),

    /// No capture device with the requested description
    #[error("Network device not found: {0}")]
    DeviceNotFound(String),

    /// MAC address text did not parse
    #[error("Invalid hardware address: {0}")]
    InvalidHardwareAddress(String),

    /// GBK text could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Host interfaces could not be enumerated
    #[error("Interface enumeration failed: {0}")]
    Enumeration(String),

    /// Lease renewal requested outside a tokio runtime
    #[error("No async runtime available to spawn the renewal process")]
    NoRuntime,
}

impl Error {
    /// Create a new buffer-too-short error.
    pub fn too_short(needed: usize, actual: usize) -> Self {
        Self::BufferTooShort { needed, actual }
    }

    /// Create a new malformed attribute error.
    pub fn malformed<S: Into<String>>(offset: usize, reason: S) -> Self {
        Self::MalformedAttribute {
            offset,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is a caller input error, as opposed to an environment failure.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::BufferTooShort { .. }
                | Self::MalformedAttribute { .. }
                | Self::InvalidHardwareAddress(_)
                | Self::Decode(_)
        )
    }
}
