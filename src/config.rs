//! Configuration management for the rjsocks client

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::adapter::parse_mac;
use crate::error::{Error, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Adapter name used for hardware address lookup and lease renewal
    pub adapter: String,

    /// Capture device description (default: the adapter name)
    #[serde(default)]
    pub device: Option<String>,

    /// Hardware address override, e.g. "00:1B:21:0A:0B:0C"
    #[serde(default)]
    pub hardware_address: Option<String>,

    /// Obfuscate the frame's leading field after tagging
    #[serde(default)]
    pub obfuscate_leading_field: bool,

    /// Renew the DHCP lease after the frame is produced
    #[serde(default)]
    pub renew_lease: bool,
}

impl ClientConfig {
    /// Create a configuration for `adapter` with defaults.
    pub fn new<S: Into<String>>(adapter: S) -> Self {
        Self {
            adapter: adapter.into(),
            device: None,
            hardware_address: None,
            obfuscate_leading_field: false,
            renew_lease: false,
        }
    }

    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check fields that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.adapter.trim().is_empty() {
            return Err(Error::config("adapter must not be empty"));
        }
        self.hardware_address_override()?;
        Ok(())
    }

    /// Parsed hardware address override, if configured.
    pub fn hardware_address_override(&self) -> Result<Option<[u8; 6]>> {
        match &self.hardware_address {
            None => Ok(None),
            Some(s) => parse_mac(s)
                .map(Some)
                .ok_or_else(|| Error::InvalidHardwareAddress(s.clone())),
        }
    }

    /// Capture device description to look up.
    pub fn device_description(&self) -> &str {
        self.device.as_deref().unwrap_or(&self.adapter)
    }
}

/// Read a JSON file into any deserializable type.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Write a value as pretty JSON.
pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(path, data)?;
    Ok(())
}
