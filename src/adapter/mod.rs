//! Host network interface lookup.
//!
//! Resolves the adapter the user names to its hardware address, and lists
//! capture devices by their human-readable description.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::SystemInterfaces;

#[cfg(not(target_os = "linux"))]
mod portable;

#[cfg(not(target_os = "linux"))]
pub use portable::SystemInterfaces;

use tracing::debug;

use crate::error::{Error, Result};

/// A host network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    /// Interface name (e.g. `eth0`).
    pub name: String,
    /// Human-readable description, when the platform provides one.
    pub description: Option<String>,
    /// Interface index.
    pub index: u32,
    /// Hardware address, absent for interfaces without one (loopback, tun).
    pub hardware_address: Option<[u8; 6]>,
}

impl NetworkInterface {
    /// Description shown to the user, falling back to the name.
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.name)
    }
}

/// Source of host interfaces.
pub trait InterfaceSource {
    /// Enumerate the interfaces currently present.
    fn interfaces(&self) -> Result<Vec<NetworkInterface>>;
}

/// List interface names.
pub fn list_adapters(source: &dyn InterfaceSource) -> Result<Vec<String>> {
    Ok(source.interfaces()?.into_iter().map(|i| i.name).collect())
}

/// List capture device descriptions.
pub fn list_devices(source: &dyn InterfaceSource) -> Result<Vec<String>> {
    Ok(source
        .interfaces()?
        .iter()
        .map(|i| i.display_description().to_string())
        .collect())
}

/// Find the capture device whose description equals `description`.
pub fn select_device(source: &dyn InterfaceSource, description: &str) -> Result<NetworkInterface> {
    source
        .interfaces()?
        .into_iter()
        .find(|i| i.display_description() == description)
        .ok_or_else(|| Error::DeviceNotFound(description.to_string()))
}

/// Resolve the hardware address of the adapter named `name`.
pub fn select_adapter(source: &dyn InterfaceSource, name: &str) -> Result<[u8; 6]> {
    let iface = source
        .interfaces()?
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| Error::AdapterNotFound(name.to_string()))?;

    let mac = iface
        .hardware_address
        .ok_or_else(|| Error::AdapterNotFound(format!("{name} has no hardware address")))?;
    debug!("Adapter {} has hardware address {}", name, format_mac(&mac));
    Ok(mac)
}

/// Build interface records from raw `(name, index, mac text)` entries.
///
/// Entries sharing a name are merged, keeping the first hardware address
/// seen. An all-zero or unparseable address counts as absent. The result is
/// ordered by index.
#[cfg_attr(target_os = "linux", allow(dead_code))]
pub(crate) fn collect_interfaces<I>(entries: I) -> Vec<NetworkInterface>
where
    I: IntoIterator<Item = (String, u32, Option<String>)>,
{
    let mut out: Vec<NetworkInterface> = Vec::new();
    for (name, index, mac) in entries {
        let hardware_address = mac
            .as_deref()
            .and_then(parse_mac)
            .filter(|mac| mac != &[0u8; 6]);

        match out.iter_mut().find(|i| i.name == name) {
            Some(existing) => {
                if existing.hardware_address.is_none() {
                    existing.hardware_address = hardware_address;
                }
            }
            None => out.push(NetworkInterface {
                name,
                description: None,
                index,
                hardware_address,
            }),
        }
    }
    out.sort_by_key(|i| i.index);
    out
}

/// Format a MAC address as a string.
pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// Parse a MAC address from a string (`:` or `-` separated).
pub fn parse_mac(s: &str) -> Option<[u8; 6]> {
    let parts: Vec<&str> = s.trim().split([':', '-']).collect();
    if parts.len() != 6 {
        return None;
    }

    let mut mac = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        if part.len() != 2 {
            return None;
        }
        mac[i] = u8::from_str_radix(part, 16).ok()?;
    }
    Some(mac)
}
