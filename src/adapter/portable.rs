//! Windows and macOS interface enumeration via the `network-interface` crate.

use network_interface::{NetworkInterface as HostInterface, NetworkInterfaceConfig};
use tracing::debug;

use super::{collect_interfaces, InterfaceSource, NetworkInterface};
use crate::error::{Error, Result};

/// Interfaces of the running host, as reported by the operating system.
#[derive(Debug, Clone, Default)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        let hosts = HostInterface::show().map_err(|e| Error::Enumeration(e.to_string()))?;
        let out = collect_interfaces(
            hosts
                .into_iter()
                .map(|h| (h.name, h.index, h.mac_addr)),
        );
        debug!("Found {} network interfaces", out.len());
        Ok(out)
    }
}
