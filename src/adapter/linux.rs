//! Linux interface enumeration via sysfs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{parse_mac, InterfaceSource, NetworkInterface};
use crate::error::Result;

/// Default sysfs directory listing network interfaces.
const SYS_CLASS_NET: &str = "/sys/class/net";

/// Interfaces of the running host, read from `/sys/class/net`.
#[derive(Debug, Clone)]
pub struct SystemInterfaces {
    root: PathBuf,
}

impl Default for SystemInterfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInterfaces {
    pub fn new() -> Self {
        Self::with_root(SYS_CLASS_NET)
    }

    /// Read interfaces from an alternate sysfs-shaped directory.
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read_interface(&self, dir: &Path, name: String) -> NetworkInterface {
        let index = read_attr(dir, "ifindex")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let description = read_attr(dir, "ifalias").filter(|s| !s.is_empty());
        let hardware_address = read_attr(dir, "address")
            .and_then(|s| parse_mac(&s))
            .filter(|mac| mac != &[0u8; 6]);

        NetworkInterface {
            name,
            description,
            index,
            hardware_address,
        }
    }
}

fn read_attr(dir: &Path, attr: &str) -> Option<String> {
    match fs::read_to_string(dir.join(attr)) {
        Ok(s) => Some(s.trim().to_string()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read {}/{}: {}", dir.display(), attr, e);
            None
        }
    }
}

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            out.push(self.read_interface(&entry.path(), name));
        }
        out.sort_by_key(|i| i.index);
        debug!("Found {} network interfaces", out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_iface(root: &Path, name: &str, index: u32, address: &str, alias: &str) {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("ifindex"), format!("{index}\n")).unwrap();
        fs::write(dir.join("address"), format!("{address}\n")).unwrap();
        fs::write(dir.join("ifalias"), format!("{alias}\n")).unwrap();
    }

    #[test]
    fn test_reads_sysfs_layout() {
        let tmp = TempDir::new().unwrap();
        make_iface(tmp.path(), "lo", 1, "00:00:00:00:00:00", "");
        make_iface(tmp.path(), "eth0", 2, "00:1b:21:0a:0b:0c", "Uplink");

        let ifaces = SystemInterfaces::with_root(tmp.path()).interfaces().unwrap();
        assert_eq!(ifaces.len(), 2);

        assert_eq!(ifaces[0].name, "lo");
        assert_eq!(ifaces[0].hardware_address, None);
        assert_eq!(ifaces[0].description, None);

        assert_eq!(ifaces[1].name, "eth0");
        assert_eq!(ifaces[1].index, 2);
        assert_eq!(ifaces[1].description.as_deref(), Some("Uplink"));
        assert_eq!(
            ifaces[1].hardware_address,
            Some([0x00, 0x1B, 0x21, 0x0A, 0x0B, 0x0C])
        );
    }

    #[test]
    fn test_missing_attributes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("tun0")).unwrap();

        let ifaces = SystemInterfaces::with_root(tmp.path()).interfaces().unwrap();
        assert_eq!(ifaces.len(), 1);
        assert_eq!(ifaces[0].index, 0);
        assert_eq!(ifaces[0].hardware_address, None);
    }

    #[test]
    fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let source = SystemInterfaces::with_root(tmp.path().join("absent"));
        assert!(source.interfaces().is_err());
    }
}
