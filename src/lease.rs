//! DHCP lease renewal through the operating system.
//!
//! After the handshake succeeds the adapter needs a fresh lease. The
//! platform tool is launched on a background task and its outcome is only
//! logged; callers may await the handle or drop it.

use tokio::process::Command;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Keeps `ipconfig` from flashing a console window.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Program and arguments that renew the lease on `adapter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

/// Build the renewal command for the current platform.
pub fn renew_command(adapter: &str) -> RenewCommand {
    if cfg!(target_os = "windows") {
        RenewCommand {
            program: "ipconfig",
            args: vec!["/renew".into(), adapter.into()],
        }
    } else if cfg!(target_os = "macos") {
        RenewCommand {
            program: "ipconfig",
            args: vec!["set".into(), adapter.into(), "DHCP".into()],
        }
    } else {
        RenewCommand {
            program: "dhclient",
            args: vec![adapter.into()],
        }
    }
}

/// Launch lease renewal on `adapter` and return without waiting for it.
///
/// Must be called from within a tokio runtime. The returned handle resolves
/// once the process exits; dropping it leaves the process running.
pub fn renew_lease(adapter: &str) -> Result<JoinHandle<()>> {
    let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
    let renew = renew_command(adapter);

    let mut cmd = Command::new(renew.program);
    cmd.args(&renew.args).kill_on_drop(false);
    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    info!("Renewing DHCP lease on {}", adapter);
    let adapter = adapter.to_string();
    Ok(handle.spawn(async move {
        match cmd.output().await {
            Ok(output) if output.status.success() => {
                info!("DHCP renewal succeeded on {}", adapter);
            }
            Ok(output) => {
                warn!(
                    "DHCP renewal failed on {}: {}",
                    adapter,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Err(e) => {
                warn!("Failed to launch {} for {}: {}", renew.program, adapter, e);
            }
        }
    }))
}
