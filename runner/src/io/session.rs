//! Isolated device workspace for one test run.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::io::transport::DeviceTransport;

/// Root under which per-run workspaces are created on the device.
const DEVICE_TEST_ROOT: &str = "/data/local/tmp";

/// Microsecond-resolution UTC stamp keying a run's workspace.
///
/// Microseconds distinguish concurrent runs against the same device.
pub fn run_stamp() -> String {
    Utc::now().format("%Y%m%d-%H%M%S-%6f").to_string()
}

/// An isolated workspace on the device, owned exclusively by the run that
/// created it.
///
/// Exists only between [`DeviceSession::begin`] and [`DeviceSession::end`];
/// `end` consumes the session so no reference survives teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSession {
    workspace: String,
}

impl DeviceSession {
    /// Ensure the workspace directory for `stamp` exists on the device.
    pub fn begin<T: DeviceTransport>(transport: &T, stamp: &str) -> Result<Self> {
        let workspace = format!("{DEVICE_TEST_ROOT}/test-{stamp}");
        transport.ensure_dir(&workspace)?;
        debug!(workspace = %workspace, "device session created");
        Ok(Self { workspace })
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Device path of a deployed binary inside the workspace.
    pub fn binary_path(&self, test: &str) -> String {
        format!("{}/{}", self.workspace, test)
    }

    /// Tear the workspace down unless `keep` was requested.
    ///
    /// Removal failures are logged and swallowed: cleanup must never mask
    /// the run's verdict.
    pub fn end<T: DeviceTransport>(self, transport: &T, keep: bool) {
        if keep {
            info!(workspace = %self.workspace, "keeping device workspace");
            return;
        }
        if let Err(err) = transport.remove_recursive(&self.workspace) {
            warn!(workspace = %self.workspace, err = %err, "failed to remove device workspace");
        }
    }
}
