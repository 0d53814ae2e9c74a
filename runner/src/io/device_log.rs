//! Unsupervised device log capture for one run.
//!
//! The stream is pure diagnostics: it is started and then never awaited,
//! its failures are logged and swallowed, and it plays no part in the
//! pass/fail verdict.

use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

/// Handle to a running `adb logcat` stream.
///
/// Dropping the handle kills the child so the stream never outlives its
/// run.
pub struct DeviceLogCapture {
    child: Child,
}

impl DeviceLogCapture {
    /// Clear the device log buffer and start streaming it into `path`.
    ///
    /// Returns `None` when the capture could not be started; the run
    /// proceeds without device diagnostics.
    pub fn start(device: &str, path: &Path) -> Option<Self> {
        if let Err(err) = clear_log(device) {
            warn!(err = %err, "failed to clear device log buffer");
        }
        match spawn_stream(device, path) {
            Ok(child) => {
                debug!(path = %path.display(), "device log capture started");
                Some(Self { child })
            }
            Err(err) => {
                warn!(err = %err, "failed to start device log capture");
                None
            }
        }
    }
}

impl Drop for DeviceLogCapture {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn adb(device: &str) -> Command {
    let mut cmd = Command::new("adb");
    if !device.is_empty() {
        cmd.args(["-s", device]);
    }
    cmd
}

fn clear_log(device: &str) -> std::io::Result<()> {
    let mut cmd = adb(device);
    cmd.args(["logcat", "-c"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd.status().map(|_| ())
}

fn spawn_stream(device: &str, path: &Path) -> std::io::Result<Child> {
    let file = File::create(path)?;
    let mut cmd = adb(device);
    cmd.arg("logcat")
        .stdin(Stdio::null())
        .stdout(file)
        .stderr(Stdio::null());
    cmd.spawn()
}
