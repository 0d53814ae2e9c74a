//! Transport abstraction over the two execution targets.
//!
//! The [`DeviceTransport`] trait decouples the orchestrator from where the
//! test binary actually runs: directly on the host, or on an Android device
//! reached through the `adb` command channel. The transport is selected once
//! at configuration time. Tests use scripted transports that record
//! operations without touching a device.

use std::path::Path;
use std::process::Command;

use anyhow::{Result, anyhow};
use tracing::{debug, instrument};

use crate::core::invocation::Invocation;
use crate::core::types::ExecutionResult;
use crate::io::process::capture;

/// Capability set required to run one test on an execution target.
pub trait DeviceTransport {
    /// Copy a local file onto the target.
    fn push(&self, local: &Path, remote: &str) -> Result<()>;
    /// Mark a file on the target executable.
    fn make_executable(&self, remote: &str) -> Result<()>;
    /// Ensure a directory exists on the target. Idempotent.
    fn ensure_dir(&self, path: &str) -> Result<()>;
    /// Recursively remove a path on the target.
    fn remove_recursive(&self, path: &str) -> Result<()>;
    /// Execute an invocation on the target, capturing its full output.
    fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult>;
}

/// Runs the test binary as a direct child of the orchestrator.
///
/// The binary already resides at the build root, so file placement and
/// workspace operations are no-ops.
#[derive(Debug, Default)]
pub struct LocalTransport;

impl DeviceTransport for LocalTransport {
    fn push(&self, _local: &Path, _remote: &str) -> Result<()> {
        Ok(())
    }

    fn make_executable(&self, _remote: &str) -> Result<()> {
        Ok(())
    }

    fn ensure_dir(&self, _path: &str) -> Result<()> {
        Ok(())
    }

    fn remove_recursive(&self, _path: &str) -> Result<()> {
        Ok(())
    }

    #[instrument(skip_all, fields(program = %invocation.program))]
    fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        capture(cmd)
    }
}

/// Reaches an Android device through the `adb` command channel.
#[derive(Debug, Default)]
pub struct AdbTransport {
    /// Device serial passed as `adb -s`; `None` targets the default device.
    serial: Option<String>,
}

impl AdbTransport {
    /// `device` is the CLI serial; empty selects the default device.
    pub fn new(device: &str) -> Self {
        let serial = (!device.is_empty()).then(|| device.to_string());
        Self { serial }
    }

    fn adb(&self) -> Command {
        let mut cmd = Command::new("adb");
        if let Some(serial) = &self.serial {
            cmd.args(["-s", serial]);
        }
        cmd
    }

    fn run_checked(&self, cmd: Command, what: &str) -> Result<()> {
        let result = capture(cmd)?;
        if result.exit_code != 0 {
            return Err(anyhow!(
                "{what} failed with status {}: {}",
                result.exit_code,
                result.stderr.trim()
            ));
        }
        Ok(())
    }
}

impl DeviceTransport for AdbTransport {
    fn push(&self, local: &Path, remote: &str) -> Result<()> {
        let mut cmd = self.adb();
        cmd.arg("push").arg(local).arg(remote);
        self.run_checked(cmd, "adb push")
    }

    fn make_executable(&self, remote: &str) -> Result<()> {
        let mut cmd = self.adb();
        cmd.args(["shell", "chmod", "u+x", remote]);
        self.run_checked(cmd, "adb shell chmod")
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        let mut cmd = self.adb();
        cmd.args(["shell", "mkdir", "-p", path]);
        self.run_checked(cmd, "adb shell mkdir")
    }

    fn remove_recursive(&self, path: &str) -> Result<()> {
        let mut cmd = self.adb();
        cmd.args(["shell", "rm", "-r", path]);
        self.run_checked(cmd, "adb shell rm")
    }

    #[instrument(skip_all, fields(program = %invocation.program))]
    fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        // Coverage env is local-only; remote invocations carry none.
        let mut cmd = self.adb();
        cmd.arg("shell").arg(invocation.command_line());
        debug!(command = %invocation.command_line(), "running test over adb");
        capture(cmd)
    }
}
