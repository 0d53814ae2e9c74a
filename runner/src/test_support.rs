//! Test-only helpers: scripted transports and build-root fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::core::invocation::Invocation;
use crate::core::types::ExecutionResult;
use crate::io::transport::DeviceTransport;

/// An `ExecutionResult` with the given stdout and exit code.
pub fn scripted_result(stdout: &str, exit_code: i32) -> ExecutionResult {
    ExecutionResult {
        stdout: stdout.to_string(),
        stderr: String::new(),
        exit_code,
    }
}

/// Place an empty device binary under `<build_root>/exe.stripped/<test>` so
/// deployment resolution succeeds.
pub fn write_device_binary(build_root: &Path, test: &str) -> PathBuf {
    let dir = build_root.join("exe.stripped");
    fs::create_dir_all(&dir).expect("create artifact dir");
    let path = dir.join(test);
    fs::write(&path, b"").expect("write device binary");
    path
}

/// Write an executable shell script posing as a compiled test binary.
#[cfg(unix)]
pub fn write_script(build_root: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = build_root.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = fs::metadata(&path).expect("stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

/// Transport that records operations and returns a scripted result without
/// touching any device.
pub struct RecordingTransport {
    ops: Mutex<Vec<String>>,
    result: ExecutionResult,
    fail_op: Option<&'static str>,
}

impl RecordingTransport {
    pub fn new(result: ExecutionResult) -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            result,
            fail_op: None,
        }
    }

    /// As [`RecordingTransport::new`], but the named operation
    /// (`"push"`, `"chmod"`, `"mkdir"`, `"rm"`, `"execute"`) fails.
    pub fn failing(result: ExecutionResult, fail_op: &'static str) -> Self {
        Self {
            fail_op: Some(fail_op),
            ..Self::new(result)
        }
    }

    /// Operations recorded so far, in order, as `"<op> <detail>"`.
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().expect("ops lock").clone()
    }

    fn record(&self, op: &str, detail: &str) -> Result<()> {
        self.ops
            .lock()
            .expect("ops lock")
            .push(format!("{op} {detail}"));
        if self.fail_op == Some(op) {
            return Err(anyhow!("{op} scripted to fail"));
        }
        Ok(())
    }
}

impl DeviceTransport for RecordingTransport {
    fn push(&self, local: &Path, remote: &str) -> Result<()> {
        self.record("push", &format!("{} -> {remote}", local.display()))
    }

    fn make_executable(&self, remote: &str) -> Result<()> {
        self.record("chmod", remote)
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        self.record("mkdir", path)
    }

    fn remove_recursive(&self, path: &str) -> Result<()> {
        self.record("rm", path)
    }

    fn execute(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        self.record("execute", &invocation.command_line())?;
        Ok(self.result.clone())
    }
}

/// Transport that maps device paths onto a local directory, for lifecycle
/// tests that need to observe a real filesystem.
pub struct FsTransport {
    root: PathBuf,
    result: ExecutionResult,
}

impl FsTransport {
    pub fn new(root: &Path, result: ExecutionResult) -> Self {
        Self {
            root: root.to_path_buf(),
            result,
        }
    }

    /// Local filesystem location backing a device path.
    pub fn host_path(&self, device_path: &str) -> PathBuf {
        self.root.join(device_path.trim_start_matches('/'))
    }
}

impl DeviceTransport for FsTransport {
    fn push(&self, local: &Path, remote: &str) -> Result<()> {
        let target = self.host_path(remote);
        fs::copy(local, &target).with_context(|| format!("copy to {}", target.display()))?;
        Ok(())
    }

    fn make_executable(&self, _remote: &str) -> Result<()> {
        Ok(())
    }

    fn ensure_dir(&self, path: &str) -> Result<()> {
        let dir = self.host_path(path);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(())
    }

    fn remove_recursive(&self, path: &str) -> Result<()> {
        let dir = self.host_path(path);
        fs::remove_dir_all(&dir).with_context(|| format!("remove {}", dir.display()))?;
        Ok(())
    }

    fn execute(&self, _invocation: &Invocation) -> Result<ExecutionResult> {
        Ok(self.result.clone())
    }
}
