//! Deployment of the test binary into a device session workspace.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

use crate::io::session::DeviceSession;
use crate::io::transport::DeviceTransport;

/// Subdirectory of the build root holding stripped device binaries.
const DEVICE_ARTIFACT_DIR: &str = "exe.stripped";

/// Copy the test binary into the session workspace and mark it executable.
///
/// Exactly one attempt; any failure aborts the run before execution starts.
#[instrument(skip_all, fields(test = %test))]
pub fn deploy<T: DeviceTransport>(
    transport: &T,
    build_root: &Path,
    session: &DeviceSession,
    test: &str,
) -> Result<()> {
    let source = build_root.join(DEVICE_ARTIFACT_DIR).join(test);
    if !source.is_file() {
        return Err(anyhow!("test binary {} not found", source.display()));
    }
    let target = session.binary_path(test);
    transport
        .push(&source, &target)
        .with_context(|| format!("push {}", source.display()))?;
    transport
        .make_executable(&target)
        .with_context(|| format!("chmod {target}"))?;
    debug!(target = %target, "test binary deployed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ExecutionResult;
    use crate::test_support::{RecordingTransport, write_device_binary};

    fn ok_result() -> ExecutionResult {
        ExecutionResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    #[test]
    fn missing_source_binary_fails_before_any_transport_call() {
        let temp = tempfile::tempdir().expect("tempdir");
        let transport = RecordingTransport::new(ok_result());
        let session = DeviceSession::begin(&transport, "0000").expect("begin");

        let err = deploy(&transport, temp.path(), &session, "example_unittest").unwrap_err();
        assert!(err.to_string().contains("not found"));
        // Only the session's mkdir; no push or chmod was attempted.
        assert_eq!(transport.ops().len(), 1);
    }

    #[test]
    fn deploy_pushes_then_marks_executable() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_device_binary(temp.path(), "example_unittest");
        let transport = RecordingTransport::new(ok_result());
        let session = DeviceSession::begin(&transport, "0000").expect("begin");

        deploy(&transport, temp.path(), &session, "example_unittest").expect("deploy");

        let ops = transport.ops();
        assert_eq!(ops.len(), 3);
        assert!(ops[1].starts_with("push "));
        assert!(ops[1].ends_with("/data/local/tmp/test-0000/example_unittest"));
        assert_eq!(ops[2], "chmod /data/local/tmp/test-0000/example_unittest");
    }

    #[test]
    fn push_failure_skips_make_executable() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_device_binary(temp.path(), "example_unittest");
        let transport = RecordingTransport::failing(ok_result(), "push");
        let session = DeviceSession::begin(&transport, "0000").expect("begin");

        let err = deploy(&transport, temp.path(), &session, "example_unittest").unwrap_err();
        assert!(err.to_string().contains("push"));
        assert!(!transport.ops().iter().any(|op| op.starts_with("chmod")));
    }
}
