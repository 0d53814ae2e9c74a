//! Child process execution with full output capture.

use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::types::ExecutionResult;

/// Run a command to completion, capturing stdout, stderr, and exit status.
///
/// Blocks until the child terminates; no timeout is enforced. Termination by
/// signal is recorded as the negated signal number so the evaluator sees one
/// signed exit code for both cases.
pub fn capture(mut cmd: Command) -> Result<ExecutionResult> {
    debug!(command = ?cmd, "spawning child process");
    let output = cmd
        .output()
        .with_context(|| format!("spawn {:?}", cmd.get_program()))?;
    let exit_code = exit_code_of(&output.status);
    debug!(exit_code, "command finished");
    Ok(ExecutionResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code,
    })
}

#[cfg(unix)]
fn exit_code_of(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => -status.signal().unwrap_or(0),
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: &ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn captures_output_and_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 3"]);

        let result = capture(cmd).expect("capture");
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
        assert_eq!(result.exit_code, 3);
    }

    #[test]
    fn missing_program_is_an_error() {
        let cmd = Command::new("definitely-not-a-real-program-5309");
        let err = capture(cmd).unwrap_err();
        assert!(err.to_string().contains("spawn"));
    }
}
