//! Stable exit codes for the orchestrator process.
//!
//! A failing test run does not use these: its exit status is the verdict's
//! own failure code, so an upstream pipeline can gate on the process status
//! directly.

use crate::error::RunnerError;

/// Run completed and every selected case passed.
pub const OK: i32 = 0;
/// Missing root variable or nonexistent build root; no device was touched.
pub const CONFIG: i32 = 1;
/// The test binary could not be deployed to the device.
pub const DEPLOY: i32 = 2;
/// The test process could not be launched.
pub const EXEC: i32 = 3;

/// Map a fatal orchestrator error to its stable exit code.
pub fn for_error(err: &RunnerError) -> i32 {
    match err {
        RunnerError::Configuration(_) => CONFIG,
        RunnerError::Deployment(_) => DEPLOY,
        RunnerError::Execution(_) => EXEC,
    }
}
