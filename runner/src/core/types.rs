//! Shared types for a single test run.
//!
//! These types define the stable contract between the orchestrator and the
//! pure core logic. They carry no I/O handles and are immutable once built.

use serde::Serialize;

/// Execution platform, selected once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Run the test binary directly on the host.
    Local,
    /// Deploy to an Android device over `adb` and run there.
    Android,
}

/// Configuration for one test run, built from the CLI and immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Name of the test binary under the build root.
    pub test: String,
    /// Case selection expression (`--gtest_filter`); `*` selects all.
    pub gtest_filter: String,
    /// Also run cases marked `DISABLED_`.
    pub also_run_disabled: bool,
    /// Baseline-dump mode: the binary persists its actual output as the new
    /// expected result instead of comparing against one.
    pub dump: bool,
    /// Retain the device workspace after the run.
    pub keep: bool,
    /// Capture an LLVM coverage profile (local platform only).
    pub coverage: bool,
    /// Remote device serial; empty selects the default device.
    pub device: String,
    /// Build output selector relative to the source root, e.g. `out/Default`.
    pub output: String,
    pub platform: Platform,
}

/// Raw captured output of one test execution.
///
/// `exit_code` follows the signed convention: termination by signal is
/// recorded as the negated signal number, so the evaluator sees one signed
/// code for both normal and abnormal exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Pass/fail classification of a run, derived from captured output plus the
/// exit code.
///
/// Deliberately distinct from the raw exit code: some test frameworks exit 0
/// while still reporting failed cases in their summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    /// `code` is the nonzero status the orchestrator exits with.
    Failure { code: i32 },
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success)
    }

    /// Process exit status that propagates this verdict to the caller.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Success => 0,
            Verdict::Failure { code } => *code,
        }
    }
}
