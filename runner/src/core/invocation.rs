//! Construction of the test command line for one run.

use std::path::Path;

/// A fully constructed test invocation: program, arguments, and the
/// environment applied to the spawned child only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute: a host path locally, a device path remotely.
    pub program: String,
    pub args: Vec<String>,
    /// Variables set on the child for the duration of the run. Never applied
    /// to the orchestrator's own environment.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            env: Vec::new(),
        }
    }

    /// Render as a single shell command line, as passed to `adb shell` and
    /// recorded in the run report.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Build the gtest argument list for a run.
///
/// Always selects via `--gtest_filter`. The trailing `true` marker switches
/// the binary into baseline-dump mode: it persists actual output as the new
/// expected result instead of comparing, which changes what counts as
/// success inside the binary, not inside the orchestrator.
pub fn gtest_args(filter: &str, also_run_disabled: bool, dump: bool) -> Vec<String> {
    let mut args = vec![format!("--gtest_filter={filter}")];
    if also_run_disabled {
        args.push("--gtest_also_run_disabled_tests".to_string());
    }
    if dump {
        args.push("true".to_string());
    }
    args
}

/// Scoped environment for a local coverage run: one variable pointing the
/// LLVM runtime at the profile output under the build root.
pub fn coverage_env(build_root: &Path, test: &str) -> (String, String) {
    (
        "LLVM_PROFILE_FILE".to_string(),
        build_root
            .join(format!("{test}.profraw"))
            .to_string_lossy()
            .into_owned(),
    )
}
