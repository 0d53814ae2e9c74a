//! Post-mortem artifacts for a failed run.
//!
//! On failure the captured output and a small machine-readable report are
//! persisted under the build root so callers can inspect the run without
//! re-executing it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::types::{ExecutionResult, Platform};

/// Machine-readable summary of one failed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub test: String,
    pub platform: Platform,
    /// Command line as constructed for the target, for reproduction.
    pub command: String,
    /// Signed exit code of the test process (negative = signal).
    pub exit_code: i32,
    /// Exit status the orchestrator propagated for this failure.
    pub verdict_code: i32,
}

/// On-disk locations of the post-mortem artifacts for one test.
#[derive(Debug, Clone)]
pub struct RunLogPaths {
    pub log_path: PathBuf,
    pub report_path: PathBuf,
}

impl RunLogPaths {
    pub fn new(build_root: &Path, test: &str) -> Self {
        Self {
            log_path: build_root.join(format!("{test}.last_run.log")),
            report_path: build_root.join(format!("{test}.last_run.json")),
        }
    }
}

/// Write the captured output and the run report.
pub fn write_failure_artifacts(
    paths: &RunLogPaths,
    report: &RunReport,
    result: &ExecutionResult,
) -> Result<()> {
    let mut buf = String::new();
    buf.push_str("=== stdout ===\n");
    buf.push_str(&result.stdout);
    buf.push_str("\n=== stderr ===\n");
    buf.push_str(&result.stderr);
    buf.push('\n');
    fs::write(&paths.log_path, &buf)
        .with_context(|| format!("write {}", paths.log_path.display()))?;

    let mut json = serde_json::to_string_pretty(report).context("serialize run report")?;
    json.push('\n');
    fs::write(&paths.report_path, json)
        .with_context(|| format!("write {}", paths.report_path.display()))?;
    Ok(())
}
