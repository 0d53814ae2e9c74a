//! Pure pass/fail evaluation of captured test output.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::Verdict;

/// Matches the framework's failure summary, e.g. `[  FAILED  ] 2 FAILED TESTS`.
static FAILED_CASES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+FAILED TEST").unwrap());

/// Derive the verdict for one run from its captured stdout and exit code.
///
/// A summary line reporting one or more failed cases fails the run
/// regardless of the exit code: some test frameworks exit 0 even when
/// individual cases failed. A zero-count match is not a failure. Otherwise
/// any nonzero exit code fails the run, negative signal terminations
/// included.
///
/// Deterministic and side-effect free; never spawns a process.
pub fn evaluate(stdout: &str, exit_code: i32) -> Verdict {
    for line in stdout.lines() {
        if let Some(caps) = FAILED_CASES_RE.captures(line) {
            // Counts too large to parse still mean failures.
            let failed = caps[1].parse::<u64>().unwrap_or(u64::MAX);
            if failed > 0 {
                return Verdict::Failure { code: 1 };
            }
        }
    }
    if exit_code != 0 {
        return Verdict::Failure {
            code: exit_code.saturating_abs(),
        };
    }
    Verdict::Success
}
