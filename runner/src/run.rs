//! Orchestration of one test run end to end.
//!
//! Control flow: resolve the build root, run the binary on the selected
//! transport (deploying into an isolated device session first when remote),
//! evaluate the captured output into a verdict, and tear the session down
//! unless the operator asked to keep it. Exactly one `ExecutionResult` and
//! one `Verdict` are produced per run.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::core::evaluator::evaluate;
use crate::core::invocation::{Invocation, coverage_env, gtest_args};
use crate::core::types::{ExecutionResult, Platform, TestRun, Verdict};
use crate::error::{Result, RunnerError};
use crate::io::build_root;
use crate::io::deploy::deploy;
use crate::io::device_log::DeviceLogCapture;
use crate::io::run_log::{RunLogPaths, RunReport, write_failure_artifacts};
use crate::io::session::{DeviceSession, run_stamp};
use crate::io::transport::{AdbTransport, DeviceTransport, LocalTransport};

/// Everything a caller needs after one run: the verdict and the raw output
/// it was derived from.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub verdict: Verdict,
    pub result: ExecutionResult,
}

/// Execute one test run to completion.
///
/// Resolves the build root from the environment, then defers to
/// [`execute_with_build_root`].
pub fn execute(run: &TestRun) -> Result<RunOutcome> {
    let build_root = build_root::resolve_from_env(&run.output)?;
    execute_with_build_root(run, &build_root)
}

/// As [`execute`], with a pre-resolved build root.
#[instrument(skip_all, fields(test = %run.test, platform = ?run.platform))]
pub fn execute_with_build_root(run: &TestRun, build_root: &Path) -> Result<RunOutcome> {
    let (invocation, result) = match run.platform {
        Platform::Local => run_local(run, build_root)?,
        Platform::Android => {
            let transport = AdbTransport::new(&run.device);
            // Diagnostic stream only: never awaited, dropped (and killed)
            // when the run is over, no influence on the verdict.
            let log_path = build_root.join(format!("{}.device.log", run.test));
            let _log_capture = DeviceLogCapture::start(&run.device, &log_path);
            run_on_device(run, build_root, &transport)?
        }
    };

    let verdict = evaluate(&result.stdout, result.exit_code);
    match verdict {
        Verdict::Success => info!(exit_code = result.exit_code, "run test success"),
        Verdict::Failure { code } => {
            info!(exit_code = result.exit_code, code, "run test failed");
            persist_failure(run, build_root, &invocation, &result, code);
        }
    }
    Ok(RunOutcome { verdict, result })
}

fn run_local(run: &TestRun, build_root: &Path) -> Result<(Invocation, ExecutionResult)> {
    let program = build_root.join(&run.test).to_string_lossy().into_owned();
    let mut invocation = Invocation::new(
        program,
        gtest_args(&run.gtest_filter, run.also_run_disabled, run.dump),
    );
    if run.coverage {
        invocation.env.push(coverage_env(build_root, &run.test));
    }
    info!(command = %invocation.command_line(), "running test locally");

    let result = LocalTransport
        .execute(&invocation)
        .map_err(RunnerError::Execution)?;
    Ok((invocation, result))
}

fn run_on_device<T: DeviceTransport>(
    run: &TestRun,
    build_root: &Path,
    transport: &T,
) -> Result<(Invocation, ExecutionResult)> {
    if run.coverage {
        warn!("coverage capture is local-only, ignoring --coverage");
    }
    let stamp = run_stamp();
    let session = DeviceSession::begin(transport, &stamp).map_err(RunnerError::Deployment)?;

    // Teardown must run on every path that follows a successful begin, so
    // no orphaned workspaces accumulate across CI runs.
    let outcome = deploy_and_run(run, build_root, transport, &session);
    session.end(transport, run.keep);
    outcome
}

fn deploy_and_run<T: DeviceTransport>(
    run: &TestRun,
    build_root: &Path,
    transport: &T,
    session: &DeviceSession,
) -> Result<(Invocation, ExecutionResult)> {
    deploy(transport, build_root, session, &run.test).map_err(RunnerError::Deployment)?;

    let invocation = Invocation::new(
        session.binary_path(&run.test),
        gtest_args(&run.gtest_filter, run.also_run_disabled, run.dump),
    );
    info!(command = %invocation.command_line(), "running test on device");

    let result = transport
        .execute(&invocation)
        .map_err(RunnerError::Execution)?;
    Ok((invocation, result))
}

fn persist_failure(
    run: &TestRun,
    build_root: &Path,
    invocation: &Invocation,
    result: &ExecutionResult,
    verdict_code: i32,
) {
    let paths = RunLogPaths::new(build_root, &run.test);
    let report = RunReport {
        test: run.test.clone(),
        platform: run.platform,
        command: invocation.command_line(),
        exit_code: result.exit_code,
        verdict_code,
    };
    if let Err(err) = write_failure_artifacts(&paths, &report, result) {
        warn!(err = %err, "failed to persist run artifacts");
    }
}
