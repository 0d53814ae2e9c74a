//! CLI for the unit-test orchestrator.
//!
//! Runs one compiled test binary locally or on an Android device and exits
//! with a status the CI pipeline gates on: 0 for a passing run, the
//! verdict's failure code for a failing one, and a stable error code when
//! the orchestrator itself could not complete the run.

use std::io::Write;
use std::process::exit;

use clap::Parser;

use unittest_runner::core::types::{Platform, TestRun};
use unittest_runner::exit_codes;
use unittest_runner::logging;
use unittest_runner::run::execute;

#[derive(Parser)]
#[command(
    name = "unittest-runner",
    version,
    about = "Run a compiled unit-test binary locally or on an Android device"
)]
struct Cli {
    /// Target device serial; empty selects the default device.
    #[arg(short, long, default_value = "")]
    device: String,

    /// Test binary to run.
    #[arg(short, long)]
    test: String,

    /// Case selection expression, passed through as `--gtest_filter`.
    #[arg(short = 'f', long = "gtest-filter", default_value = "*")]
    gtest_filter: String,

    /// Also run cases marked DISABLED_.
    #[arg(short = 'a', long = "gtest_also_run_disabled_tests")]
    gtest_also_run_disabled_tests: bool,

    /// Build output selector relative to the source root.
    #[arg(short, long, default_value = "out/Default")]
    output: String,

    /// Dump actual output as the new expected baseline instead of comparing.
    #[arg(short = 'u', long)]
    dump: bool,

    /// Keep the device workspace and the deployed binary after the run.
    #[arg(short, long)]
    keep: bool,

    /// Execution platform: '' runs on the host, 'android' on a device.
    #[arg(short, long, default_value = "", value_parser = parse_platform)]
    platform: Platform,

    /// Capture an LLVM coverage profile (local runs only).
    #[arg(short, long)]
    coverage: bool,
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    match value {
        "" => Ok(Platform::Local),
        "android" => Ok(Platform::Android),
        other => Err(format!(
            "unsupported platform '{other}', expected '' or 'android'"
        )),
    }
}

impl From<Cli> for TestRun {
    fn from(cli: Cli) -> Self {
        Self {
            test: cli.test,
            gtest_filter: cli.gtest_filter,
            also_run_disabled: cli.gtest_also_run_disabled_tests,
            dump: cli.dump,
            keep: cli.keep,
            coverage: cli.coverage,
            device: cli.device,
            output: cli.output,
            platform: cli.platform,
        }
    }
}

fn main() {
    logging::init();
    let run = TestRun::from(Cli::parse());

    match execute(&run) {
        Ok(outcome) => {
            // The captured test output is product output; surface it so the
            // CI log shows what the binary reported.
            print!("{}", outcome.result.stdout);
            if !outcome.verdict.is_success() {
                eprint!("{}", outcome.result.stderr);
            }
            let _ = std::io::stdout().flush();
            exit(outcome.verdict.exit_code());
        }
        Err(err) => {
            eprintln!("{err}");
            exit(exit_codes::for_error(&err));
        }
    }
}
