//! CLI tests for local runs.
//!
//! Spawns the orchestrator binary against scripted shell-script "test
//! binaries" and verifies verdict propagation through the process exit
//! status.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use unittest_runner::exit_codes;
use unittest_runner::test_support::write_script;

/// Source root with an `out/Default` build root inside.
fn source_root_with_build_root(temp: &Path) -> PathBuf {
    let build_root = temp.join("out/Default");
    fs::create_dir_all(&build_root).expect("create build root");
    build_root
}

fn run_orchestrator(source_root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unittest-runner"))
        .env("SOURCE_ROOT_DIR", source_root)
        .args(args)
        .output()
        .expect("run orchestrator")
}

#[test]
fn passing_run_exits_zero_and_relays_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_root = source_root_with_build_root(temp.path());
    write_script(
        &build_root,
        "example_unittest",
        "echo \"All tests passed\"\nexit 0",
    );

    let output = run_orchestrator(temp.path(), &["--test", "example_unittest"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("All tests passed"));
}

#[test]
fn failure_marker_overrides_zero_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_root = source_root_with_build_root(temp.path());
    write_script(
        &build_root,
        "example_unittest",
        "echo \"3 FAILED TESTS\"\nexit 0",
    );

    let output = run_orchestrator(temp.path(), &["--test", "example_unittest"]);

    assert_eq!(output.status.code(), Some(1));
    // Post-mortem log is left under the build root for the caller.
    let log = fs::read_to_string(build_root.join("example_unittest.last_run.log"))
        .expect("read last_run.log");
    assert!(log.contains("3 FAILED TESTS"));
}

#[test]
fn nonzero_exit_code_propagates_as_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_root = source_root_with_build_root(temp.path());
    write_script(&build_root, "example_unittest", "exit 7");

    let output = run_orchestrator(temp.path(), &["--test", "example_unittest"]);

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn filter_and_flags_reach_the_test_binary() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_root = source_root_with_build_root(temp.path());
    write_script(&build_root, "example_unittest", "echo \"args: $@\"\nexit 0");

    let output = run_orchestrator(
        temp.path(),
        &[
            "--test",
            "example_unittest",
            "--gtest-filter",
            "Foo.*",
            "--gtest_also_run_disabled_tests",
            "--dump",
        ],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    assert!(stdout.contains("--gtest_filter=Foo.*"));
    assert!(stdout.contains("--gtest_also_run_disabled_tests"));
    assert!(stdout.trim_end().ends_with("true"));
}

#[test]
fn coverage_sets_scoped_profile_variable_on_the_child() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build_root = source_root_with_build_root(temp.path());
    write_script(
        &build_root,
        "example_unittest",
        "echo \"profile: $LLVM_PROFILE_FILE\"\nexit 0",
    );

    let output = run_orchestrator(
        temp.path(),
        &["--test", "example_unittest", "--coverage"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    assert!(stdout.contains("example_unittest.profraw"));
}

#[test]
fn missing_source_root_exits_with_config_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    source_root_with_build_root(temp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_unittest-runner"))
        .env_remove("SOURCE_ROOT_DIR")
        .args(["--test", "example_unittest"])
        .output()
        .expect("run orchestrator");

    assert_eq!(output.status.code(), Some(exit_codes::CONFIG));
    assert!(String::from_utf8_lossy(&output.stderr).contains("SOURCE_ROOT_DIR"));
}

#[test]
fn missing_build_root_exits_with_config_code() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = run_orchestrator(
        temp.path(),
        &["--test", "example_unittest", "--output", "out/Missing"],
    );

    assert_eq!(output.status.code(), Some(exit_codes::CONFIG));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
