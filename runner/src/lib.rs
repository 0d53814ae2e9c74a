//! CI orchestrator for compiled unit-test binaries.
//!
//! Runs one gtest binary either directly on the host or on an Android
//! device reached over `adb`, and reduces the captured output and exit code
//! to a single pass/fail verdict the pipeline can gate on. The architecture
//! enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (verdict evaluation, command
//!   construction). No I/O, fully testable without spawning a process.
//! - **[`io`]**: Side-effecting operations (environment, filesystem, device
//!   transport, child processes). Isolated to enable scripted fakes in
//!   tests.
//!
//! [`run`] coordinates core logic with I/O to implement one test run.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
