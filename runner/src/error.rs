//! Error taxonomy for the orchestrator.
//!
//! Only failures of the orchestrator itself are errors. A test binary that
//! ran and reported failing cases is a legitimate outcome
//! ([`crate::core::types::Verdict`]), and cleanup problems are logged
//! warnings, never errors.

use thiserror::Error;

/// Fatal orchestrator errors, classified for exit-code mapping and logs.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Missing or invalid configuration. Raised before any device is
    /// touched; no teardown is required.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The test binary could not be placed on the device. Execution never
    /// started, but session teardown still runs.
    #[error("deployment failed: {0:#}")]
    Deployment(anyhow::Error),

    /// The test process could not be launched at all. Distinct from a test
    /// failure, where the binary ran and reported failing cases.
    #[error("failed to launch test: {0:#}")]
    Execution(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
