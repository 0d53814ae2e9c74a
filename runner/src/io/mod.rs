//! Side-effecting operations behind the orchestrator.

pub mod build_root;
pub mod deploy;
pub mod device_log;
pub mod process;
pub mod run_log;
pub mod session;
pub mod transport;
