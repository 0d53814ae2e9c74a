//! Build root resolution and validation.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, RunnerError};

/// Environment variable naming the source tree root. Every run requires it.
pub const SOURCE_ROOT_VAR: &str = "SOURCE_ROOT_DIR";

/// Resolve the build root from the process environment.
///
/// Fatal when `SOURCE_ROOT_DIR` is unset or the joined path does not exist:
/// no test can proceed without a build root, and nothing has touched a
/// device yet.
pub fn resolve_from_env(output: &str) -> Result<PathBuf> {
    resolve(std::env::var_os(SOURCE_ROOT_VAR).as_deref(), output)
}

/// Resolve `<source_root>/<output>` and validate that it exists on disk.
pub fn resolve(source_root: Option<&OsStr>, output: &str) -> Result<PathBuf> {
    let root = source_root.ok_or_else(|| {
        RunnerError::Configuration(format!(
            "{SOURCE_ROOT_VAR} not set, run the environment setup script first"
        ))
    })?;
    let build_root = Path::new(root).join(output);
    if !build_root.exists() {
        return Err(RunnerError::Configuration(format!(
            "build root {} does not exist",
            build_root.display()
        )));
    }
    debug!(build_root = %build_root.display(), "resolved build root");
    Ok(build_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_root_variable_is_a_configuration_error() {
        let err = resolve(None, "out/Default").unwrap_err();
        assert!(matches!(err, RunnerError::Configuration(_)));
        assert!(err.to_string().contains(SOURCE_ROOT_VAR));
    }

    #[test]
    fn nonexistent_joined_path_is_a_configuration_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = resolve(Some(temp.path().as_os_str()), "out/Missing").unwrap_err();
        assert!(matches!(err, RunnerError::Configuration(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn existing_joined_path_resolves_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(temp.path().join("out/Default")).expect("create build root");

        let resolved = resolve(Some(temp.path().as_os_str()), "out/Default").expect("resolve");
        assert_eq!(resolved, temp.path().join("out/Default"));
    }
}
