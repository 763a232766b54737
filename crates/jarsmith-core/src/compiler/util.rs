use crate::CompilerConfig;
use crate::JarsmithError;
use crate::Result;
use std::ffi::OsString;
use std::path::PathBuf;
use which::which;

/// Finds the javac binary, preferring the configured override.
pub fn javac_path(config: &CompilerConfig) -> Result<PathBuf> {
    if let Some(javac) = &config.javac {
        return Ok(javac.clone());
    }

    which("javac").map_err(|e| JarsmithError::CompilerNotFound {
        reason: e.to_string(),
    })
}

/// Joins classpath entries with the platform separator.
pub fn join_classpath(entries: &[PathBuf]) -> Result<OsString> {
    std::env::join_paths(entries).map_err(|e| JarsmithError::InvalidConfig {
        reason: format!("invalid classpath entry: {e}"),
    })
}
