//! Error conversion utilities for CLI.
//!
//! Converts jarsmith-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use jarsmith_core::JarsmithError;
use std::path::Path;

/// Converts a packing error to a user-friendly anyhow error.
pub fn convert_pack_error(err: JarsmithError, output: &Path) -> anyhow::Error {
    match err {
        JarsmithError::SourceNotFound { path } => {
            anyhow!(
                "Directory not found: {}\n\
                 HINT: Check the ROOT argument; it must name an existing directory.",
                path.display()
            )
        }
        JarsmithError::NotADirectory { path } => {
            anyhow!(
                "Not a directory: {}\n\
                 HINT: Only directory trees can be packed.",
                path.display()
            )
        }
        JarsmithError::FileNotReadable { path, source } => {
            anyhow!(
                "Cannot read '{}': {}\n\
                 HINT: Check file permissions, or use --exclude to leave it out. \
                 '{}' was not created.",
                path.display(),
                source,
                output.display()
            )
        }
        JarsmithError::DirectoryNotListable { path, source } => {
            anyhow!(
                "Cannot list directory '{}': {}\n\
                 HINT: Check directory permissions, or use --exclude to leave it out. \
                 '{}' was not created.",
                path.display(),
                source,
                output.display()
            )
        }
        JarsmithError::SinkWrite { entry, source } => {
            anyhow!(
                "Failed writing '{}' into '{}': {}\n\
                 HINT: Check free disk space on the output volume.",
                entry,
                output.display(),
                source
            )
        }
        JarsmithError::SinkClose { source } => {
            anyhow!(
                "Failed to finish '{}': {}\n\
                 HINT: Check free disk space on the output volume.",
                output.display(),
                source
            )
        }
        JarsmithError::NonUtf8Path { path } => {
            anyhow!(
                "Path is not valid UTF-8: {}\n\
                 HINT: Rename the file or use --exclude to leave it out.",
                path.display()
            )
        }
        JarsmithError::OutputInsideRoot { output, root } => {
            anyhow!(
                "Output '{}' lies inside '{}' and would be packed into itself\n\
                 HINT: Write the jar outside ROOT, or omit --exclude so the output is excluded.",
                output.display(),
                root.display()
            )
        }
        JarsmithError::Io(io_err) => {
            anyhow!("I/O error while writing '{}': {}", output.display(), io_err)
        }
        _ => anyhow::Error::from(err).context(format!("Error creating '{}'", output.display())),
    }
}

/// Converts a compiler driver error to a user-friendly anyhow error.
pub fn convert_compile_error(err: JarsmithError) -> anyhow::Error {
    match err {
        JarsmithError::CompilerNotFound { reason } => {
            anyhow!(
                "Cannot find a Java compiler: {reason}\n\
                 HINT: Install a JDK and put javac on PATH, or pass --javac <PATH>."
            )
        }
        JarsmithError::CompilerSpawn { program, source } => {
            anyhow!(
                "Failed to start '{}': {}\n\
                 HINT: Check that --javac points to an executable javac.",
                program.display(),
                source
            )
        }
        JarsmithError::InvalidConfig { reason } => {
            anyhow!("Invalid compiler setup: {reason}")
        }
        _ => anyhow::Error::from(err).context("Compilation failed"),
    }
}

/// Adds packing context to a core result.
pub fn add_pack_context<T>(
    result: Result<T, JarsmithError>,
    output: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, output))
}
