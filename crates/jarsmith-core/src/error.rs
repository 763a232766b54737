//! Error types for compilation and jar packaging.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `JarsmithError`.
pub type Result<T> = std::result::Result<T, JarsmithError>;

/// Errors that can occur while compiling sources or packaging an archive.
#[derive(Error, Debug)]
pub enum JarsmithError {
    /// I/O operation failed outside of archive traversal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path does not exist.
    #[error("source path not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Archive root is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A file under the archive root could not be opened or read.
    #[error("cannot read file {path}: {source}")]
    FileNotReadable {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory under the archive root could not be listed.
    #[error("cannot list directory {path}: {source}")]
    DirectoryNotListable {
        /// The directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive sink rejected a write.
    #[error("failed to write archive entry '{entry}': {source}")]
    SinkWrite {
        /// Name of the entry being written.
        entry: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be finalized.
    #[error("failed to finish archive: {source}")]
    SinkClose {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Entry path cannot be represented in a zip archive.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// The output file lies under the archive root but is not excluded.
    #[error("output {output} lies inside {root} and is not excluded")]
    OutputInsideRoot {
        /// Archive file being written.
        output: PathBuf,
        /// Archive root.
        root: PathBuf,
    },

    /// Configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },

    /// No `javac` executable could be located.
    #[error("cannot find a Java compiler (javac): {reason}")]
    CompilerNotFound {
        /// Lookup failure.
        reason: String,
    },

    /// `javac` could not be started.
    #[error("failed to run {program}: {source}")]
    CompilerSpawn {
        /// Program that was launched.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl JarsmithError {
    /// Returns `true` if this error aborted an archive traversal.
    ///
    /// When this is `true` the output archive is incomplete and must be
    /// discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use jarsmith_core::JarsmithError;
    ///
    /// let err = JarsmithError::SinkClose {
    ///     source: std::io::Error::other("disk full"),
    /// };
    /// assert!(err.is_archive_failure());
    ///
    /// let err = JarsmithError::InvalidConfig {
    ///     reason: "no sources".into(),
    /// };
    /// assert!(!err.is_archive_failure());
    /// ```
    #[must_use]
    pub const fn is_archive_failure(&self) -> bool {
        matches!(
            self,
            Self::FileNotReadable { .. }
                | Self::DirectoryNotListable { .. }
                | Self::SinkWrite { .. }
                | Self::SinkClose { .. }
                | Self::NonUtf8Path { .. }
        )
    }

    /// Returns the filesystem path this error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound { path }
            | Self::NotADirectory { path }
            | Self::FileNotReadable { path, .. }
            | Self::DirectoryNotListable { path, .. }
            | Self::NonUtf8Path { path } => Some(path),
            Self::OutputInsideRoot { output, .. } => Some(output),
            Self::CompilerSpawn { program, .. } => Some(program),
            _ => None,
        }
    }
}
