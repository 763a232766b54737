//! Directory packaging into jar archives.
//!
//! Every file and directory under a root is written as one zip entry named by
//! its path relative to the root. Directories get a trailing `/` and come
//! before their contents. One path, normally the jar being written, can be
//! excluded together with its subtree.
//!
//! # Examples
//!
//! ```no_run
//! use jarsmith_core::archive::ArchiveConfig;
//! use jarsmith_core::archive::ArchiveRequest;
//! use std::fs::File;
//!
//! let sink = File::create("classes.jar")?;
//! let report = ArchiveRequest::new("build/classes")
//!     .exclude("build/classes/classes.jar")
//!     .write_to(sink, &ArchiveConfig::default())?;
//! println!("{} entries", report.total_items());
//! # Ok::<(), jarsmith_core::JarsmithError>(())
//! ```

pub mod config;
pub mod report;
pub mod walker;
mod writer;

pub use config::ArchiveConfig;
pub use report::CreationReport;
pub use walker::ArchiveEntry;
pub use walker::EntryKind;

use crate::JarsmithError;
use crate::ProgressCallback;
use crate::Result;
use crate::progress::NoopProgress;
use crate::progress::ProgressTracker;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

/// One packaging job: a root directory and an optional excluded path.
///
/// A request is consumed by the write that uses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    root: PathBuf,
    exclude: Option<PathBuf>,
}

impl ArchiveRequest {
    /// Creates a request for everything under `root`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: None,
        }
    }

    /// Leaves `path` and everything below it out of the archive.
    ///
    /// The path does not need to exist.
    #[must_use]
    pub fn exclude<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.exclude = Some(path.as_ref().to_path_buf());
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the excluded path, if any.
    #[must_use]
    pub fn excluded(&self) -> Option<&Path> {
        self.exclude.as_deref()
    }

    /// Writes the archive to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the root is missing
    /// or not a directory, a file or directory cannot be read, or the sink
    /// fails. The sink content is unusable after an error.
    pub fn write_to<W: Write + Seek>(
        self,
        sink: W,
        config: &ArchiveConfig,
    ) -> Result<CreationReport> {
        self.write_to_with_progress(sink, config, &mut NoopProgress)
    }

    /// Writes the archive to `sink`, reporting progress.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveRequest::write_to`].
    pub fn write_to_with_progress<W: Write + Seek>(
        self,
        sink: W,
        config: &ArchiveConfig,
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        config.validate()?;

        let entries = walker::collect_entries(&self.root, self.exclude.as_deref(), config)?;
        let mut tracker = ProgressTracker::new(progress, entries.len());
        let report = writer::write_entries(sink, &entries, config, &mut tracker)?;

        info!(
            root = %self.root.display(),
            files = report.files_added,
            directories = report.directories_added,
            bytes = report.bytes_written,
            "archive written"
        );

        Ok(report)
    }

    /// Writes the archive to the file `output`.
    ///
    /// A partially written file is removed when packaging fails.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveRequest::write_to`]. Also fails with
    /// [`JarsmithError::OutputInsideRoot`] before touching `output` when it lies
    /// under the root without being covered by the exclusion.
    pub fn write_jar(self, output: &Path, config: &ArchiveConfig) -> Result<CreationReport> {
        self.write_jar_with_progress(output, config, &mut NoopProgress)
    }

    /// Writes the archive to the file `output`, reporting progress.
    ///
    /// # Errors
    ///
    /// Same as [`ArchiveRequest::write_jar`].
    pub fn write_jar_with_progress(
        self,
        output: &Path,
        config: &ArchiveConfig,
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        config.validate()?;
        if !self.root.is_dir() {
            return Err(if self.root.exists() {
                JarsmithError::NotADirectory { path: self.root }
            } else {
                JarsmithError::SourceNotFound { path: self.root }
            });
        }
        if self.packs_itself(output) {
            return Err(JarsmithError::OutputInsideRoot {
                output: output.to_path_buf(),
                root: self.root,
            });
        }

        let file = File::create(output)?;
        let result = self.write_to_with_progress(file, config, progress);

        if result.is_err()
            && let Err(e) = std::fs::remove_file(output)
        {
            warn!(output = %output.display(), "failed to remove partial archive: {e}");
        }

        result
    }

    /// Returns `true` if `output` would be collected as one of the entries.
    fn packs_itself(&self, output: &Path) -> bool {
        let output = walker::normalize_path(output);
        output.starts_with(walker::normalize_path(&self.root))
            && !self
                .exclude
                .as_deref()
                .is_some_and(|exclude| output.starts_with(walker::normalize_path(exclude)))
    }
}

/// Archives everything under `root` into `sink`, skipping `exclude`.
///
/// # Errors
///
/// See [`ArchiveRequest::write_to`].
pub fn archive_directory<W: Write + Seek>(
    root: &Path,
    exclude: Option<&Path>,
    sink: W,
    config: &ArchiveConfig,
) -> Result<CreationReport> {
    archive_directory_with_progress(root, exclude, sink, config, &mut NoopProgress)
}

/// Archives everything under `root` into `sink` with progress reporting.
///
/// # Errors
///
/// See [`ArchiveRequest::write_to`].
pub fn archive_directory_with_progress<W: Write + Seek>(
    root: &Path,
    exclude: Option<&Path>,
    sink: W,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let mut request = ArchiveRequest::new(root);
    if let Some(exclude) = exclude {
        request = request.exclude(exclude);
    }
    request.write_to_with_progress(sink, config, progress)
}

/// Creates the jar file `output` from everything under `root`.
///
/// `output` is always excluded, so it may live inside `root`. A partially
/// written file is removed when packaging fails.
///
/// # Errors
///
/// See [`ArchiveRequest::write_to`]; also fails if `output` cannot be
/// created.
pub fn create_jar(output: &Path, root: &Path, config: &ArchiveConfig) -> Result<CreationReport> {
    create_jar_with_progress(output, root, config, &mut NoopProgress)
}

/// Creates the jar file `output` from everything under `root` with progress
/// reporting.
///
/// # Errors
///
/// See [`create_jar`].
pub fn create_jar_with_progress(
    output: &Path,
    root: &Path,
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    ArchiveRequest::new(root)
        .exclude(output)
        .write_jar_with_progress(output, config, progress)
}
