//! Packaging statistics.

use serde::Serialize;
use std::time::Duration;

/// Report of a completed archive.
///
/// # Examples
///
/// ```
/// use jarsmith_core::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreationReport {
    /// Number of file entries written.
    pub files_added: usize,

    /// Number of directory entries written.
    pub directories_added: usize,

    /// File content bytes copied into the archive (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive in bytes.
    pub bytes_compressed: u64,

    /// Entries left out of the archive (symlinks when not followed).
    pub files_skipped: usize,

    /// Time spent writing the archive.
    pub duration: Duration,

    /// Warnings generated while packaging.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if nothing was written and never goes below 0.0 when the
    /// archive is larger than its content.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        if self.bytes_compressed == 0 {
            return 100.0;
        }
        let saved = self.bytes_written.saturating_sub(self.bytes_compressed);
        (saved as f64 / self.bytes_written as f64) * 100.0
    }

    /// Returns the number of entries in the archive.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_added + self.directories_added
    }
}
