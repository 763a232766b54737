//! Progress reporting for archive packaging.

use std::path::Path;

/// Receives progress events while an archive is written.
///
/// Events arrive in this order for every entry: `on_entry_start`, zero or
/// more `on_bytes_written` (files only), `on_entry_complete`. `on_complete`
/// fires once after the archive has been finalized.
pub trait ProgressCallback {
    /// Called before an entry is written.
    ///
    /// `current` is 1-based; `total` is the number of entries in the archive.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of file content copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once the archive is complete.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}

/// Wraps a callback and keeps the running entry counter.
pub(crate) struct ProgressTracker<'a> {
    progress: &'a mut dyn ProgressCallback,
    current_entry: usize,
    total_entries: usize,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(progress: &'a mut dyn ProgressCallback, total_entries: usize) -> Self {
        Self {
            progress,
            current_entry: 0,
            total_entries,
        }
    }

    pub(crate) fn on_entry_start(&mut self, path: &Path) {
        self.current_entry += 1;
        self.progress
            .on_entry_start(path, self.total_entries, self.current_entry);
    }

    pub(crate) fn on_bytes_written(&mut self, bytes: u64) {
        self.progress.on_bytes_written(bytes);
    }

    pub(crate) fn on_entry_complete(&mut self, path: &Path) {
        self.progress.on_entry_complete(path);
    }

    pub(crate) fn on_complete(&mut self) {
        self.progress.on_complete();
    }
}
