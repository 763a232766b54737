//! Directory traversal for jar packaging.
//!
//! Walks the archive root depth-first in pre-order, computes the archive
//! name of every visited path and prunes the excluded path together with
//! everything below it.

use crate::JarsmithError;
use crate::Result;
use crate::archive::config::ArchiveConfig;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Kind of a visited filesystem object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (or a symlink to one when symlinks are followed).
    File,

    /// Directory (or a symlink to one when symlinks are followed).
    Directory,

    /// Symbolic link that is not followed.
    Symlink,
}

/// A filesystem object ready to be written to the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full filesystem path.
    pub path: PathBuf,

    /// Name inside the archive: relative to the root, `/`-separated, with a
    /// trailing `/` for directories.
    pub name: String,

    /// What the entry is.
    pub kind: EntryKind,

    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,

    /// Size in bytes (0 for directories).
    pub size: u64,

    /// Unix permission bits.
    pub mode: Option<u32>,
}

impl ArchiveEntry {
    /// Returns `true` for directory entries.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Pre-order walker over an archive root.
///
/// # Examples
///
/// ```no_run
/// use jarsmith_core::archive::ArchiveConfig;
/// use jarsmith_core::archive::walker::ArchiveWalker;
/// use std::path::Path;
///
/// let config = ArchiveConfig::default();
/// let walker = ArchiveWalker::new(Path::new("build/classes"), Some(Path::new("build/classes/classes.jar")), &config);
///
/// for entry in walker.walk() {
///     println!("{}", entry?.name);
/// }
/// # Ok::<(), jarsmith_core::JarsmithError>(())
/// ```
pub struct ArchiveWalker<'a> {
    root: &'a Path,
    normalized_root: PathBuf,
    exclude: Option<PathBuf>,
    config: &'a ArchiveConfig,
}

impl<'a> ArchiveWalker<'a> {
    /// Creates a walker for `root` that skips `exclude` and its subtree.
    #[must_use]
    pub fn new(root: &'a Path, exclude: Option<&Path>, config: &'a ArchiveConfig) -> Self {
        Self {
            root,
            normalized_root: normalize_path(root),
            exclude: exclude.map(normalize_path),
            config,
        }
    }

    /// Returns an iterator over the entries below the root.
    ///
    /// The root itself is not yielded. Children are visited in the order the
    /// filesystem lists them and every directory is yielded before its
    /// contents.
    pub fn walk(&self) -> impl Iterator<Item = Result<ArchiveEntry>> + '_ {
        WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry.path()))
            .map(move |entry| match entry {
                Ok(entry) => self.build_entry(&entry),
                Err(e) => Err(self.walk_error(e)),
            })
    }

    /// Returns `true` if `path` is the excluded path.
    ///
    /// Paths are compared after lexical normalization; symlinks are not
    /// resolved.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let Some(exclude) = &self.exclude else {
            return false;
        };
        let normalized = path.strip_prefix(self.root).map_or_else(
            |_| normalize_path(path),
            |relative| normalize_path(&self.normalized_root.join(relative)),
        );
        &normalized == exclude
    }

    fn build_entry(&self, entry: &walkdir::DirEntry) -> Result<ArchiveEntry> {
        let path = entry.path().to_path_buf();
        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        let metadata = entry
            .metadata()
            .map_err(|e| JarsmithError::FileNotReadable {
                path: path.clone(),
                source: walkdir_io_error(e),
            })?;

        let relative = path
            .strip_prefix(self.root)
            .map_err(|_| JarsmithError::NonUtf8Path { path: path.clone() })?;
        let mut name = archive_name(relative)?;
        if kind == EntryKind::Directory {
            name.push('/');
        }

        Ok(ArchiveEntry {
            size: if kind == EntryKind::File {
                metadata.len()
            } else {
                0
            },
            modified: metadata.modified().ok(),
            mode: unix_mode(&metadata),
            name,
            kind,
            path,
        })
    }

    fn walk_error(&self, err: walkdir::Error) -> JarsmithError {
        let path = err
            .path()
            .map_or_else(|| self.root.to_path_buf(), Path::to_path_buf);
        let source = walkdir_io_error(err);
        if path.is_dir() {
            JarsmithError::DirectoryNotListable { path, source }
        } else {
            JarsmithError::FileNotReadable { path, source }
        }
    }
}

/// Collects every entry below `root` in walk order.
///
/// Fails if `root` is missing or not a directory, or on the first entry that
/// cannot be read.
pub fn collect_entries(
    root: &Path,
    exclude: Option<&Path>,
    config: &ArchiveConfig,
) -> Result<Vec<ArchiveEntry>> {
    if !root.exists() {
        return Err(JarsmithError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(JarsmithError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    ArchiveWalker::new(root, exclude, config).walk().collect()
}

/// Normalizes a path lexically: anchors relative paths at the current
/// directory and drops `.` components and redundant separators.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Converts a root-relative path to a `/`-separated archive name.
fn archive_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| JarsmithError::NonUtf8Path {
                    path: relative.to_path_buf(),
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(JarsmithError::NonUtf8Path {
                    path: relative.to_path_buf(),
                });
            }
        }
    }
    Ok(parts.join("/"))
}

fn walkdir_io_error(err: walkdir::Error) -> std::io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message))
}

#[cfg(unix)]
fn unix_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}
