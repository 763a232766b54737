//! Test utilities for building source trees and reading archives back.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;

/// Creates files and directories under `root`.
///
/// Each entry is a tuple of (relative path, content). `None` creates a
/// directory; `Some` creates a file, including missing parent directories.
///
/// # Examples
///
/// ```
/// use jarsmith_core::test_utils::create_tree;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// create_tree(temp.path(), &[("a.txt", Some(b"hi")), ("empty", None)]);
/// assert!(temp.path().join("empty").is_dir());
/// ```
pub fn create_tree(root: &Path, entries: &[(&str, Option<&[u8]>)]) {
    for (path, content) in entries {
        let full = root.join(path);
        match content {
            Some(data) => {
                if let Some(parent) = full.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&full, data).unwrap();
            }
            None => fs::create_dir_all(&full).unwrap(),
        }
    }
}

/// Reads every entry of an in-memory zip archive, in archive order.
///
/// Directory entries are returned with `None` content.
#[must_use]
pub fn read_zip_entries(data: &[u8]) -> Vec<(String, Option<Vec<u8>>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let name = entry.name().to_string();
        if entry.is_dir() {
            entries.push((name, None));
        } else {
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            entries.push((name, Some(content)));
        }
    }

    entries
}

/// Reads only the entry names of an in-memory zip archive, in archive order.
#[must_use]
pub fn read_zip_names(data: &[u8]) -> Vec<String> {
    read_zip_entries(data)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}
