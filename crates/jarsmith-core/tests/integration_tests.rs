//! Integration tests for jarsmith-core.
//!
//! These tests pack real directory trees and read the archives back.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use jarsmith_core::ArchiveConfig;
use jarsmith_core::ArchiveRequest;
use jarsmith_core::JarsmithError;
use jarsmith_core::JavaCompiler;
use jarsmith_core::ProgressCallback;
use jarsmith_core::archive_directory;
use jarsmith_core::archive_directory_with_progress;
use jarsmith_core::create_jar;
use jarsmith_core::test_utils::create_tree;
use jarsmith_core::test_utils::read_zip_entries;
use jarsmith_core::test_utils::read_zip_names;
use std::fs;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn scenario_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    create_tree(
        temp.path(),
        &[("a.txt", Some(b"hi")), ("sub/b.txt", Some(b"bye"))],
    );
    temp
}

fn pack(root: &Path, exclude: Option<&Path>) -> Vec<u8> {
    let mut sink = Cursor::new(Vec::new());
    archive_directory(root, exclude, &mut sink, &ArchiveConfig::default()).unwrap();
    sink.into_inner()
}

#[test]
fn test_pack_scenario_without_exclusion() {
    let temp = scenario_tree();
    let mut entries = read_zip_entries(&pack(temp.path(), None));
    entries.sort();

    assert_eq!(
        entries,
        vec![
            ("a.txt".to_string(), Some(b"hi".to_vec())),
            ("sub/".to_string(), None),
            ("sub/b.txt".to_string(), Some(b"bye".to_vec())),
        ]
    );
}

#[test]
fn test_pack_scenario_excluding_file() {
    let temp = scenario_tree();
    let exclude = temp.path().join("sub/b.txt");
    let mut names = read_zip_names(&pack(temp.path(), Some(&exclude)));
    names.sort();

    assert_eq!(names, vec!["a.txt", "sub/"]);
}

#[test]
fn test_pack_scenario_excluding_directory() {
    let temp = scenario_tree();
    let exclude = temp.path().join("sub");

    assert_eq!(read_zip_names(&pack(temp.path(), Some(&exclude))), vec!["a.txt"]);
}

#[test]
fn test_exclusion_matches_equivalent_path_forms() {
    let temp = scenario_tree();
    let exclude = temp.path().join(".").join("sub").join(".").join("b.txt");
    let names = read_zip_names(&pack(temp.path(), Some(&exclude)));

    assert!(!names.contains(&"sub/b.txt".to_string()));
    assert!(names.contains(&"sub/".to_string()));
}

#[test]
fn test_empty_root_gives_empty_archive() {
    let temp = TempDir::new().unwrap();
    let data = pack(temp.path(), None);

    assert!(read_zip_names(&data).is_empty());
}

#[test]
fn test_directories_precede_contents() {
    let temp = TempDir::new().unwrap();
    create_tree(
        temp.path(),
        &[
            ("com/example/app/Main.class", Some(b"m")),
            ("com/example/util/Strings.class", Some(b"s")),
            ("META-INF/MANIFEST.MF", Some(b"Manifest-Version: 1.0\n")),
            ("empty", None),
        ],
    );

    let names = read_zip_names(&pack(temp.path(), None));
    for (i, name) in names.iter().enumerate() {
        let mut parent = name.trim_end_matches('/');
        while let Some(idx) = parent.rfind('/') {
            parent = &parent[..idx];
            let dir = format!("{parent}/");
            let pos = names.iter().position(|n| *n == dir).unwrap();
            assert!(pos < i, "{dir} must come before {name}");
        }
    }
    assert!(names.contains(&"empty/".to_string()));
    assert_eq!(names.len(), 9);
}

#[test]
fn test_entry_names_are_relative_with_forward_slashes() {
    let temp = TempDir::new().unwrap();
    create_tree(temp.path(), &[("a/b/c/D.class", Some(b"d"))]);

    for name in read_zip_names(&pack(temp.path(), None)) {
        assert!(!name.starts_with('/'));
        assert!(!name.contains('\\'));
        assert!(!name.contains(".."));
    }
}

#[test]
fn test_entry_timestamps_are_recent() {
    let temp = scenario_tree();
    let data = pack(temp.path(), None);

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    let entry = archive.by_name("a.txt").unwrap();
    let modified = entry.last_modified().unwrap();
    assert!(modified.year() >= 2024);
}

#[test]
fn test_large_file_content_preserved() {
    let temp = TempDir::new().unwrap();
    let content: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    create_tree(temp.path(), &[("big.bin", Some(content.as_slice()))]);

    let config = ArchiveConfig::default().with_buffer_size(4096);
    let mut sink = Cursor::new(Vec::new());
    let report = archive_directory(temp.path(), None, &mut sink, &config).unwrap();
    assert_eq!(report.bytes_written, 300_000);

    let mut archive = zip::ZipArchive::new(Cursor::new(sink.into_inner())).unwrap();
    let mut read_back = Vec::new();
    archive
        .by_name("big.bin")
        .unwrap()
        .read_to_end(&mut read_back)
        .unwrap();
    assert_eq!(read_back, content);
}

#[test]
fn test_missing_root_is_reported() {
    let temp = TempDir::new().unwrap();
    let mut sink = Cursor::new(Vec::new());
    let result = ArchiveRequest::new(temp.path().join("nope"))
        .write_to(&mut sink, &ArchiveConfig::default());

    assert!(matches!(result, Err(JarsmithError::SourceNotFound { .. })));
}

#[test]
fn test_create_jar_in_root_excludes_itself() {
    let temp = scenario_tree();
    let output = temp.path().join("classes.jar");

    create_jar(&output, temp.path(), &ArchiveConfig::default()).unwrap();
    // Packing again must not pick up the jar from the previous run.
    create_jar(&output, temp.path(), &ArchiveConfig::default()).unwrap();

    let mut names = read_zip_names(&fs::read(&output).unwrap());
    names.sort();
    assert_eq!(names, vec!["a.txt", "sub/", "sub/b.txt"]);
}

#[derive(Default)]
struct RecordingProgress {
    started: Vec<(PathBuf, usize, usize)>,
    completed: usize,
    bytes: u64,
    finished: usize,
}

impl ProgressCallback for RecordingProgress {
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
        self.started.push((path.to_path_buf(), total, current));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.completed += 1;
    }

    fn on_complete(&mut self) {
        self.finished += 1;
    }
}

#[test]
fn test_progress_events() {
    let temp = scenario_tree();
    let mut progress = RecordingProgress::default();
    let mut sink = Cursor::new(Vec::new());

    archive_directory_with_progress(
        temp.path(),
        None,
        &mut sink,
        &ArchiveConfig::default(),
        &mut progress,
    )
    .unwrap();

    assert_eq!(progress.started.len(), 3);
    assert!(progress.started.iter().all(|(_, total, _)| *total == 3));
    let counters: Vec<_> = progress.started.iter().map(|(_, _, c)| *c).collect();
    assert_eq!(counters, vec![1, 2, 3]);
    assert_eq!(progress.completed, 3);
    assert_eq!(progress.bytes, 5);
    assert_eq!(progress.finished, 1);
}

#[test]
fn test_compiler_packages_existing_output() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("classes");
    create_tree(&out, &[("p/A.class", Some(b"a")), ("p/B.class", Some(b"b"))]);

    let mut compiler = JavaCompiler::new();
    compiler.set_output_folder(&out);
    compiler.generate_jar_named("lib.jar").unwrap();

    let mut names = read_zip_names(&fs::read(out.join("lib.jar")).unwrap());
    names.sort();
    assert_eq!(names, vec!["p/", "p/A.class", "p/B.class"]);
}
