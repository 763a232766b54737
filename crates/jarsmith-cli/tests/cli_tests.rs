//! Integration tests for jarsmith-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn jarsmith_cmd() -> Command {
    cargo_bin_cmd!("jarsmith")
}

fn javac_available() -> bool {
    std::process::Command::new("javac")
        .arg("-version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn zip_names(path: &Path) -> Vec<String> {
    let data = fs::read(path).expect("read jar");
    let archive = zip::ZipArchive::new(Cursor::new(data)).expect("open jar");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn scenario_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "hi").unwrap();
    fs::write(root.join("sub/b.txt"), "bye").unwrap();
}

#[test]
fn test_version_flag() {
    jarsmith_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jarsmith"));
}

#[test]
fn test_help_flag() {
    jarsmith_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_pack_help() {
    jarsmith_cmd()
        .arg("pack")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Package a directory tree"));
}

#[test]
fn test_pack_default_output_inside_root() {
    let temp = TempDir::new().expect("failed to create temp dir");
    scenario_tree(temp.path());

    jarsmith_cmd()
        .arg("pack")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Jar created"));

    assert_eq!(
        zip_names(&temp.path().join("classes.jar")),
        vec!["a.txt", "sub/", "sub/b.txt"]
    );
}

#[test]
fn test_pack_explicit_output_and_exclude() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("root");
    scenario_tree(&root);
    let output = temp.path().join("out.jar");

    jarsmith_cmd()
        .arg("pack")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .arg("--exclude")
        .arg(root.join("sub"))
        .assert()
        .success();

    assert_eq!(zip_names(&output), vec!["a.txt"]);
}

#[test]
fn test_pack_output_inside_root_with_other_exclusion() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("root");
    scenario_tree(&root);
    let output = root.join("out.jar");

    jarsmith_cmd()
        .arg("pack")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .arg("-x")
        .arg(root.join("other"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("packed into itself"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!output.exists());
}

#[test]
fn test_pack_output_inside_excluded_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("root");
    scenario_tree(&root);
    fs::create_dir_all(root.join("dist")).unwrap();
    let output = root.join("dist/app.jar");

    jarsmith_cmd()
        .arg("pack")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .arg("-x")
        .arg(root.join("dist"))
        .assert()
        .success();

    assert_eq!(zip_names(&output), vec!["a.txt", "sub/", "sub/b.txt"]);
}

#[test]
fn test_pack_refuses_overwrite_without_force() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("root");
    scenario_tree(&root);
    let output = temp.path().join("out.jar");
    fs::write(&output, "existing").unwrap();

    jarsmith_cmd()
        .arg("pack")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

    jarsmith_cmd()
        .arg("pack")
        .arg(&root)
        .arg("-o")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();

    assert_eq!(zip_names(&output), vec!["a.txt", "sub/", "sub/b.txt"]);
}

#[test]
fn test_pack_missing_root() {
    let temp = TempDir::new().expect("failed to create temp dir");

    jarsmith_cmd()
        .arg("pack")
        .arg(temp.path().join("missing"))
        .arg("-o")
        .arg(temp.path().join("out.jar"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));

    assert!(!temp.path().join("out.jar").exists());
}

#[test]
fn test_pack_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    scenario_tree(temp.path());

    let output = jarsmith_cmd()
        .arg("--json")
        .arg("pack")
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["directories_added"], 1);
}

#[test]
fn test_pack_stored_level() {
    let temp = TempDir::new().expect("failed to create temp dir");
    scenario_tree(temp.path());
    let output = temp.path().join("stored.jar");

    jarsmith_cmd()
        .args(["pack", "-l", "0", "-o"])
        .arg(&output)
        .arg(temp.path())
        .assert()
        .success();

    let data = fs::read(&output).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    let entry = archive.by_name("a.txt").unwrap();
    assert_eq!(entry.compression(), zip::CompressionMethod::Stored);
}

#[test]
fn test_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    scenario_tree(temp.path());

    jarsmith_cmd()
        .arg("-q")
        .arg("pack")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_completion_bash() {
    jarsmith_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jarsmith"));
}

#[test]
fn test_compile_requires_output_dir() {
    jarsmith_cmd()
        .args(["compile", "A.java"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn test_compile_with_missing_javac_binary() {
    let temp = TempDir::new().expect("failed to create temp dir");

    jarsmith_cmd()
        .arg("compile")
        .arg("--javac")
        .arg(temp.path().join("no-such-javac"))
        .arg("-d")
        .arg(temp.path().join("out"))
        .arg("A.java")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to start"));
}

#[test]
fn test_compile_and_jar_with_jdk() {
    if !javac_available() {
        return;
    }

    let temp = TempDir::new().expect("failed to create temp dir");
    let src = temp.path().join("Hello.java");
    fs::write(&src, "public class Hello { }\n").unwrap();
    let out = temp.path().join("out");

    jarsmith_cmd()
        .arg("compile")
        .arg("-d")
        .arg(&out)
        .arg("--jar=hello.jar")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Jar created"));

    assert_eq!(zip_names(&out.join("hello.jar")), vec!["Hello.class"]);
}

#[test]
fn test_compile_failure_exit_code_with_jdk() {
    if !javac_available() {
        return;
    }

    let temp = TempDir::new().expect("failed to create temp dir");
    let src = temp.path().join("Broken.java");
    fs::write(&src, "public class Broken { int x = }\n").unwrap();
    let out = temp.path().join("out");

    jarsmith_cmd()
        .arg("compile")
        .arg("-d")
        .arg(&out)
        .arg("--jar")
        .arg("--")
        .arg(&src)
        .assert()
        .failure()
        .stdout(predicate::str::contains("[ERROR]:"));

    assert!(!out.join("classes.jar").exists());
}
