#![allow(deprecated)]
//! CLI 종료 코드 테스트
//!
//! 0: 성공, 1: 사용법 오류, 2: 변환 오류

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rdfconvert() -> Command {
    let mut cmd = Command::cargo_bin("rdfconvert").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_missing_argument_is_usage_error() {
    rdfconvert().assert().code(1);
}

#[test]
fn test_help_exits_zero() {
    rdfconvert()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rdfconvert"));
}

#[test]
fn test_missing_path_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();

    rdfconvert()
        .arg(temp_dir.path().join("missing.rdfe"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_wrong_extension_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.json");
    fs::write(&input, "{}").unwrap();

    rdfconvert()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".rdfe"));
}

#[test]
fn test_single_file_success() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.rdfe");
    fs::write(&input, r#"{"Name": "Folder1", "Objects": []}"#).unwrap();

    rdfconvert().arg(&input).assert().success();

    let xml = fs::read_to_string(temp_dir.path().join("export.rdfx")).unwrap();
    assert!(xml.contains("<Name>Folder1</Name>"));
}

#[test]
fn test_schema_error_exits_two() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("export.rdfe");
    fs::write(&input, r#"{"Name": "Folder1", "Version": 3}"#).unwrap();

    rdfconvert()
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Version"));

    assert!(!temp_dir.path().join("export.rdfx").exists());
}

#[test]
fn test_directory_keep_going_exits_two_and_writes_log() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rdfe"), r#"{"Name": "A"}"#).unwrap();
    fs::write(temp_dir.path().join("b.rdfe"), r#"{"Name": "#).unwrap();
    fs::write(temp_dir.path().join("c.rdfe"), r#"{"Name": "C"}"#).unwrap();
    let log = temp_dir.path().join("errors.log");

    rdfconvert()
        .arg(temp_dir.path())
        .arg("--keep-going")
        .arg("--log")
        .arg(&log)
        .assert()
        .code(2);

    assert!(temp_dir.path().join("a.rdfx").exists());
    assert!(temp_dir.path().join("c.rdfx").exists());
    let log_content = fs::read_to_string(&log).unwrap();
    assert!(log_content.contains("b.rdfe"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.rdfe"), "{}").unwrap();

    rdfconvert()
        .arg(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.rdfx"));

    assert!(!temp_dir.path().join("a.rdfx").exists());
}
