#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn write_sample(name: &str, contents: &[u8]) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("chardetect-test-{}", name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_cli_single_file_json() {
    let path = write_sample("ascii.txt", b"Hello World");
    let mut cmd = Command::cargo_bin("chardetect").unwrap();
    cmd.arg(&path)
        .assert()
        .success()
        .code(predicate::eq(0))
        .stdout(predicate::str::contains("\"encoding\": \"ascii\""));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_cli_minimal_output() {
    let path = write_sample("bom.txt", b"\xef\xbb\xbfdata");
    let mut cmd = Command::cargo_bin("chardetect").unwrap();
    cmd.args([path.as_os_str(), "--minimal".as_ref()])
        .assert()
        .success()
        .stdout(predicate::str::diff("UTF-8-SIG\n"));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_cli_missing_file_fails() {
    let mut cmd = Command::cargo_bin("chardetect").unwrap();
    cmd.arg("definitely-not-a-real-file.bin")
        .assert()
        .failure()
        .code(predicate::eq(1));
}
