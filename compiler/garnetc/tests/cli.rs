//! End-to-end runs of the `garnet` binary.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn garnet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_garnet"))
        .args(args)
        .env_remove("GARNET_LOG")
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn lex_prints_one_event_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "a.rb", "puts 1\n");
    let out = garnet(&["lex", &path]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let first: Vec<&str> = stdout.lines().take(3).collect();
    assert_eq!(
        first,
        vec!["1:0 Identifier \"puts\"", "1:4 Space \" \"", "1:5 Integer \"1\""]
    );
}

#[test]
fn check_reports_errors_and_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "good.rb", "x = [1, 2]\n");
    let bad = write(dir.path(), "bad.rb", "x = <<EOS\nbody\n");
    let out = garnet(&["check", "--no-color", &good, &bad]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error[E0002]"));
    assert!(stderr.contains("bad.rb:1:"));
    assert!(stderr.contains("lexing failed with 1 error"));
}

#[test]
fn check_clean_files_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "ok.rb", "# frozen_string_literal: true\ns = 'a'\n");
    let out = garnet(&["check", &path]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty());
}

#[test]
fn unknown_option_is_a_usage_error() {
    let out = garnet(&["check", "--bogus", "a.rb"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn unreadable_file_is_reported() {
    let out = garnet(&["check", "--no-color", "/nonexistent/garnet/x.rb"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error[E0016]: cannot find file"));
}

#[test]
fn log_env_enables_lexer_tracing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "h.rb", "x = <<EOS\nbody\nEOS\n");
    let out = Command::new(env!("CARGO_BIN_EXE_garnet"))
        .args(["lex", "--no-color", &path])
        .env("GARNET_LOG", "garnet_lexer=debug")
        .output()
        .unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("heredoc opened"));
    assert!(stderr.contains("heredoc closed"));

    let quiet = garnet(&["lex", &path]);
    assert!(quiet.stderr.is_empty());
}
