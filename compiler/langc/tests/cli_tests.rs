//! Tests for the `run` and `parse` commands against scripts on disk.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lang_eval::buffer_handler;
use langc::commands::{parse_file, read_file, run_file};
use langc::{CliError, RunOptions};
use pretty_assertions::assert_eq;

fn script(dir: &tempfile::TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

fn options(path: PathBuf) -> RunOptions {
    RunOptions {
        path,
        ..RunOptions::default()
    }
}

#[test]
fn test_run_prints_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "main.lang", "func.println(Hello, World)");
    let output = buffer_handler();
    let code = run_file(&options(path), Arc::clone(&output)).unwrap();
    assert_eq!(code, 0);
    assert_eq!(output.get_output(), "Hello, World\n");
}

#[test]
fn test_returned_number_is_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "main.lang", "return 3");
    assert_eq!(run_file(&options(path), buffer_handler()).unwrap(), 3);
}

#[test]
fn test_uncaught_throw_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "main.lang", "throw $LANG_ERROR_DIV_BY_ZERO");
    let output = buffer_handler();
    let code = run_file(&options(path), Arc::clone(&output)).unwrap();
    assert_eq!(code, 1);
    assert!(output.get_errors().starts_with("uncaught error: "));
}

#[test]
fn test_script_arguments_and_links() {
    let dir = tempfile::tempdir().unwrap();
    script(&dir, "lib.lang", "$suffix = !");
    let path = script(
        &dir,
        "main.lang",
        "linker.bindLibrary(lib.lang)\nfunc.println(&LANG_ARGS[0]$suffix)",
    );
    let output = buffer_handler();
    let run = RunOptions {
        arguments: vec!["hi".to_string()],
        ..options(path)
    };
    assert_eq!(run_file(&run, Arc::clone(&output)).unwrap(), 0);
    assert_eq!(output.get_output(), "hi!\n");
}

#[test]
fn test_timeout_stops_endless_loop() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "main.lang", "$i = 0\nloop\n\t$i += 1\nendloop");
    let run = RunOptions {
        timeout: Some(Duration::from_millis(50)),
        ..options(path)
    };
    let output = buffer_handler();
    assert_eq!(run_file(&run, Arc::clone(&output)).unwrap(), 2);
    assert_eq!(output.get_errors(), "script stopped\n");
}

#[test]
fn test_max_depth_option() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(
        &dir,
        "main.lang",
        "fp.f = () -> {\n\treturn fp.f()\n}\n$r = fp.f()\nfunc.println(func.typeOf($r))",
    );
    let run = RunOptions {
        max_depth: Some(8),
        ..options(path)
    };
    let output = buffer_handler();
    assert_eq!(run_file(&run, Arc::clone(&output)).unwrap(), 0);
    assert_eq!(output.get_output(), "ERROR\n");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.lang");
    assert!(matches!(read_file(&path), Err(CliError::NotFound(_))));
    assert!(matches!(
        run_file(&options(path), buffer_handler()),
        Err(CliError::NotFound(_))
    ));
}

#[test]
fn test_parse_reports_statements_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = script(&dir, "main.lang", "$a = 1\nendif");
    let tree = parse_file(&path).unwrap();
    assert!(tree.contains("Assignment"));
    assert!(tree.ends_with("2 statement(s), 1 parse error(s)\n"));
}
