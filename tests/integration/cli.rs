//! Integration tests for the `tier` binary.

#![cfg(test)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::common::*;

fn tier(program: &ProgramDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tier"))
        .arg("--directory")
        .arg(program.path())
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start tier");
    if let Some(mut pipe) = child.stdin.take() {
        // The program may exit without reading.
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

#[test]
fn runs_a_program() {
    let program = ProgramDir::with_tiers(&[(0, r#""hi\n"{#"#)]);
    let out = tier(&program, &[], "");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hi\n");
}

#[test]
fn reads_standard_input() {
    let program = ProgramDir::with_tiers(&[(0, "}{#")]);
    let out = tier(&program, &[], "echo\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "echo");
}

#[test]
fn set_ts_uses_the_quoting_convention() {
    let program = ProgramDir::with_tiers(&[(0, "~[{#")]);
    let out = tier(&program, &["--set-ts", "'12'"], "");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "12");
}

#[test]
fn malformed_set_ts_fails() {
    let program = ProgramDir::with_tiers(&[(0, "#")]);
    let out = tier(&program, &["--set-ts", "'1.2.3'"], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--set-ts"));
}

#[test]
fn info_writes_a_json_trace_to_stderr() {
    let program = ProgramDir::with_tiers(&[(0, ">#")]);
    let out = tier(&program, &["--info", "--trace-format", "json"], "");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.lines().count(), 2);
    assert!(stderr.lines().all(|l| l.starts_with('{')));
}

#[test]
fn missing_entry_point_fails() {
    let program = ProgramDir::with_tiers(&[(3, "#")]);
    let out = tier(&program, &[], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("0.tier"));
}

#[test]
fn max_ticks_bounds_the_run() {
    let program = ProgramDir::with_tiers(&[(0, ">")]);
    let out = tier(&program, &["--max-ticks", "50"], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("tick limit exceeded"));
}
