//! Integration tests driving the `confstack-demo` binary end to end.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

fn demo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_confstack-demo"))
}

fn run_demo(args: &[&str]) -> Output {
    Command::new(demo_bin())
        .args(args)
        .output()
        .expect("failed to run confstack-demo")
}

fn dump(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON dump: {e}\n{stdout}"))
}

#[test]
fn test_no_arguments_prints_root_help() {
    let output = run_demo(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage: confstack-demo <command> [options]"));
    assert!(stdout.contains("commands:"));
    assert!(stdout.contains("pack"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_help_flag_exits_zero() {
    let output = run_demo(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("usage: confstack-demo"));
    assert!(stdout.contains("--help,-h"));
}

#[test]
fn test_pack_resolves_flags_and_positionals() {
    let output = run_demo(&[
        "pack", "out.tar", "a.txt", "b.txt", "--format", "zip", "-l", "9",
    ]);
    assert!(
        output.status.success(),
        "pack failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    let dump = dump(&output);
    assert_eq!(dump["output"], "out.tar");
    assert_eq!(dump["inputs"], serde_json::json!(["a.txt", "b.txt"]));
    assert_eq!(dump["format"], "zip");
    assert_eq!(dump["level"], 9);
    assert_eq!(dump["verbose"], false);
}

#[test]
fn test_parse_error_exits_one_with_hint() {
    let output = run_demo(&["pack", "out.tar", "--bogus"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("confstack-demo: Unrecognized option: 'bogus'"));
    assert!(stdout.contains("use 'confstack-demo <command> --help' to view usage"));
}

#[test]
fn test_invalid_command_hint_omits_command_placeholder() {
    let output = run_demo(&["unpack"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("confstack-demo: 'unpack' is not a valid command"));
    assert!(stdout.contains("use 'confstack-demo --help' to view usage"));
}

#[test]
fn test_config_file_fills_in_unset_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, r#"{{ "level": 3, "format": "dir" }}"#).unwrap();

    let output = run_demo(&["pack", "out.tar", "--config", path.to_str().unwrap()]);
    assert!(output.status.success());
    let dump = dump(&output);
    assert_eq!(dump["level"], 3);
    assert_eq!(dump["format"], "dir");
}

#[test]
fn test_command_line_outranks_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, r#"{{ "level": 3 }}"#).unwrap();

    let output = run_demo(&[
        "pack",
        "out.tar",
        "-l",
        "9",
        "--config",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(dump(&output)["level"], 9);
}

#[test]
fn test_bad_config_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, r#"{{ "level": "three" }}"#).unwrap();

    let output = run_demo(&["pack", "out.tar", "--config", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config key 'level'"));
}
