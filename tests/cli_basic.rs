//! Basic CLI tests for svgv
//!
//! Covers help/version output, argument errors and the non-interactive
//! `--check` mode.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn svgv() -> Command {
    Command::cargo_bin("svgv").unwrap()
}

fn write_svg(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    svgv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn version_flag_shows_version() {
    svgv()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Options (Exit Code 3)
// =============================================================================

#[test]
fn unknown_option_returns_exit_code_3() {
    svgv()
        .args(["--unknown-option", "a.svg"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn missing_input_returns_exit_code_3() {
    svgv().assert().code(3);
}

// =============================================================================
// Check Mode
// =============================================================================

#[test]
fn check_clean_file() {
    let temp = TempDir::new().unwrap();
    let path = write_svg(&temp, "circle.svg", "<svg><circle r=\"4\"/></svg>");

    svgv()
        .args(["--check", &path])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("circle.svg: clean"));
}

#[test]
fn check_blocked_file() {
    let temp = TempDir::new().unwrap();
    let path = write_svg(&temp, "evil.svg", "<svg><script>alert(1)</script></svg>");

    svgv()
        .args(["--check", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("blocked elements found"))
        .stdout(predicate::str::contains("element:script"));
}

#[test]
fn check_width_changes_banner_layout() {
    let temp = TempDir::new().unwrap();
    let path = write_svg(&temp, "evil.svg", "<svg><script>alert(1)</script></svg>");

    svgv()
        .args(["--check", "-w", "200", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("banner (200x1): "));

    svgv()
        .args(["--check", "-w", "20", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("banner (20x"))
        .stdout(predicate::str::contains("(200x1)").not());
}

#[test]
fn check_missing_file() {
    svgv()
        .args(["--check", "/no/such/drawing.svg"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("unreadable"));
}

#[test]
fn check_stdin_json() {
    svgv()
        .args(["--check", "--json", "-"])
        .write_stdin(r#"<svg onload="go()"></svg>"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"outcome\": \"blocked\""))
        .stdout(predicate::str::contains("event-attribute"));
}
