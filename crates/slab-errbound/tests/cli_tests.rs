// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `slab-errbound` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn errbound() -> Command {
    Command::cargo_bin("slab-errbound").unwrap()
}

#[test]
fn text_report_lists_constants() {
    let cross = "(a - b) * (c - d) - (e - f) * (g - h)";
    errbound()
        .assert()
        .success()
        .stdout(predicate::str::contains(cross))
        .stdout(predicate::str::contains("UNDERFLOW_DEGREE2"));
}

#[test]
fn rust_format_prints_const_items() {
    errbound()
        .args(["--format", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "pub const EPS_1: f64 = 3.55272e-15;",
        ))
        .stdout(predicate::str::contains(
            "pub const OVERFLOW_DEGREE2: f64 =",
        ));
}

#[test]
fn json_format_is_parseable() {
    let output = errbound()
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    let expressions = value["expressions"].as_array().map(Vec::len);
    assert_eq!(expressions, Some(4));
    let derived = value["derived"]["eps"].as_f64().unwrap();
    let compiled = value["compiled"]["eps"].as_f64().unwrap();
    assert!(derived <= compiled);
}

#[test]
fn check_passes_for_compiled_constants() {
    errbound()
        .args(["--check", "--format", "rust"])
        .assert()
        .success();
}

#[test]
fn digits_out_of_range_is_rejected() {
    errbound()
        .args(["--digits", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("digits"));
}
