// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `slab` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn slab() -> Command {
    Command::cargo_bin("slab").unwrap()
}

#[test]
fn segment_touching_a_face_intersects() {
    slab()
        .args([
            "query",
            "segment",
            "--source",
            "0,0,0",
            "--target",
            "2,0,0",
            "--bbox",
            "1,-1,-1,3,1,1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("intersects: true"))
        .stdout(predicate::str::contains("path: fast"));
}

#[test]
fn ray_and_segment_diverge_past_the_second_point() {
    let common = [
        "--source",
        "0,0,0",
        "--target",
        "1,0,0",
        "--bbox",
        "10,-1,-1,20,1,1",
    ];
    slab()
        .arg("query")
        .arg("ray")
        .args(common)
        .assert()
        .success()
        .stdout(predicate::str::contains("intersects: true"));
    slab()
        .arg("query")
        .arg("segment")
        .args(common)
        .assert()
        .success()
        .stdout(predicate::str::contains("intersects: false"));
}

#[test]
fn grazing_corner_reports_the_exact_path() {
    slab()
        .args([
            "query",
            "segment",
            "--source",
            "0,0,0.5",
            "--target",
            "2,2,0.5",
            "--bbox",
            "1,-5,0,3,1,1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("intersects: true"))
        .stdout(predicate::str::contains("path: exact (uncertain sign"));
}

#[test]
fn query_json_output_parses() {
    let output = slab()
        .args([
            "query",
            "ray",
            "--source",
            "-1e-300,2.5e-301,2.5e-301",
            "--target",
            "2e-300,7.5e-301,7.5e-301",
            "--bbox",
            "0,0,0,1e-300,1e-300,1e-300",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["intersects"], true);
    assert_eq!(value["delegated"], "Underflow");
}

#[test]
fn inverted_box_is_a_usage_error() {
    slab()
        .args([
            "query",
            "segment",
            "--source",
            "0,0,0",
            "--target",
            "1,1,1",
            "--bbox",
            "0,0,0,1,-1,1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid bbox"));
}

#[test]
fn infinite_box_bounds_are_a_usage_error() {
    slab()
        .args([
            "query",
            "segment",
            "--source",
            "0,0.5,0.5",
            "--target",
            "1,0.5,0.5",
            "--bbox=-inf,0,0,inf,1,1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-finite coordinate on the x axis"));
}

#[test]
fn malformed_point_is_a_usage_error() {
    slab()
        .args([
            "query",
            "segment",
            "--source",
            "0,0",
            "--target",
            "1,1,1",
            "--bbox",
            "0,0,0,1,1,1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 comma-separated numbers"));
}

#[test]
fn fuzz_run_prints_a_table_and_succeeds() {
    slab()
        .args(["fuzz", "--cases", "500", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("near-tangent"))
        .stdout(predicate::str::contains("seed 7: 500 cases, 0 mismatches"));
}

#[test]
fn fuzz_reads_a_config_file_and_flags_override_it() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "cases": 100000, "seed": 3, "rays": false, "mix": {{ "grid": 3, "huge": 0 }} }}"#
    )
    .unwrap();
    let output = slab()
        .args(["fuzz", "--json", "--cases", "300", "--config"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["cases"], 300);
    assert_eq!(value["seed"], 3);
    assert_eq!(value["mismatch_count"], 0);
    let huge = value["families"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["family"] == "huge")
        .unwrap();
    assert_eq!(huge["stats"]["overflow"], 0);
}

#[test]
fn invalid_config_fails_with_context() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "cases": "many" }}"#).unwrap();
    slab()
        .args(["fuzz", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading fuzz config"));
}
