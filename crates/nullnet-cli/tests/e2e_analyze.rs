//! E2E tests for `nullnet analyze` and `nullnet stats`.
//!
//! Covers: report layout on disk, JSON reports, reproducibility with a fixed
//! seed, failure isolation and exit status, config-file handling, and the
//! stats subcommand.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test harness helpers
// ---------------------------------------------------------------------------

fn nullnet_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nullnet"));
    cmd.current_dir(dir);
    cmd.env("NULLNET_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write_inputs(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).expect("input dir");
    for (name, text) in files {
        fs::write(dir.join(name), text).expect("write input");
    }
}

const TRIANGLE: &str = "A B\nB C\nC A\n";
const PATH3: &str = "A B\nB C\n";
const HOUSE: &str = "A B\nB C\nC D\nD A\nA E\nB E\n";

// ---------------------------------------------------------------------------
// nullnet analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_writes_one_text_report_per_input() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(
        &dir.path().join("in"),
        &[("tri.txt", TRIANGLE), ("path.txt", PATH3), (".hidden", TRIANGLE)],
    );

    nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--seed", "7", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 succeeded, 0 failed"));

    let tri = fs::read_to_string(dir.path().join("out/tri.txt")).expect("tri report");
    assert!(tri.starts_with("File name: tri.txt\n"));
    assert!(tri.contains("Global Clustering: 1.0\n"));
    assert!(tri.contains("Z-scores - Clustering: undefined (zero variance)\n"));
    assert!(tri.contains("Top 5 Closeness:\n\t(A, 1.0)\n"));

    let path = fs::read_to_string(dir.path().join("out/path.txt")).expect("path report");
    assert!(path.contains("Top 5 Betweenness:\n\t(B, 0.5)\n"));

    assert!(!dir.path().join("out/.hidden").exists());
}

#[test]
fn analyze_json_reports_and_summary() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("house.txt", HOUSE)]);

    let output = nullnet_cmd(dir.path())
        .args([
            "analyze", "in", "-o", "out", "--seed", "3", "--samples", "5", "--top-k", "2",
            "--report", "json", "--format", "json",
        ])
        .output()
        .expect("analyze should not crash");
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let summary: Value = serde_json::from_slice(&output.stdout).expect("summary JSON");
    assert_eq!(summary["succeeded"], 1);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["base_seed"], 3);
    assert_eq!(summary["sample_count"], 5);
    assert_eq!(summary["files"][0]["outcome"], "written");

    let report: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("out/house.txt.json")).expect("json report"),
    )
    .expect("report JSON");
    assert_eq!(report["file_name"], "house.txt");
    assert_eq!(report["status"], "complete");
    assert_eq!(report["top_closeness"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["top_betweenness"].as_array().map(Vec::len), Some(2));
}

#[test]
fn analyze_is_reproducible_with_a_seed() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("house.txt", HOUSE), ("tri.txt", TRIANGLE)]);

    for (out, jobs) in [("out1", "1"), ("out2", "4")] {
        nullnet_cmd(dir.path())
            .args(["analyze", "in", "-o", out, "--seed", "99", "-j", jobs])
            .assert()
            .success();
    }

    for name in ["house.txt", "tri.txt"] {
        let a = fs::read_to_string(dir.path().join("out1").join(name)).expect("report");
        let b = fs::read_to_string(dir.path().join("out2").join(name)).expect("report");
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn analyze_keeps_going_after_a_bad_file_and_exits_non_zero() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(
        &dir.path().join("in"),
        &[
            ("a_good.txt", TRIANGLE),
            ("b_bad.txt", "A B C\n"),
            ("c_loop.txt", "X X\n"),
            ("d_good.txt", PATH3),
        ],
    );

    nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--seed", "1", "--format", "text"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("failed\tb_bad.txt\t"))
        .stdout(predicate::str::contains("failed\tc_loop.txt\t"))
        .stdout(predicate::str::contains("2 succeeded, 2 failed"));

    assert!(dir.path().join("out/a_good.txt").is_file());
    assert!(dir.path().join("out/d_good.txt").is_file());
    assert!(!dir.path().join("out/b_bad.txt").exists());
}

#[test]
fn analyze_empty_file_is_reported_not_failed() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("empty.txt", "# no edges\n")]);

    nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--seed", "1"])
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("out/empty.txt")).expect("report");
    assert!(report.contains("Avg Closeness: 0.0\n"));
    assert!(report.contains("Z-scores - Closeness: not computed\n"));
}

#[test]
fn analyze_reads_nullnet_toml_and_flags_override_it() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("house.txt", HOUSE)]);
    fs::write(
        dir.path().join("nullnet.toml"),
        "[analysis]\nsample_count = 4\ntop_k = 1\nseed = 11\n\n[runner]\njobs = 1\n",
    )
    .expect("write config");

    let output = nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--top-k", "3", "--format", "json"])
        .output()
        .expect("analyze should not crash");
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("summary JSON");
    assert_eq!(summary["sample_count"], 4);
    assert_eq!(summary["top_k"], 3);
    assert_eq!(summary["base_seed"], 11);
    assert_eq!(summary["jobs"], 1);

    let report = fs::read_to_string(dir.path().join("out/house.txt")).expect("report");
    assert!(report.contains("Top 3 Closeness:\n"));
}

#[test]
fn analyze_rejects_malformed_config() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("tri.txt", TRIANGLE)]);
    fs::write(dir.path().join("bad.toml"), "[analysis\n").expect("write config");

    nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--config", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn analyze_accepts_folder_flag() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("tri.txt", TRIANGLE)]);

    nullnet_cmd(dir.path())
        .args(["analyze", "-f", "in", "-o", "out", "--seed", "2", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));

    assert!(dir.path().join("out/tri.txt").is_file());
}

#[test]
fn analyze_fragment_pair_ranks_below_main_component() {
    let dir = TempDir::new().expect("tempdir");
    write_inputs(&dir.path().join("in"), &[("frag.txt", "H a\nH b\nH c\nX Y\n")]);

    nullnet_cmd(dir.path())
        .args(["analyze", "in", "-o", "out", "--seed", "4", "--top-k", "2"])
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("out/frag.txt")).expect("report");
    assert!(report.contains("Top 2 Closeness:\n\t(H, 0.6)\n"));
}

#[test]
fn analyze_missing_input_dir_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");

    nullnet_cmd(dir.path())
        .args(["analyze", "nope", "-o", "out", "--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input_dir_missing"));
}

// ---------------------------------------------------------------------------
// nullnet stats
// ---------------------------------------------------------------------------

#[test]
fn stats_json_output_has_expected_fields() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("g.txt"), "A B\nB C\nC A\nD E\n").expect("write");

    let output = nullnet_cmd(dir.path())
        .args(["stats", "g.txt", "--format", "json"])
        .output()
        .expect("stats should not crash");
    assert!(output.status.success());

    let stats: Value = serde_json::from_slice(&output.stdout).expect("stats JSON");
    assert_eq!(stats["node_count"], 5);
    assert_eq!(stats["edge_count"], 4);
    assert_eq!(stats["component_count"], 2);
    assert_eq!(stats["isolated_node_count"], 0);
    assert_eq!(stats["max_degree"], 2);
}

#[test]
fn stats_reports_parse_errors_with_line_number() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("g.txt"), "A B\nlonely\n").expect("write");

    nullnet_cmd(dir.path())
        .args(["stats", "g.txt", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]: parse error on line 2"));
}
