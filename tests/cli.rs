//! End-to-end tests of the `asmeval` binary against a scratch harness root.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Harness root with the given datasets and a bin/ holding fake assemblers.
/// Both get the dataset path as their last argument.
fn harness(datasets: &[&str], python: &str, codon: &str) -> TempDir {
    let root = tempdir().unwrap();
    for dataset in datasets {
        fs::create_dir_all(root.path().join("data").join(dataset)).unwrap();
    }
    let bin = root.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    write_script(&bin.join("python3"), python);
    write_script(&bin.join("codon"), codon);
    root
}

fn asmeval(root: &Path) -> Command {
    let path = format!(
        "{}:{}",
        root.join("bin").display(),
        std::env::var("PATH").unwrap_or_default()
    );
    let mut cmd = Command::cargo_bin("asmeval").unwrap();
    cmd.current_dir(root).env("PATH", path).env_remove("GITHUB_ACTIONS");
    cmd
}

#[test]
fn test_report_with_success_and_failure() {
    let root = harness(
        &["data1"],
        r#"for last; do :; done; printf '>c1\nACGTACGTAC\n>c2\nACG\n' > "$last/contig.fasta""#,
        "echo 'codon exploded' >&2; exit 1",
    );

    asmeval(root.path())
        .args(["--dataset", "data1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Dataset\tLanguage\tRuntime\t\tN50\n"))
        .stdout(predicate::str::is_match(r"data1\tpython\t\t0:00:0\d\t\t10\n").unwrap())
        // codon failed, but python's contig.fasta was left behind and gets staged for it
        .stdout(predicate::str::contains("data1\tcodon\t\tERROR\t\t10\n"))
        .stderr(predicate::str::contains("codon exploded"));

    let dataset = root.path().join("data/data1");
    assert!(dataset.join("contig_python.fasta").exists());
    assert!(dataset.join("contig_codon.fasta").exists());
}

#[test]
fn test_child_stdout_stays_out_of_report_and_env_is_inherited() {
    let root = harness(
        &["data1"],
        r#"echo "python chatter"; printf '%s' "$ASMEVAL_TEST_INHERITED" > env_python.txt"#,
        r#"echo "codon chatter"; printf '%s' "$ASMEVAL_TEST_INHERITED" > env_codon.txt"#,
    );

    let assert = asmeval(root.path())
        .args(["--dataset", "data1"])
        .env("ASMEVAL_TEST_INHERITED", "from-harness")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "unexpected report:\n{}", stdout);
    assert_eq!(lines[0], "Dataset\tLanguage\tRuntime\t\tN50");
    assert_eq!(lines[1], "-".repeat(70));
    assert!(lines[2].starts_with("data1\tpython\t\t0:00:0"));
    assert!(lines[2].ends_with("\t\t0"));
    assert!(lines[3].starts_with("data1\tcodon\t\t0:00:0"));
    assert!(lines[3].ends_with("\t\t0"));
    assert!(!stdout.contains("chatter"));

    // Children run from the harness root with the harness environment
    for label in ["python", "codon"] {
        let seen = fs::read_to_string(root.path().join(format!("env_{}.txt", label))).unwrap();
        assert_eq!(seen, "from-harness");
    }
}

#[test]
fn test_fresh_drops_inherited_output() {
    let root = harness(
        &["data1"],
        r#"for last; do :; done; printf '>c1\nACGTACGTAC\n' > "$last/contig.fasta""#,
        "exit 1",
    );

    asmeval(root.path())
        .args(["run", "--dataset", "data1", "--fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data1\tcodon\t\tERROR\t\t0\n"));
}

#[test]
fn test_missing_datasets_are_skipped() {
    let root = harness(&["data2"], "exit 0", "exit 0");

    asmeval(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("data1").not())
        .stdout(predicate::str::contains("data2\tpython"))
        .stdout(predicate::str::contains("data2\tcodon"))
        .stderr(predicate::str::contains("Dataset data1 not found"));
}

#[test]
fn test_json_report() {
    let root = harness(&["data3"], "exit 0", "exit 0");
    let json = root.path().join("results.json");

    asmeval(root.path())
        .args(["run", "-d", "data3", "-i", "python", "--json"])
        .arg(&json)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["dataset"], "data3");
    assert_eq!(records[0]["language"], "python");
    assert_eq!(records[0]["n50"], 0);
    assert!(records[0]["runtime_secs"].is_f64());
}

#[test]
fn test_stats_subcommand() {
    let dir = tempdir().unwrap();
    let fasta = dir.path().join("contigs.fa");
    fs::write(&fasta, ">a\nACGTACGTACGTACGTACGT\n>b\nACGTACGTACGTACGTACGTACGT\n>c\nACGT\n").unwrap();

    Command::cargo_bin("asmeval")
        .unwrap()
        .arg("stats")
        .arg(&fasta)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contigs: 3"))
        .stdout(predicate::str::contains("N50: 24"));

    Command::cargo_bin("asmeval")
        .unwrap()
        .args(["stats", "--format", "json"])
        .arg(&fasta)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"n50\": 24"));
}

#[test]
fn test_stats_missing_input_fails() {
    Command::cargo_bin("asmeval")
        .unwrap()
        .args(["stats", "/nonexistent/contigs.fa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
