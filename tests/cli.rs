//! CLI-level tests driving the compiled binary against synthetic bundles.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_bundle(root: &Path) {
    let ns = root.join("kubernetes/viya");
    fs::create_dir_all(ns.join("get")).unwrap();
    fs::create_dir_all(ns.join("logs")).unwrap();

    fs::write(
        ns.join("get/pods.txt"),
        "NAME       READY  STATUS            RESTARTS  AGE  IP         NODE\n\
         worker-1   0/1    CrashLoopBackOff  5         10m  10.0.0.5   node-a\n\
         web-1      1/1    Running           0         5m   10.0.0.6   node-b\n",
    )
    .unwrap();

    fs::write(
        ns.join("logs/worker-1_cas.log"),
        "{\"message\":\"no ready CAS servers\",\"timeStamp\":\"2024-01-01T00:00:01\"}\n",
    )
    .unwrap();
    fs::write(
        ns.join("logs/web-1_web.log"),
        "2024-01-01T00:00:00 Unauthorized access to endpoint\n",
    )
    .unwrap();
}

fn cmd() -> Command {
    Command::cargo_bin("pod-triage").unwrap()
}

#[test]
fn namespaces_lists_snapshot_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    cmd()
        .arg("namespaces")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("- viya"));
}

#[test]
fn namespaces_fails_on_a_bundle_without_kubernetes_folder() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .arg("namespaces")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bundle layout error"));
}

#[test]
fn triage_json_reports_classification_and_summaries() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let assert = cmd()
        .current_dir(dir.path())
        .args(["triage", ".", "--namespace", "viya", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Crashed\""))
        .stdout(predicate::str::contains("CAS Control Issues"))
        .stdout(predicate::str::contains("Authentication Failures"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["namespace"], "viya");
    assert_eq!(value["pods_with_errors"][0]["name"], "worker-1");
    assert_eq!(value["pods_without_errors"][0]["name"], "web-1");
}

#[test]
fn triage_writes_the_all_errors_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["triage", ".", "--namespace", "viya", "--no-report-file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pod Name: worker-1"))
        .stdout(predicate::str::contains("Status: Crashed"));

    let artifact = dir.path().join("output/all_errors.json");
    let content = fs::read_to_string(artifact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entries = value["worker-1"].as_array().unwrap();
    assert!(entries.iter().any(|e| {
        e.as_str()
            .is_some_and(|s| s.contains("[CAS Control Issues]"))
    }));
}

#[test]
fn patterns_validate_accepts_a_good_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("patterns.json");
    fs::write(&file, r#"{"Crashed": ["CrashLoopBackOff"]}"#).unwrap();

    cmd()
        .args(["patterns", "validate"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 categories with 1 patterns"));
}

#[test]
fn patterns_validate_rejects_malformed_types() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("patterns.json");
    fs::write(&file, r#"{"Bad": [1]}"#).unwrap();

    cmd()
        .args(["patterns", "validate"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pattern file"));
}

#[test]
fn patterns_export_round_trips_through_validate() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exported.json");

    cmd()
        .args(["patterns", "export"])
        .arg(&file)
        .assert()
        .success();

    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("CAS Control Issues"));

    cmd()
        .args(["patterns", "validate"])
        .arg(&file)
        .assert()
        .success();
}
