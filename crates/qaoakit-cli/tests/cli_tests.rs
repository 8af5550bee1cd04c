//! End-to-end tests for the `qaoakit` binary.
//!
//! Each test runs the built binary and checks its output and exit status.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn qaoakit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_qaoakit"))
        .args(args)
        .env_remove("QAOAKIT_SEED")
        .output()
        .expect("failed to run qaoakit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// ring
// ============================================================================

#[test]
fn test_ring_text() {
    let out = qaoakit(&["ring", "-n", "3"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("Hamiltonian (3 terms, 3 qubits):"));
}

#[test]
fn test_ring_json() {
    let out = qaoakit(&["--format", "json", "ring", "-n", "4"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["terms"].as_array().unwrap().len(), 4);
}

#[test]
fn test_ring_zero_fails() {
    let out = qaoakit(&["ring", "-n", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error:"));
}

// ============================================================================
// random
// ============================================================================

#[test]
fn test_random_is_seeded() {
    let a = qaoakit(&["random", "-n", "6", "--seed", "11", "-f", "json"]);
    let b = qaoakit(&["random", "-n", "6", "--seed", "11", "-f", "json"]);
    assert!(a.status.success(), "{}", stderr(&a));
    assert_eq!(stdout(&a), stdout(&b));
}

#[test]
fn test_random_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("h.yaml");
    let out = qaoakit(&[
        "random",
        "-n",
        "4",
        "-s",
        "2",
        "-f",
        "yaml",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).is_empty());
    assert!(fs::read_to_string(&path).unwrap().contains("terms"));
}

// ============================================================================
// graph
// ============================================================================

fn write_ring(dir: &Path, n: &str) -> String {
    let path = dir.join("ring.json");
    let out = qaoakit(&["-f", "json", "-o", path.to_str().unwrap(), "ring", "-n", n]);
    assert!(out.status.success(), "{}", stderr(&out));
    path.to_str().unwrap().to_string()
}

#[test]
fn test_graph_from_file() {
    let dir = TempDir::new().unwrap();
    let input = write_ring(dir.path(), "5");
    let dot = dir.path().join("ring.dot");

    let out = qaoakit(&["graph", "-i", &input, "--dot", dot.to_str().unwrap()]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).starts_with("Graph (5 nodes, 5 edges):"));

    let dot_text = fs::read_to_string(&dot).unwrap();
    assert!(dot_text.starts_with("graph {"));
    assert!(dot_text.contains("0.5000"));
}

#[test]
fn test_graph_json_report() {
    let dir = TempDir::new().unwrap();
    let input = write_ring(dir.path(), "3");

    let out = qaoakit(&["graph", "-i", &input, "-f", "json"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(value["hyperparams"]["couplings"].as_array().unwrap().len(), 3);
}

#[test]
fn test_graph_missing_file() {
    let out = qaoakit(&["graph", "-i", "/nonexistent/h.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("File not found"));
}

// ============================================================================
// experiment
// ============================================================================

#[test]
fn test_experiment_yaml() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("exp.yaml");
    fs::write(
        &config,
        "seed: 1\nmetric: cityblock\nclusters:\n  - mean: [0.0, 0.0]\n    points: 2\n  - mean: [3.0, 3.0]\n    points: 2\nbiases: {0: 1.5}\n",
    )
    .unwrap();

    let out = qaoakit(&["experiment", "-c", config.to_str().unwrap()]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Experiment (seed 1, metric cityblock):"));
    assert!(text.contains("Hamiltonian (7 terms, 4 qubits):"));
    assert!(text.contains("1  cluster 1 (2 points)"));
}

#[test]
fn test_experiment_rejects_list_biases() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("exp.json");
    fs::write(
        &config,
        r#"{"clusters": [{"mean": [0, 0], "points": 2}], "biases": [1.0, 2.0]}"#,
    )
    .unwrap();

    let out = qaoakit(&["experiment", "-c", config.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("biases must be a mapping"));
}

// ============================================================================
// prepare
// ============================================================================

#[test]
fn test_prepare_program() {
    let out = qaoakit(&["prepare", "--state", "101"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("x q0"));
    assert!(text.contains("x q2"));
    assert!(!text.contains("x q1"));
}

#[test]
fn test_prepare_invalid_bits() {
    let out = qaoakit(&["prepare", "--state", "12"]);
    assert_eq!(out.status.code(), Some(1));
}

// ============================================================================
// argument parsing
// ============================================================================

#[test]
fn test_no_subcommand() {
    let out = qaoakit(&[]);
    assert!(!out.status.success());
}

#[test]
fn test_unknown_format() {
    let out = qaoakit(&["--format", "xml", "ring", "-n", "3"]);
    assert!(!out.status.success());
}
