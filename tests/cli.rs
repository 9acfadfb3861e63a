//! End-to-end tests for the `trajview` binary.
//!
//! The TUI needs a terminal, so only its argument handling is covered here.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The binary, isolated from user and project configuration.
fn trajview(workdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("trajview"));
    cmd.current_dir(workdir.path())
        .env("XDG_CONFIG_HOME", workdir.path())
        .env("HOME", workdir.path())
        .env_remove("TRAJVIEW_ROOT")
        .env_remove("TRAJVIEW_CONFIG")
        .env_remove("TRAJVIEW_OUTPUT")
        .env_remove("TRAJVIEW_JSON")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn test_list_text_and_tsv() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .arg("list")
        .arg(fixture_path("trajs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Trajectory groups (3 found)"))
        .stdout(predicate::str::contains("(1 failed commands)"));

    trajview(&dir)
        .args(["-o", "tsv", "list"])
        .arg(fixture_path("trajs"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2\ttraj10\t0\t1\t1\t0\t0"));
}

#[test]
fn test_render_by_name_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .arg("render")
        .arg(fixture_path("trajs"))
        .args(["--name", "traj1", "--outcome", "failed", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("traj1 - Failed"))
        .stdout(predicate::str::contains("Exit code: 1"))
        .stdout(predicate::str::contains("traj1 - Success").not());
}

#[test]
fn test_render_to_file_infers_format() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("traj1.html");
    trajview(&dir)
        .arg("render")
        .arg(fixture_path("trajs"))
        .args(["--outcome", "all", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 3 steps"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_render_unknown_group_fails() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .arg("render")
        .arg(fixture_path("trajs"))
        .args(["--name", "traj99"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("traj99"));
}

#[test]
fn test_malformed_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir_all(root.join("traj1")).unwrap();
    std::fs::create_dir_all(root.join("notes")).unwrap();

    trajview(&dir)
        .arg("list")
        .arg(&root)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("notes"));
}

#[test]
fn test_demo_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = trajview(&dir)
        .arg("demo")
        .arg(fixture_path("eval.jsonl"))
        .args(["-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["title"], "eval.jsonl");
    assert_eq!(value["report"]["sections"][0]["steps"][1]["role"], "assistant");
}

#[test]
fn test_parse_stdin() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .args(["--json", "parse", "-"])
        .write_stdin("<think>hm</think>ok")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"reasoning\""))
        .stdout(predicate::str::contains("\"content\": \"ok\""));
}

#[test]
fn test_project_config_sets_root_and_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".trajview.toml"),
        format!(
            "[store]\nroot = {:?}\n[export]\nformat = \"text\"\n",
            fixture_path("trajs").display().to_string()
        ),
    )
    .unwrap();

    trajview(&dir)
        .args(["render", "--index", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TRAJ2").not())
        .stdout(predicate::str::contains("traj2\n====="));
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    trajview(&dir)
        .args(["--config"])
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    trajview(&dir)
        .args(["--config"])
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    trajview(&dir)
        .args(["--config"])
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[store]"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    trajview(&dir)
        .args(["--config", "nope.toml", "list"])
        .arg(fixture_path("trajs"))
        .assert()
        .code(5);
}
