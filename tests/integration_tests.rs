//! Integration tests for trajview.
//!
//! These tests run the full load, parse and export pipeline against the
//! fixture tree under `tests/fixtures`.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use trajview::evaluation;
use trajview::export::{export_to_file, export_to_string, ExportFormat, ExportOptions, Report};
use trajview::model::{Block, Outcome, ParameterView};
use trajview::store::{Direction, NavigationState, TrajectoryStore};
use trajview::ViewerError;

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn store() -> TrajectoryStore {
    TrajectoryStore::load(fixture_path("trajs")).expect("fixture store loads")
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_groups_in_numeric_order() {
    let store = store();
    let names: Vec<_> = store.groups().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["traj1", "traj2", "traj10"]);

    let traj1 = store.get(0).unwrap();
    assert_eq!(traj1.success.len(), 2);
    assert_eq!(traj1.failed.len(), 1);
    assert_eq!(traj1.success[0].name, "step_a.txt");
}

#[test]
fn test_navigation_wraps_both_ways() {
    let store = store();
    let start = NavigationState::default();

    let back = store.navigate(start, Direction::Previous);
    assert_eq!(store.current(back).unwrap().name, "traj10");

    let mut state = start;
    for _ in 0..store.len() {
        state = store.navigate(state, Direction::Next);
    }
    assert_eq!(state, start);
}

#[test]
fn test_missing_outcome_directory_is_empty() {
    let store = store();
    let traj10 = &store.groups()[2];
    assert!(traj10.transcripts(Outcome::Success).is_empty());
    assert_eq!(traj10.transcripts(Outcome::Failed).len(), 1);
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_edit_transcript_blocks() {
    let store = store();
    let report = Report::from_group(store.get(0).unwrap(), &[Outcome::Success]);
    let step = report.steps().next().unwrap();

    assert_eq!(step.blocks.len(), 3);
    assert_eq!(step.blocks[0].as_text(), Some("I'll inspect the failing test first."));
    assert!(matches!(step.blocks[1], Block::Reasoning(_)));

    let call = step.blocks[2].as_function_call().unwrap();
    assert_eq!(call.name, "str_replace_editor");
    assert!(call.raw_segments.is_empty());
    let views = call.parameters.views();
    assert_eq!(
        views[0],
        ParameterView::Paired {
            old: "return a + b",
            new: "return a - b"
        }
    );
    assert_eq!(views.len(), 3);
}

#[test]
fn test_failed_command_counted() {
    let store = store();
    let report = Report::from_group(store.get(0).unwrap(), &Outcome::ALL);
    let summary = report.summary();

    assert_eq!(report.step_count(), 3);
    assert_eq!(summary.function_calls, 3);
    assert_eq!(summary.command_results, 2);
    assert_eq!(summary.failed_commands, 1);
}

// =============================================================================
// Evaluation Tests
// =============================================================================

#[test]
fn test_evaluation_jsonl_and_array() {
    let lines = evaluation::load(fixture_path("eval.jsonl")).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].role, "assistant");

    let array = evaluation::load(fixture_path("eval.json")).unwrap();
    assert_eq!(array.len(), 2);
    let result = array[1].blocks();
    assert_eq!(result[0].as_command_result().unwrap().exit_code, "2");
}

#[test]
fn test_evaluation_missing_file() {
    let err = evaluation::load(fixture_path("nope.jsonl")).unwrap_err();
    assert!(matches!(err, ViewerError::FileNotFound { .. }));
}

#[test]
fn test_evaluation_bad_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"role\": \"user\"").unwrap();

    match evaluation::load(&path).unwrap_err() {
        ViewerError::Format { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_every_format_exports_a_group() {
    let store = store();
    let report = Report::from_group(store.get(0).unwrap(), &Outcome::ALL);
    let options = ExportOptions::default();

    for format in [
        ExportFormat::Markdown,
        ExportFormat::Text,
        ExportFormat::Html,
        ExportFormat::Json,
        ExportFormat::JsonPretty,
    ] {
        let output = export_to_string(&report, format, &options).unwrap();
        assert!(output.contains("pytest -q"), "{format:?} lost a parameter");
    }
}

#[test]
fn test_html_is_standalone_and_escaped() {
    let store = store();
    let report = Report::from_group(store.get(0).unwrap(), &Outcome::ALL);
    let html = export_to_string(&report, ExportFormat::Html, &ExportOptions::default()).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"success_step_0\""));
    assert!(html.contains("id=\"failed_step_0\""));
    assert!(html.contains("No module named &#39;calc&#39;"));
    assert!(!html.contains("<script src="));
}

#[test]
fn test_export_to_file_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traj1.json");
    let records = evaluation::load(fixture_path("eval.jsonl")).unwrap();
    let report = Report::from_records("eval", &records);

    export_to_file(&report, &path, ExportFormat::Json, &ExportOptions::default()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["report"]["title"], "eval");
    assert_eq!(value["summary"]["function_calls"], 1);
}
