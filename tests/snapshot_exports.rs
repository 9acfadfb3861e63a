//! Snapshot tests for export formats using insta.
//!
//! These tests verify that export output remains consistent across changes.
//! Run `cargo insta review` to update snapshots after intentional changes.

use std::path::PathBuf;

use insta::assert_snapshot;
use trajview::evaluation;
use trajview::export::{export_to_string, ExportFormat, ExportOptions, Report};
use trajview::model::Outcome;
use trajview::store::TrajectoryStore;

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn traj1(outcomes: &[Outcome]) -> Report {
    let store = TrajectoryStore::load(fixture_path("trajs")).expect("fixture store loads");
    Report::from_group(store.get(0).expect("traj1 exists"), outcomes)
}

fn eval_report() -> Report {
    let records = evaluation::load(fixture_path("eval.jsonl")).expect("fixture evaluation loads");
    Report::from_records("eval.jsonl", &records)
}

// =============================================================================
// Text Export Snapshots
// =============================================================================

#[test]
fn text_traj1_all_outcomes() {
    let output =
        export_to_string(&traj1(&Outcome::ALL), ExportFormat::Text, &ExportOptions::default())
            .expect("export succeeds");
    assert_snapshot!(output);
}

// =============================================================================
// Markdown Export Snapshots
// =============================================================================

#[test]
fn markdown_evaluation() {
    let output = export_to_string(&eval_report(), ExportFormat::Markdown, &ExportOptions::default())
        .expect("export succeeds");
    assert_snapshot!(output);
}

#[test]
fn markdown_failed_only_without_reasoning() {
    let options = ExportOptions::default().with_reasoning(false);
    let output = export_to_string(&traj1(&[Outcome::Failed]), ExportFormat::Markdown, &options)
        .expect("export succeeds");
    assert_snapshot!(output);
}
