//! Renderer input: parsed transcripts arranged into sections and steps.

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationRecord;
use crate::model::{Block, BlockSummary, Outcome, TrajectoryGroup};
use crate::parser;

/// One transcript, parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStep {
    /// Display heading, e.g. `Step 0`.
    pub heading: String,
    /// Unique anchor id within the report.
    pub anchor: String,
    /// Speaker label (evaluation records only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Source file name (trajectory transcripts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Parsed blocks.
    pub blocks: Vec<Block>,
}

/// A titled run of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section title, e.g. `Success`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Steps in display order.
    pub steps: Vec<ReportStep>,
}

/// A full document handed to an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Document title.
    pub title: String,
    /// Sections in display order.
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Build a report for one trajectory group.
    ///
    /// Each requested outcome becomes a section; each transcript a step.
    #[must_use]
    pub fn from_group(group: &TrajectoryGroup, outcomes: &[Outcome]) -> Self {
        let sections = outcomes
            .iter()
            .map(|&outcome| ReportSection {
                title: Some(outcome.label().to_string()),
                steps: group
                    .transcripts(outcome)
                    .iter()
                    .enumerate()
                    .map(|(i, transcript)| ReportStep {
                        heading: format!("Step {i}"),
                        anchor: format!("{}_step_{i}", outcome.dir_name()),
                        role: None,
                        source: Some(transcript.name.clone()),
                        blocks: parser::parse(&transcript.text),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: group.name.clone(),
            sections,
        }
    }

    /// Build a report for an evaluation file: one step per record.
    #[must_use]
    pub fn from_records(title: impl Into<String>, records: &[EvaluationRecord]) -> Self {
        let steps = records
            .iter()
            .enumerate()
            .map(|(i, record)| ReportStep {
                heading: format!("Step {i}"),
                anchor: format!("step_{i}"),
                role: Some(record.role.clone()),
                source: None,
                blocks: record.blocks(),
            })
            .collect();

        Self {
            title: title.into(),
            sections: vec![ReportSection { title: None, steps }],
        }
    }

    /// Build a single-step report from one transcript.
    #[must_use]
    pub fn from_transcript(title: impl Into<String>, text: &str) -> Self {
        let title = title.into();
        Self {
            sections: vec![ReportSection {
                title: None,
                steps: vec![ReportStep {
                    heading: title.clone(),
                    anchor: "step_0".to_string(),
                    role: None,
                    source: None,
                    blocks: parser::parse(text),
                }],
            }],
            title,
        }
    }

    /// All steps across sections, in order.
    pub fn steps(&self) -> impl Iterator<Item = &ReportStep> {
        self.sections.iter().flat_map(|s| s.steps.iter())
    }

    /// Number of steps across sections.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.sections.iter().map(|s| s.steps.len()).sum()
    }

    /// Block counts over the whole report.
    #[must_use]
    pub fn summary(&self) -> BlockSummary {
        let mut summary = BlockSummary::default();
        for step in self.steps() {
            summary.merge(&BlockSummary::from_blocks(&step.blocks));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transcript;

    fn group() -> TrajectoryGroup {
        TrajectoryGroup {
            name: "traj4".to_string(),
            index: 4,
            success: vec![
                Transcript::new("00.txt", "<think>a</think>"),
                Transcript::new("01.txt", "done"),
            ],
            failed: vec![Transcript::new("00.txt", "oops")],
        }
    }

    #[test]
    fn test_from_group_single_outcome() {
        let report = Report::from_group(&group(), &[Outcome::Success]);
        assert_eq!(report.title, "traj4");
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].title.as_deref(), Some("Success"));
        assert_eq!(report.step_count(), 2);
        let step = &report.sections[0].steps[1];
        assert_eq!(step.heading, "Step 1");
        assert_eq!(step.anchor, "success_step_1");
        assert_eq!(step.source.as_deref(), Some("01.txt"));
        assert_eq!(step.blocks, vec![Block::plain("done")]);
    }

    #[test]
    fn test_from_group_both_outcomes_have_unique_anchors() {
        let report = Report::from_group(&group(), &Outcome::ALL);
        let anchors: Vec<_> = report.steps().map(|s| s.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["success_step_0", "success_step_1", "failed_step_0"]);
    }

    #[test]
    fn test_from_records_labels_roles() {
        let records = vec![
            EvaluationRecord {
                role: "user".to_string(),
                content: "hi".to_string(),
            },
            EvaluationRecord {
                role: "assistant".to_string(),
                content: "<think>x</think>".to_string(),
            },
        ];
        let report = Report::from_records("demo", &records);
        let step = &report.sections[0].steps[1];
        assert_eq!(step.anchor, "step_1");
        assert_eq!(step.role.as_deref(), Some("assistant"));
        assert_eq!(report.summary().reasoning, 1);
    }
}
