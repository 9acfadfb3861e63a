//! JSON export of parsed blocks.
//!
//! Emits the report as structured data for programmatic processing. Blocks
//! keep the internally tagged shape of [`Block`](crate::model::Block)
//! (`"type": "function_call"` etc.), so the output can be deserialized back
//! into a [`Report`].

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::BlockSummary;

use super::{ExportOptions, Exporter, Report, ReportSection, ReportStep};

/// JSON exporter for reports.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    /// Pretty-print the JSON output.
    pretty: bool,
    /// Wrap the report in an envelope with generator metadata.
    use_envelope: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonExporter {
    /// Create a new JSON exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pretty: false,
            use_envelope: true,
        }
    }

    /// Enable pretty-printing.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Use envelope wrapper.
    #[must_use]
    pub fn with_envelope(mut self, use_envelope: bool) -> Self {
        self.use_envelope = use_envelope;
        self
    }

    fn write_json<W: Write, T: Serialize>(&self, writer: &mut W, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// Envelope around an exported report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    /// Tool that produced the file.
    pub generator: String,
    /// Version of the tool.
    pub version: String,
    /// Block counts over the exported steps.
    pub summary: BlockSummary,
    /// The report itself.
    pub report: Report,
}

impl Exporter for JsonExporter {
    fn export_report<W: Write>(
        &self,
        report: &Report,
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        let filtered = filter_report(report, options);

        if self.use_envelope {
            let envelope = ExportEnvelope {
                generator: crate::NAME.to_string(),
                version: crate::VERSION.to_string(),
                summary: filtered.summary(),
                report: filtered,
            };
            self.write_json(writer, &envelope)
        } else {
            self.write_json(writer, &filtered)
        }
    }
}

/// Copy of `report` with excluded blocks dropped and text clipped.
fn filter_report(report: &Report, options: &ExportOptions) -> Report {
    use crate::model::Block;

    let clip_block = |block: &Block| -> Block {
        let mut block = block.clone();
        match &mut block {
            Block::PlainText(t) => t.content = options.clip(&t.content).into_owned(),
            Block::Reasoning(r) => r.content = options.clip(&r.content).into_owned(),
            Block::FunctionCall(call) if !options.include_raw_segments => {
                call.raw_segments.clear();
            }
            _ => {}
        }
        block
    };

    Report {
        title: report.title.clone(),
        sections: report
            .sections
            .iter()
            .map(|section| ReportSection {
                title: section.title.clone(),
                steps: section
                    .steps
                    .iter()
                    .map(|step| ReportStep {
                        heading: step.heading.clone(),
                        anchor: step.anchor.clone(),
                        role: step.role.clone(),
                        source: step.source.clone().filter(|_| options.include_sources),
                        blocks: step
                            .blocks
                            .iter()
                            .filter(|b| options.includes(b))
                            .map(clip_block)
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn export(exporter: &JsonExporter, report: &Report, options: &ExportOptions) -> Value {
        let mut output = Vec::new();
        exporter.export_report(report, &mut output, options).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_envelope_fields() {
        let report = Report::from_transcript("t", "<think>x</think>done");
        let value = export(&JsonExporter::new(), &report, &ExportOptions::default());

        assert_eq!(value["generator"], crate::NAME);
        assert_eq!(value["summary"]["reasoning"], 1);
        let blocks = &value["report"]["sections"][0]["steps"][0]["blocks"];
        assert_eq!(blocks[0]["type"], "reasoning");
        assert_eq!(blocks[1]["type"], "plain_text");
        assert_eq!(blocks[1]["content"], "done");
    }

    #[test]
    fn test_without_envelope_round_trips() {
        let report = Report::from_transcript(
            "t",
            "<function=edit><parameter=old_str>a</parameter><parameter=new_str>b</parameter></function>",
        );
        let mut output = Vec::new();
        JsonExporter::new()
            .with_envelope(false)
            .pretty(true)
            .export_report(&report, &mut output, &ExportOptions::default())
            .unwrap();

        let back: Report = serde_json::from_slice(&output).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_options_filter_output() {
        let report = Report::from_transcript("t", "<think>hidden</think><function=f>raw</function>");
        let options = ExportOptions {
            include_reasoning: false,
            include_raw_segments: false,
            ..ExportOptions::default()
        };
        let value = export(&JsonExporter::new(), &report, &options);

        let blocks = value["report"]["sections"][0]["steps"][0]["blocks"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["type"], "function_call");
        assert!(blocks[0].get("raw_segments").is_none());
    }
}
