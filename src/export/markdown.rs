//! Markdown export for parsed transcripts.
//!
//! Generates human-readable Markdown output, suitable for sharing a
//! trajectory in a pull request or issue. The same layout can be emitted as
//! plain text.

use std::io::Write;

use crate::error::Result;
use crate::model::{Block, CommandResult, FunctionCall, ParameterView};

use super::{edit_diff, ExportOptions, Exporter, Report, ReportStep};

/// Markdown exporter for reports.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    /// Use plain text output (no Markdown formatting).
    plain_text: bool,
    /// Include table of contents.
    include_toc: bool,
    /// Include the block summary header.
    include_header: bool,
    /// Reasoning longer than this is wrapped in `<details>`.
    reasoning_collapse_threshold: usize,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownExporter {
    /// Create a new Markdown exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plain_text: false,
            include_toc: false,
            include_header: true,
            reasoning_collapse_threshold: 2000,
        }
    }

    /// Enable plain text output (no Markdown formatting).
    #[must_use]
    pub fn plain_text(mut self, plain: bool) -> Self {
        self.plain_text = plain;
        self
    }

    /// Include table of contents.
    #[must_use]
    pub fn with_toc(mut self, include: bool) -> Self {
        self.include_toc = include;
        self
    }

    /// Include summary header.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Write the document title and block counts.
    fn write_header<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "{}", report.title)?;
            writeln!(writer, "{}", "=".repeat(report.title.chars().count().max(3)))?;
        } else {
            writeln!(writer, "# {}", report.title)?;
        }
        writeln!(writer)?;

        if !self.include_header {
            return Ok(());
        }

        let summary = report.summary();
        let bullet = if self.plain_text { "- " } else { "- **" };
        let close = if self.plain_text { ":" } else { ":**" };
        writeln!(writer, "{bullet}Steps{close} {}", report.step_count())?;
        writeln!(writer, "{bullet}Reasoning blocks{close} {}", summary.reasoning)?;
        writeln!(writer, "{bullet}Function calls{close} {}", summary.function_calls)?;
        writeln!(
            writer,
            "{bullet}Commands{close} {} ({} failed)",
            summary.command_results, summary.failed_commands
        )?;
        writeln!(writer)?;

        if !self.plain_text {
            writeln!(writer, "---")?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn write_toc<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        if !self.include_toc || self.plain_text {
            return Ok(());
        }
        writeln!(writer, "## Contents")?;
        writeln!(writer)?;
        for section in &report.sections {
            let indent = if let Some(title) = &section.title {
                writeln!(writer, "- {title}")?;
                "  "
            } else {
                ""
            };
            for step in &section.steps {
                writeln!(writer, "{indent}- [{}](#{})", step.heading, step.anchor)?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_step<W: Write>(
        &self,
        writer: &mut W,
        step: &ReportStep,
        options: &ExportOptions,
    ) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "{}", step.heading.to_uppercase())?;
            writeln!(writer, "{}", "-".repeat(step.heading.chars().count()))?;
        } else {
            writeln!(writer, "<a id=\"{}\"></a>", step.anchor)?;
            writeln!(writer)?;
            writeln!(writer, "### {}", step.heading)?;
        }
        writeln!(writer)?;

        if let Some(role) = &step.role {
            if self.plain_text {
                writeln!(writer, "{role}:")?;
            } else {
                writeln!(writer, "#### {role}:")?;
            }
            writeln!(writer)?;
        }
        if options.include_sources {
            if let Some(source) = &step.source {
                if self.plain_text {
                    writeln!(writer, "(source: {source})")?;
                } else {
                    writeln!(writer, "*Source: `{source}`*")?;
                }
                writeln!(writer)?;
            }
        }

        for block in step.blocks.iter().filter(|b| options.includes(b)) {
            self.write_block(writer, block, options)?;
        }

        if !self.plain_text {
            writeln!(writer, "---")?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn write_block<W: Write>(
        &self,
        writer: &mut W,
        block: &Block,
        options: &ExportOptions,
    ) -> Result<()> {
        match block {
            Block::PlainText(text) => {
                writeln!(writer, "{}", options.clip(&text.content))?;
                writeln!(writer)?;
            }
            Block::Reasoning(reasoning) => {
                self.write_reasoning(writer, &options.clip(&reasoning.content))?;
            }
            Block::FunctionCall(call) => self.write_function_call(writer, call, options)?,
            Block::CommandResult(result) => self.write_command_result(writer, result)?,
        }
        Ok(())
    }

    fn write_reasoning<W: Write>(&self, writer: &mut W, content: &str) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "[THINKING]")?;
            writeln!(writer, "{content}")?;
            writeln!(writer, "[/THINKING]")?;
        } else {
            let should_collapse = content.len() > self.reasoning_collapse_threshold;
            if should_collapse {
                writeln!(writer, "<details>")?;
                writeln!(
                    writer,
                    "<summary>Thinking ({} chars)</summary>",
                    content.chars().count()
                )?;
                writeln!(writer)?;
            } else {
                writeln!(writer, "**THINKING:**")?;
                writeln!(writer)?;
            }

            for line in content.lines() {
                if line.is_empty() {
                    writeln!(writer, ">")?;
                } else {
                    writeln!(writer, "> {line}")?;
                }
            }

            if should_collapse {
                writeln!(writer)?;
                writeln!(writer, "</details>")?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_function_call<W: Write>(
        &self,
        writer: &mut W,
        call: &FunctionCall,
        options: &ExportOptions,
    ) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "[CALLING FUNCTION: {}]", call.name)?;
        } else {
            writeln!(writer, "**CALLING FUNCTION:** `{}`", call.name)?;
        }
        writeln!(writer)?;

        if options.include_raw_segments {
            for segment in &call.raw_segments {
                self.write_code(writer, &options.clip(segment), "")?;
            }
        }

        for view in call.parameters.views() {
            match view {
                ParameterView::Paired { old, new } => {
                    self.write_labelled_code(writer, "old_str", &options.clip(old))?;
                    self.write_labelled_code(writer, "new_str", &options.clip(new))?;
                    if options.show_diff {
                        self.write_code(writer, &edit_diff(old, new), "diff")?;
                    }
                }
                ParameterView::Single { name, content } => {
                    self.write_labelled_code(writer, name, &options.clip(content))?;
                }
            }
        }

        if self.plain_text {
            writeln!(writer, "[/CALLING FUNCTION]")?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn write_labelled_code<W: Write>(&self, writer: &mut W, label: &str, content: &str) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "{label}:")?;
        } else {
            writeln!(writer, "**{label}**")?;
            writeln!(writer)?;
        }
        if content.is_empty() {
            writeln!(writer)?;
            return Ok(());
        }
        self.write_code(writer, content, "")
    }

    fn write_code<W: Write>(&self, writer: &mut W, content: &str, lang: &str) -> Result<()> {
        if self.plain_text {
            for line in content.lines() {
                writeln!(writer, "    {line}")?;
            }
        } else {
            let fence = code_fence(content);
            writeln!(writer, "{fence}{lang}")?;
            writeln!(writer, "{}", content.trim_end_matches('\n'))?;
            writeln!(writer, "{fence}")?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_command_result<W: Write>(&self, writer: &mut W, result: &CommandResult) -> Result<()> {
        if self.plain_text {
            writeln!(writer, "[COMMAND RESULT]")?;
            writeln!(writer, "Working directory: {}", result.working_directory)?;
            writeln!(writer, "Execution time: {}", result.execution_time)?;
            writeln!(writer, "Exit code: {}", result.exit_code)?;
            writeln!(writer, "[/COMMAND RESULT]")?;
        } else {
            writeln!(writer, "| Working Directory | Execution Time | Exit Code |")?;
            writeln!(writer, "|---|---|---|")?;
            writeln!(
                writer,
                "| {} | {} | {} |",
                table_cell(&result.working_directory),
                table_cell(&result.execution_time),
                table_cell(&result.exit_code)
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Exporter for MarkdownExporter {
    fn export_report<W: Write>(
        &self,
        report: &Report,
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        self.write_header(writer, report)?;
        self.write_toc(writer, report)?;

        for section in &report.sections {
            if let Some(title) = &section.title {
                if self.plain_text {
                    writeln!(writer, "{} - {title}", report.title)?;
                } else {
                    writeln!(writer, "## {} - {title}", report.title)?;
                }
                writeln!(writer)?;
                if section.steps.is_empty() {
                    writeln!(writer, "(no transcripts)")?;
                    writeln!(writer)?;
                }
            }
            for step in &section.steps {
                self.write_step(writer, step, options)?;
            }
        }
        Ok(())
    }
}

/// A backtick fence longer than any backtick run inside `content`.
fn code_fence(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Escape a value for a single Markdown table cell.
fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
