//! Export functionality for parsed transcripts.
//!
//! This module provides various export formats:
//! - Markdown: Human-readable report with fenced code and tables
//! - Text: The Markdown layout without Markdown syntax
//! - HTML: Standalone page with collapsible reasoning and side-by-side edits
//! - JSON: Structured block data
//!
//! Every exporter consumes a [`Report`] and writes to any [`Write`] sink.

mod html;
mod json;
mod markdown;
mod report;

pub use html::*;
pub use json::*;
pub use markdown::*;
pub use report::*;

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use similar::TextDiff;
use tracing::{debug, instrument};

use crate::error::{Result, ViewerError};
use crate::model::Block;
use crate::util::AtomicFile;

/// Common export options shared across formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Include reasoning blocks.
    pub include_reasoning: bool,
    /// Include function calls.
    pub include_function_calls: bool,
    /// Include command results.
    pub include_command_results: bool,
    /// Include untagged text found inside function bodies.
    pub include_raw_segments: bool,
    /// Show the source file name of each step.
    pub include_sources: bool,
    /// Append a unified diff under `old_str`/`new_str` pairs.
    pub show_diff: bool,
    /// Truncate long text at this many characters.
    pub truncate_at: Option<usize>,
    /// HTML only: use the dark palette.
    pub dark_theme: bool,
    /// HTML only: start reasoning panels collapsed.
    pub collapse_reasoning: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_reasoning: true,
            include_function_calls: true,
            include_command_results: true,
            include_raw_segments: true,
            include_sources: true,
            show_diff: false,
            truncate_at: None,
            dark_theme: false,
            collapse_reasoning: false,
        }
    }
}

impl ExportOptions {
    /// Create options for minimal export (plain text only).
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            include_reasoning: false,
            include_function_calls: false,
            include_command_results: false,
            include_raw_segments: false,
            include_sources: false,
            show_diff: false,
            truncate_at: None,
            dark_theme: false,
            collapse_reasoning: false,
        }
    }

    /// Builder: include reasoning blocks.
    #[must_use]
    pub fn with_reasoning(mut self, include: bool) -> Self {
        self.include_reasoning = include;
        self
    }

    /// Builder: show diffs for edit pairs.
    #[must_use]
    pub fn with_diff(mut self, show: bool) -> Self {
        self.show_diff = show;
        self
    }

    /// Builder: truncate long text.
    #[must_use]
    pub fn with_truncation(mut self, limit: Option<usize>) -> Self {
        self.truncate_at = limit;
        self
    }

    /// Check whether a block should be exported.
    #[must_use]
    pub fn includes(&self, block: &Block) -> bool {
        match block {
            Block::PlainText(_) => true,
            Block::Reasoning(_) => self.include_reasoning,
            Block::FunctionCall(_) => self.include_function_calls,
            Block::CommandResult(_) => self.include_command_results,
        }
    }

    /// Apply the truncation limit to a piece of text.
    #[must_use]
    pub fn clip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.truncate_at {
            Some(limit) => truncate(text, limit),
            None => Cow::Borrowed(text),
        }
    }
}

/// Export format specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown format.
    Markdown,
    /// Plain text.
    Text,
    /// HTML formatted output.
    Html,
    /// JSON format.
    Json,
    /// Pretty-printed JSON.
    JsonPretty,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
            Self::Html => "html",
            Self::Json | Self::JsonPretty => "json",
        }
    }

    /// Parse format from string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Some(Self::Markdown),
            "text" | "txt" => Some(Self::Text),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            "json-pretty" | "jsonpretty" => Some(Self::JsonPretty),
            _ => None,
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export a report to the writer.
    fn export_report<W: Write>(
        &self,
        report: &Report,
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()>;
}

/// Export a report with the default exporter for `format`.
pub fn export_to_writer<W: Write>(
    report: &Report,
    format: ExportFormat,
    writer: &mut W,
    options: &ExportOptions,
) -> Result<()> {
    match format {
        ExportFormat::Markdown => MarkdownExporter::new().export_report(report, writer, options),
        ExportFormat::Text => MarkdownExporter::new()
            .plain_text(true)
            .export_report(report, writer, options),
        ExportFormat::Html => HtmlExporter::new()
            .dark_theme(options.dark_theme)
            .collapse_reasoning(options.collapse_reasoning)
            .export_report(report, writer, options),
        ExportFormat::Json => JsonExporter::new().export_report(report, writer, options),
        ExportFormat::JsonPretty => JsonExporter::new()
            .pretty(true)
            .export_report(report, writer, options),
    }
}

/// Export a report to a string.
pub fn export_to_string(
    report: &Report,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String> {
    let mut buffer = Vec::new();
    export_to_writer(report, format, &mut buffer, options)?;
    String::from_utf8(buffer)
        .map_err(|e| ViewerError::export(format!("Exporter produced invalid UTF-8: {e}")))
}

/// Export a report to a file.
///
/// Content is written to a temporary file first, then atomically renamed to
/// the target path.
#[instrument(skip(report, options), fields(path = %path.display()))]
pub fn export_to_file(
    report: &Report,
    path: &Path,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<()> {
    let mut atomic = AtomicFile::create(path)?;
    {
        let mut writer = std::io::BufWriter::new(atomic.writer());
        export_to_writer(report, format, &mut writer, options)?;
        writer.flush().map_err(|e| {
            ViewerError::io(format!("Failed to flush output file: {}", path.display()), e)
        })?;
    }
    atomic.finish()?;
    debug!(?format, "Exported report");
    Ok(())
}

/// Truncate `text` to `limit` characters, noting how much was cut.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> Cow<'_, str> {
    let total = text.chars().count();
    if total <= limit {
        return Cow::Borrowed(text);
    }
    let kept: String = text.chars().take(limit).collect();
    Cow::Owned(format!("{kept}… [truncated {} chars]", total - limit))
}

/// Unified line diff between the two halves of an edit.
#[must_use]
pub fn edit_diff(old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .missing_newline_hint(false)
        .header("old_str", "new_str")
        .to_string()
}
