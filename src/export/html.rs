//! HTML export for parsed transcripts.
//!
//! Generates a standalone HTML document (inline CSS, no external assets) that
//! lays a trajectory out the way a reviewer reads it: reasoning in a
//! collapsible panel, edits side by side, command results as a small table.

use std::io::Write;

use crate::error::Result;
use crate::model::{Block, CommandResult, FunctionCall, ParameterView};

use super::{edit_diff, ExportOptions, Exporter, Report, ReportStep};

/// HTML exporter for reports.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    /// Document title override.
    title: Option<String>,
    /// Include the block summary header.
    include_header: bool,
    /// Use dark theme.
    dark_theme: bool,
    /// Start reasoning panels collapsed.
    collapse_reasoning: bool,
    /// Include the navigation sidebar.
    include_toc: bool,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExporter {
    /// Create a new HTML exporter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            include_header: true,
            dark_theme: false,
            collapse_reasoning: false,
            include_toc: true,
        }
    }

    /// Set document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Include summary header.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Use dark theme.
    #[must_use]
    pub fn dark_theme(mut self, dark: bool) -> Self {
        self.dark_theme = dark;
        self
    }

    /// Start reasoning panels collapsed.
    #[must_use]
    pub fn collapse_reasoning(mut self, collapse: bool) -> Self {
        self.collapse_reasoning = collapse;
        self
    }

    /// Include the navigation sidebar.
    #[must_use]
    pub fn with_toc(mut self, include: bool) -> Self {
        self.include_toc = include;
        self
    }

    fn write_document_start<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        let title = self.title.as_deref().unwrap_or(&report.title);
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"en\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta charset=\"UTF-8\">")?;
        writeln!(
            writer,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(
            writer,
            "  <meta name=\"generator\" content=\"{} {}\">",
            crate::NAME,
            crate::VERSION
        )?;
        writeln!(writer, "  <title>{}</title>", escape_html(title))?;
        self.write_styles(writer)?;
        writeln!(writer, "</head>")?;

        let body_class = if self.dark_theme { "dark" } else { "light" };
        let has_toc = if self.include_toc { " has-toc" } else { "" };
        writeln!(writer, "<body class=\"{body_class}{has_toc}\">")?;

        if self.include_toc {
            writeln!(writer, "<div class=\"layout-wrapper\">")?;
            self.write_toc(writer, report)?;
        }
        writeln!(writer, "<main class=\"report\">")?;
        writeln!(writer, "<h1>{}</h1>", escape_html(title))?;
        Ok(())
    }

    /// Sidebar listing every step anchor.
    fn write_toc<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        writeln!(writer, "<nav class=\"toc\" id=\"toc\">")?;
        writeln!(writer, "  <div class=\"toc-header\">Navigation</div>")?;
        writeln!(writer, "  <ul class=\"toc-list\">")?;
        for section in &report.sections {
            if let Some(title) = &section.title {
                writeln!(
                    writer,
                    "    <li class=\"toc-section\">{}</li>",
                    escape_html(title)
                )?;
            }
            for step in &section.steps {
                write!(
                    writer,
                    "    <li class=\"toc-item\"><a class=\"toc-link\" href=\"#{}\">{}",
                    escape_html(&step.anchor),
                    escape_html(&step.heading)
                )?;
                if let Some(role) = &step.role {
                    write!(writer, " <span class=\"toc-role\">{}</span>", escape_html(role))?;
                }
                writeln!(writer, "</a></li>")?;
            }
        }
        writeln!(writer, "  </ul>")?;
        writeln!(writer, "</nav>")?;
        Ok(())
    }

    fn write_styles<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "  <style>")?;
        writeln!(
            writer,
            r#"
    :root {{
      --bg-color: #ffffff;
      --text-color: #1a1a1a;
      --panel-bg: #f5f5f5;
      --reasoning-bg: #e8f4fd;
      --border-color: #dee2e6;
      --code-bg: #f4f4f4;
      --accent-color: #0066cc;
      --ok-color: #1a7f37;
      --fail-color: #cf222e;
    }}

    .dark {{
      --bg-color: #1a1a1a;
      --text-color: #e0e0e0;
      --panel-bg: #2d2d2d;
      --reasoning-bg: #1e3a5f;
      --border-color: #404040;
      --code-bg: #2d2d2d;
      --accent-color: #4da6ff;
      --ok-color: #3fb950;
      --fail-color: #f85149;
    }}

    * {{ box-sizing: border-box; }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      line-height: 1.6;
      margin: 0;
      padding: 20px;
      background-color: var(--bg-color);
      color: var(--text-color);
    }}

    .report {{ max-width: 1100px; margin: 0 auto; }}

    .summary {{
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 10px;
      margin-bottom: 30px;
    }}

    .stat-item {{ background: var(--panel-bg); padding: 10px 15px; border-radius: 6px; }}
    .stat-label {{ font-size: 0.8em; opacity: 0.7; }}
    .stat-value {{ font-size: 1.2em; font-weight: 600; }}

    .step {{ border-bottom: 1px solid var(--border-color); padding-bottom: 16px; margin-bottom: 24px; }}
    .step-meta {{ font-size: 0.85em; opacity: 0.7; }}
    .plain-text {{ white-space: pre-wrap; word-wrap: break-word; }}

    .reasoning {{
      background-color: var(--reasoning-bg);
      border-radius: 6px;
      margin: 12px 0;
    }}

    .reasoning-header {{ padding: 8px 15px; cursor: pointer; font-weight: 600; }}
    .reasoning-body {{ padding: 0 15px 12px; white-space: pre-wrap; }}
    .reasoning-body.collapsed {{ display: none; }}

    .function-call {{
      border: 1px solid var(--border-color);
      border-radius: 6px;
      margin: 12px 0;
      padding: 10px 15px;
    }}

    .function-name {{ font-weight: 600; color: var(--accent-color); }}
    .param-name {{ font-weight: 600; margin-top: 8px; }}
    .edit-pair {{ display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }}

    .command-result {{ border-collapse: collapse; margin: 12px 0; }}
    .command-result th, .command-result td {{ border: 1px solid var(--border-color); padding: 4px 10px; }}
    .exit-ok {{ color: var(--ok-color); }}
    .exit-fail {{ color: var(--fail-color); font-weight: 600; }}

    pre, code {{ font-family: 'SF Mono', Monaco, Consolas, monospace; font-size: 0.9em; }}
    pre {{
      background-color: var(--code-bg);
      padding: 12px;
      border-radius: 6px;
      overflow-x: auto;
      margin: 6px 0;
    }}

    .has-toc {{ padding: 0; }}
    .layout-wrapper {{ display: flex; min-height: 100vh; }}
    .has-toc .report {{ flex: 1; margin: 0; padding: 20px 40px; }}

    .toc {{
      position: sticky;
      top: 0;
      width: 240px;
      height: 100vh;
      overflow-y: auto;
      background: var(--panel-bg);
      border-right: 1px solid var(--border-color);
      flex-shrink: 0;
    }}

    .toc-header {{ font-weight: 600; padding: 20px 16px 12px; border-bottom: 1px solid var(--border-color); }}
    .toc-list {{ list-style: none; margin: 0; padding: 8px 0; }}
    .toc-section {{ padding: 8px 16px 2px; font-size: 0.75em; text-transform: uppercase; opacity: 0.7; }}
    .toc-link {{ display: block; padding: 4px 16px; color: var(--text-color); text-decoration: none; font-size: 0.9em; }}
    .toc-link:hover {{ background: var(--border-color); }}
    .toc-role {{ opacity: 0.6; font-size: 0.85em; }}

    @media (max-width: 1000px) {{
      .layout-wrapper {{ flex-direction: column; }}
      .toc {{ position: relative; width: 100%; height: auto; max-height: 200px; }}
      .edit-pair {{ grid-template-columns: 1fr; }}
    }}
  "#
        )?;
        writeln!(writer, "  </style>")?;
        Ok(())
    }

    fn write_document_end<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "</main>")?;
        if self.include_toc {
            writeln!(writer, "</div>")?;
        }
        writeln!(
            writer,
            r#"<script>
document.querySelectorAll('.reasoning-header').forEach(header => {{
  header.addEventListener('click', () => {{
    header.nextElementSibling.classList.toggle('collapsed');
  }});
}});
</script>"#
        )?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        Ok(())
    }

    fn write_summary<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        if !self.include_header {
            return Ok(());
        }
        let summary = report.summary();
        let stats = [
            ("Steps", report.step_count()),
            ("Reasoning", summary.reasoning),
            ("Function calls", summary.function_calls),
            ("Commands", summary.command_results),
            ("Failed commands", summary.failed_commands),
        ];

        writeln!(writer, "<div class=\"summary\">")?;
        for (label, value) in stats {
            writeln!(
                writer,
                "  <div class=\"stat-item\"><div class=\"stat-label\">{label}</div><div class=\"stat-value\">{value}</div></div>"
            )?;
        }
        writeln!(writer, "</div>")?;
        Ok(())
    }

    fn write_step<W: Write>(
        &self,
        writer: &mut W,
        step: &ReportStep,
        options: &ExportOptions,
    ) -> Result<()> {
        writeln!(
            writer,
            "<section class=\"step\" id=\"{}\">",
            escape_html(&step.anchor)
        )?;
        writeln!(writer, "  <h3>{}</h3>", escape_html(&step.heading))?;
        if let Some(role) = &step.role {
            writeln!(writer, "  <h4>{}:</h4>", escape_html(role))?;
        }
        if options.include_sources {
            if let Some(source) = &step.source {
                writeln!(
                    writer,
                    "  <div class=\"step-meta\">{}</div>",
                    escape_html(source)
                )?;
            }
        }

        for block in step.blocks.iter().filter(|b| options.includes(b)) {
            match block {
                Block::PlainText(text) => {
                    writeln!(
                        writer,
                        "  <div class=\"plain-text\">{}</div>",
                        escape_html(&options.clip(&text.content))
                    )?;
                }
                Block::Reasoning(reasoning) => {
                    self.write_reasoning(writer, &options.clip(&reasoning.content))?;
                }
                Block::FunctionCall(call) => self.write_function_call(writer, call, options)?,
                Block::CommandResult(result) => write_command_result(writer, result)?,
            }
        }

        writeln!(writer, "</section>")?;
        Ok(())
    }

    fn write_reasoning<W: Write>(&self, writer: &mut W, content: &str) -> Result<()> {
        let collapsed_class = if self.collapse_reasoning { " collapsed" } else { "" };
        writeln!(writer, "  <div class=\"reasoning\">")?;
        writeln!(writer, "    <div class=\"reasoning-header\">THINKING</div>")?;
        writeln!(
            writer,
            "    <div class=\"reasoning-body{collapsed_class}\">{}</div>",
            escape_html(content)
        )?;
        writeln!(writer, "  </div>")?;
        Ok(())
    }

    fn write_function_call<W: Write>(
        &self,
        writer: &mut W,
        call: &FunctionCall,
        options: &ExportOptions,
    ) -> Result<()> {
        writeln!(writer, "  <div class=\"function-call\">")?;
        writeln!(
            writer,
            "    <div>CALLING FUNCTION: <span class=\"function-name\">{}</span></div>",
            escape_html(&call.name)
        )?;

        if options.include_raw_segments {
            for segment in &call.raw_segments {
                writeln!(
                    writer,
                    "    <pre><code>{}</code></pre>",
                    escape_html(&options.clip(segment))
                )?;
            }
        }

        for view in call.parameters.views() {
            match view {
                ParameterView::Paired { old, new } => {
                    writeln!(writer, "    <div class=\"edit-pair\">")?;
                    write_parameter(writer, "old_str", &options.clip(old))?;
                    write_parameter(writer, "new_str", &options.clip(new))?;
                    writeln!(writer, "    </div>")?;
                    if options.show_diff {
                        writeln!(
                            writer,
                            "    <pre class=\"diff\"><code>{}</code></pre>",
                            escape_html(&edit_diff(old, new))
                        )?;
                    }
                }
                ParameterView::Single { name, content } => {
                    write_parameter(writer, name, &options.clip(content))?;
                }
            }
        }

        writeln!(writer, "  </div>")?;
        Ok(())
    }
}

fn write_parameter<W: Write>(writer: &mut W, name: &str, content: &str) -> Result<()> {
    writeln!(writer, "      <div>")?;
    writeln!(
        writer,
        "        <div class=\"param-name\">{}</div>",
        escape_html(name)
    )?;
    if !content.is_empty() {
        writeln!(
            writer,
            "        <pre><code>{}</code></pre>",
            escape_html(content)
        )?;
    }
    writeln!(writer, "      </div>")?;
    Ok(())
}

fn write_command_result<W: Write>(writer: &mut W, result: &CommandResult) -> Result<()> {
    let exit_class = if result.succeeded() { "exit-ok" } else { "exit-fail" };
    writeln!(writer, "  <table class=\"command-result\">")?;
    writeln!(
        writer,
        "    <tr><th>Working Directory</th><th>Execution Time</th><th>Exit Code</th></tr>"
    )?;
    writeln!(
        writer,
        "    <tr><td>{}</td><td>{}</td><td class=\"{exit_class}\">{}</td></tr>",
        escape_html(&result.working_directory),
        escape_html(&result.execution_time),
        escape_html(&result.exit_code)
    )?;
    writeln!(writer, "  </table>")?;
    Ok(())
}

impl Exporter for HtmlExporter {
    fn export_report<W: Write>(
        &self,
        report: &Report,
        writer: &mut W,
        options: &ExportOptions,
    ) -> Result<()> {
        self.write_document_start(writer, report)?;
        self.write_summary(writer, report)?;

        for section in &report.sections {
            if let Some(title) = &section.title {
                writeln!(
                    writer,
                    "<h2>{} - {}</h2>",
                    escape_html(&report.title),
                    escape_html(title)
                )?;
                if section.steps.is_empty() {
                    writeln!(writer, "<p class=\"step-meta\">(no transcripts)</p>")?;
                }
            }
            for step in &section.steps {
                self.write_step(writer, step, options)?;
            }
        }

        self.write_document_end(writer)?;
        Ok(())
    }
}

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(exporter: &HtmlExporter, text: &str) -> String {
        let report = Report::from_transcript("Step 0", text);
        let mut output = Vec::new();
        exporter
            .export_report(&report, &mut output, &ExportOptions::default())
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_html_exporter_builder() {
        let exporter = HtmlExporter::new()
            .with_title("My Trajectory")
            .dark_theme(true)
            .collapse_reasoning(true);

        assert_eq!(exporter.title, Some("My Trajectory".to_string()));
        assert!(exporter.dark_theme);
        assert!(exporter.collapse_reasoning);
    }

    #[test]
    fn test_document_is_standalone() {
        let html = render(&HtmlExporter::new(), "hello");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(!html.contains("<link"));
    }

    #[test]
    fn test_tags_in_content_are_escaped() {
        let html = render(&HtmlExporter::new(), "<function=run><parameter=cmd>echo <b></parameter></function>");
        assert!(html.contains("echo &lt;b&gt;"));
        assert!(!html.contains("echo <b>"));
    }

    #[test]
    fn test_edit_pair_side_by_side() {
        let html = render(
            &HtmlExporter::new(),
            "<function=edit><parameter=old_str>a</parameter><parameter=new_str>b</parameter></function>",
        );
        let pair_at = html.find("<div class=\"edit-pair\">").unwrap();
        assert!(html[pair_at..].contains("old_str"));
        assert!(html[pair_at..].contains("new_str"));
    }

    #[test]
    fn test_toc_links_match_anchors() {
        let html = render(&HtmlExporter::new(), "x");
        assert!(html.contains("href=\"#step_0\""));
        assert!(html.contains("id=\"step_0\""));

        let no_toc = render(&HtmlExporter::new().with_toc(false), "x");
        assert!(!no_toc.contains("<nav class=\"toc\""));
    }

    #[test]
    fn test_failed_exit_code_highlighted() {
        let html = render(
            &HtmlExporter::new(),
            "[Current working directory: /w] [Execution time: 2s] [Command finished with exit code 1]",
        );
        assert!(html.contains("<td class=\"exit-fail\">1</td>"));
    }

    #[test]
    fn test_collapsed_reasoning() {
        let html = render(&HtmlExporter::new().collapse_reasoning(true), "<think>hmm</think>");
        assert!(html.contains("reasoning-body collapsed"));
    }
}
