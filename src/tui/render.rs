//! Turns a [`Report`] into styled terminal lines.
//!
//! Lines are wrapped here rather than by the paragraph widget, so a line
//! index is also a screen row and step offsets can drive scrolling.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::export::{Report, ReportStep};
use crate::model::{Block, CommandResult, FunctionCall, ParameterView};

use super::theme::Theme;

/// How to lay out a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show reasoning text instead of a one-line placeholder.
    pub show_reasoning: bool,
    /// Use Unicode symbols.
    pub unicode: bool,
    /// Wrap width in columns; zero disables wrapping.
    pub width: usize,
}

/// Rendered report.
#[derive(Debug, Default)]
pub struct Rendered {
    /// Display lines.
    pub lines: Vec<Line<'static>>,
    /// Line index where each step starts.
    pub step_offsets: Vec<usize>,
}

struct Symbols {
    rule: &'static str,
    step: &'static str,
    reasoning: &'static str,
    function: &'static str,
    ok: &'static str,
    fail: &'static str,
    bar: &'static str,
}

const UNICODE: Symbols = Symbols {
    rule: "═",
    step: "▶",
    reasoning: "💭",
    function: "⚙",
    ok: "✔",
    fail: "✘",
    bar: "│",
};

const ASCII: Symbols = Symbols {
    rule: "=",
    step: ">",
    reasoning: "*",
    function: "#",
    ok: "+",
    fail: "x",
    bar: "|",
};

struct Writer<'t> {
    theme: &'t Theme,
    symbols: &'static Symbols,
    options: RenderOptions,
    out: Rendered,
}

impl Writer<'_> {
    fn blank(&mut self) {
        self.out.lines.push(Line::default());
    }

    fn line(&mut self, spans: Vec<Span<'static>>) {
        self.out.lines.push(Line::from(spans));
    }

    /// Push `text` line by line, wrapped, each row starting with `prefix`.
    fn text(&mut self, prefix: &str, text: &str, style: Style) {
        let prefix_width = prefix.chars().count();
        let width = match self.options.width {
            0 => usize::MAX,
            w => w.saturating_sub(prefix_width).max(1),
        };
        for source_line in text.lines() {
            for row in wrap(source_line, width) {
                self.line(vec![
                    Span::styled(prefix.to_string(), self.theme.muted_style()),
                    Span::styled(row, style),
                ]);
            }
        }
    }

    fn report(mut self, report: &Report) -> Rendered {
        if report.sections.is_empty() {
            self.line(vec![Span::styled(
                "No trajectories found.".to_string(),
                self.theme.muted_style(),
            )]);
            return self.out;
        }

        for section in &report.sections {
            if let Some(title) = &section.title {
                let rule = self.symbols.rule.repeat(2);
                self.line(vec![Span::styled(
                    format!("{rule} {title} ({}) {rule}", section.steps.len()),
                    Style::default().fg(self.theme.secondary),
                )]);
                self.blank();
            }
            if section.steps.is_empty() {
                self.line(vec![Span::styled(
                    "(no transcripts)".to_string(),
                    self.theme.muted_style(),
                )]);
                self.blank();
            }
            for step in &section.steps {
                self.step(step);
            }
        }
        self.out
    }

    fn step(&mut self, step: &ReportStep) {
        self.out.step_offsets.push(self.out.lines.len());

        let mut heading = vec![Span::styled(
            format!("{} {}", self.symbols.step, step.heading),
            self.theme.heading_style(),
        )];
        if let Some(role) = &step.role {
            heading.push(Span::styled(
                format!("  {role}"),
                Style::default().fg(self.theme.secondary),
            ));
        }
        if let Some(source) = &step.source {
            heading.push(Span::styled(format!("  {source}"), self.theme.muted_style()));
        }
        self.line(heading);
        self.blank();

        for block in &step.blocks {
            self.block(block);
            self.blank();
        }
    }

    fn block(&mut self, block: &Block) {
        let foreground = Style::default().fg(self.theme.foreground);
        match block {
            Block::PlainText(text) => self.text("", &text.content, foreground),
            Block::Reasoning(reasoning) => {
                if self.options.show_reasoning {
                    self.line(vec![Span::styled(
                        format!("{} THINKING", self.symbols.reasoning),
                        self.theme.reasoning_style(),
                    )]);
                    let prefix = format!("{} ", self.symbols.bar);
                    self.text(&prefix, &reasoning.content, self.theme.reasoning_style());
                } else {
                    self.line(vec![Span::styled(
                        format!(
                            "{} THINKING ({} lines hidden, t to show)",
                            self.symbols.reasoning,
                            reasoning.content.lines().count()
                        ),
                        self.theme.muted_style(),
                    )]);
                }
            }
            Block::FunctionCall(call) => self.function_call(call),
            Block::CommandResult(result) => self.command_result(result),
        }
    }

    fn function_call(&mut self, call: &FunctionCall) {
        let foreground = Style::default().fg(self.theme.foreground);
        self.line(vec![
            Span::styled(
                format!("{} CALLING FUNCTION: ", self.symbols.function),
                self.theme.function_style(),
            ),
            Span::styled(call.name.clone(), self.theme.heading_style()),
        ]);

        for view in call.parameters.views() {
            match view {
                ParameterView::Paired { old, new } => {
                    self.label("old_str");
                    self.text("  - ", old, Style::default().fg(self.theme.removed));
                    self.label("new_str");
                    self.text("  + ", new, Style::default().fg(self.theme.added));
                }
                ParameterView::Single { name, content } => {
                    self.label(name);
                    self.text("    ", content, foreground);
                }
            }
        }

        for segment in &call.raw_segments {
            self.text("  ", segment, self.theme.muted_style());
        }
    }

    fn label(&mut self, name: &str) {
        self.line(vec![Span::styled(
            format!("  {name}:"),
            self.theme.parameter_style(),
        )]);
    }

    fn command_result(&mut self, result: &CommandResult) {
        let succeeded = result.succeeded();
        let symbol = if succeeded { self.symbols.ok } else { self.symbols.fail };
        self.line(vec![
            Span::styled(
                format!("{symbol} exit {}", result.exit_code),
                self.theme.exit_style(succeeded),
            ),
            Span::styled(
                format!("  in {}  ({})", result.working_directory, result.execution_time),
                self.theme.muted_style(),
            ),
        ]);
    }
}

/// Split `line` into rows of at most `width` characters.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Lay out `report` for the terminal.
#[must_use]
pub fn report_lines(report: &Report, options: RenderOptions, theme: &Theme) -> Rendered {
    let writer = Writer {
        theme,
        symbols: if options.unicode { &UNICODE } else { &ASCII },
        options,
        out: Rendered::default(),
    };
    writer.report(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Outcome, Transcript, TrajectoryGroup};

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn options() -> RenderOptions {
        RenderOptions {
            show_reasoning: true,
            unicode: false,
            width: 0,
        }
    }

    fn group() -> TrajectoryGroup {
        TrajectoryGroup {
            name: "traj1".to_string(),
            index: 1,
            success: vec![
                Transcript::new("a.txt", "<think>plan</think>Hello"),
                Transcript::new(
                    "b.txt",
                    "<function=edit><parameter=old_str>x</parameter><parameter=new_str>y</parameter></function>",
                ),
            ],
            failed: Vec::new(),
        }
    }

    #[test]
    fn test_steps_and_offsets() {
        let report = Report::from_group(&group(), &Outcome::ALL);
        let rendered = report_lines(&report, options(), &Theme::dark());
        let text = plain(&rendered.lines);

        assert_eq!(rendered.step_offsets.len(), 2);
        for &offset in &rendered.step_offsets {
            assert!(text[offset].starts_with("> Step"));
        }
        assert!(text.contains(&"== Success (2) ==".to_string()));
        assert!(text.contains(&"== Failed (0) ==".to_string()));
        assert!(text.contains(&"(no transcripts)".to_string()));
        assert!(text.contains(&"| plan".to_string()));
        assert!(text.contains(&"  - x".to_string()));
        assert!(text.contains(&"  + y".to_string()));
    }

    #[test]
    fn test_hidden_reasoning_placeholder() {
        let report = Report::from_transcript("t", "<think>one\ntwo</think>");
        let rendered = report_lines(
            &report,
            RenderOptions {
                show_reasoning: false,
                ..options()
            },
            &Theme::dark(),
        );
        let text = plain(&rendered.lines);
        assert!(text.contains(&"* THINKING (2 lines hidden, t to show)".to_string()));
        assert!(!text.iter().any(|l| l.contains("one")));
    }

    #[test]
    fn test_wrapping_keeps_prefix() {
        let report = Report::from_transcript("t", "<think>abcdefgh</think>");
        let rendered = report_lines(
            &report,
            RenderOptions {
                width: 6,
                ..options()
            },
            &Theme::dark(),
        );
        let text = plain(&rendered.lines);
        assert!(text.contains(&"| abcd".to_string()));
        assert!(text.contains(&"| efgh".to_string()));
    }

    #[test]
    fn test_command_result_line() {
        let report = Report::from_transcript(
            "t",
            "[Current working directory: /repo]\n[Execution time: 0.2s]\n[Command finished with exit code 1]",
        );
        let text = plain(&report_lines(&report, options(), &Theme::dark()).lines);
        assert!(text.contains(&"x exit 1  in /repo  (0.2s)".to_string()));
    }

    #[test]
    fn test_empty_report() {
        let report = Report {
            title: "none".to_string(),
            sections: Vec::new(),
        };
        let rendered = report_lines(&report, options(), &Theme::dark());
        assert_eq!(plain(&rendered.lines), vec!["No trajectories found."]);
        assert!(rendered.step_offsets.is_empty());
    }

    #[test]
    fn test_wrap_multibyte() {
        assert_eq!(wrap("ééé", 2), vec!["éé", "é"]);
        assert_eq!(wrap("", 5), vec![""]);
    }
}
