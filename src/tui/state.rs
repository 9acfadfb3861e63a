//! TUI application state.
//!
//! All key handling funnels through [`AppState::handle_action`], which is
//! pure state manipulation and needs no terminal.

use ratatui::text::Line;

use crate::evaluation::EvaluationRecord;
use crate::export::Report;
use crate::model::Outcome;
use crate::store::{Direction, NavigationState, TrajectoryStore};

use super::render::{report_lines, RenderOptions};
use super::theme::Theme;

/// What the browser is showing.
#[derive(Debug)]
pub enum ViewSource {
    /// A trajectory root; groups are navigated with the wrapping cursor.
    Store(TrajectoryStore),
    /// An uploaded evaluation file, shown as a single report.
    Evaluation {
        /// Title shown in the frame.
        title: String,
        /// Records in file order.
        records: Vec<EvaluationRecord>,
    },
}

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show the next group, wrapping at the end.
    NextGroup,
    /// Show the previous group, wrapping at the start.
    PreviousGroup,
    /// Switch between success and failed transcripts.
    ToggleOutcome,
    /// Scroll one line up.
    ScrollUp,
    /// Scroll one line down.
    ScrollDown,
    /// Scroll one page up.
    PageUp,
    /// Scroll one page down.
    PageDown,
    /// Jump to the top.
    Top,
    /// Jump to the bottom.
    Bottom,
    /// Jump to the next step heading.
    NextStep,
    /// Jump to the previous step heading.
    PreviousStep,
    /// Show or hide reasoning text.
    ToggleReasoning,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// Leave the browser.
    Quit,
}

/// Application state.
#[derive(Debug)]
pub struct AppState {
    source: ViewSource,
    /// Position in the store.
    pub nav: NavigationState,
    /// Which transcripts of the group are shown.
    pub outcome: Outcome,
    /// Report for the current view.
    pub report: Report,
    /// Rendered report lines.
    pub lines: Vec<Line<'static>>,
    /// Line index of each step heading.
    pub step_offsets: Vec<usize>,
    /// First visible line.
    pub scroll: usize,
    /// Visible content rows.
    pub viewport_height: usize,
    /// Wrap width of the content area.
    pub viewport_width: usize,
    /// Show reasoning text.
    pub show_reasoning: bool,
    /// Show help overlay.
    pub show_help: bool,
    /// One-shot message for the status bar.
    pub status: Option<String>,
    /// Current theme.
    pub theme: Theme,
    /// Use Unicode symbols.
    pub unicode: bool,
    /// Set once the user quits.
    pub should_quit: bool,
}

impl AppState {
    /// Create state positioned at `start`.
    #[must_use]
    pub fn new(source: ViewSource, start: usize, outcome: Outcome, theme: Theme) -> Self {
        let mut state = Self {
            source,
            nav: NavigationState::at(start),
            outcome,
            report: Report {
                title: String::new(),
                sections: Vec::new(),
            },
            lines: Vec::new(),
            step_offsets: Vec::new(),
            scroll: 0,
            viewport_height: 0,
            viewport_width: 0,
            show_reasoning: true,
            show_help: false,
            status: None,
            theme,
            unicode: true,
            should_quit: false,
        };
        state.reload();
        state
    }

    /// The data being browsed.
    #[must_use]
    pub const fn source(&self) -> &ViewSource {
        &self.source
    }

    /// Title for the content frame.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.source {
            ViewSource::Store(_) if self.report.sections.is_empty() => "trajview".to_string(),
            ViewSource::Store(_) => format!("{} - {}", self.report.title, self.outcome.label()),
            ViewSource::Evaluation { title, .. } => title.clone(),
        }
    }

    /// `(position, count)` of the current group, if browsing a store.
    #[must_use]
    pub fn group_position(&self) -> Option<(usize, usize)> {
        match &self.source {
            ViewSource::Store(store) if !store.is_empty() => {
                Some((self.nav.cursor % store.len(), store.len()))
            }
            _ => None,
        }
    }

    /// Rebuild the report for the current group and outcome.
    pub fn reload(&mut self) {
        self.report = match &self.source {
            ViewSource::Store(store) => match store.current(self.nav) {
                Some(group) => Report::from_group(group, &[self.outcome]),
                None => Report {
                    title: store.root().display().to_string(),
                    sections: Vec::new(),
                },
            },
            ViewSource::Evaluation { title, records } => Report::from_records(title.clone(), records),
        };
        self.scroll = 0;
        self.relayout();
    }

    /// Re-render lines after a display setting changed.
    pub fn relayout(&mut self) {
        let rendered = report_lines(
            &self.report,
            RenderOptions {
                show_reasoning: self.show_reasoning,
                unicode: self.unicode,
                width: self.viewport_width,
            },
            &self.theme,
        );
        self.lines = rendered.lines;
        self.step_offsets = rendered.step_offsets;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Record the content area size, re-wrapping when the width changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport_height = height;
        if width != self.viewport_width {
            self.viewport_width = width;
            self.relayout();
        } else {
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    /// Largest useful scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_height.max(1))
    }

    fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.max_scroll());
    }

    fn move_group(&mut self, direction: Direction) {
        match &self.source {
            ViewSource::Store(store) if !store.is_empty() => {
                self.nav = store.navigate(self.nav, direction);
                self.reload();
            }
            ViewSource::Store(_) => self.status = Some("No trajectory groups".to_string()),
            ViewSource::Evaluation { .. } => {
                self.status = Some("Evaluation files have a single view".to_string());
            }
        }
    }

    /// Apply one user action.
    pub fn handle_action(&mut self, action: Action) {
        if self.show_help && !matches!(action, Action::ToggleHelp | Action::Quit) {
            self.show_help = false;
            return;
        }

        let page = self.viewport_height.saturating_sub(1).max(1);
        match action {
            Action::NextGroup => self.move_group(Direction::Next),
            Action::PreviousGroup => self.move_group(Direction::Previous),
            Action::ToggleOutcome => {
                if matches!(self.source, ViewSource::Store(_)) {
                    self.outcome = self.outcome.toggle();
                    self.reload();
                    self.status = Some(format!("Showing {} transcripts", self.outcome.dir_name()));
                }
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll_to(self.scroll.saturating_add(1)),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(page),
            Action::PageDown => self.scroll_to(self.scroll.saturating_add(page)),
            Action::Top => self.scroll = 0,
            Action::Bottom => self.scroll = self.max_scroll(),
            Action::NextStep => {
                if let Some(&offset) = self.step_offsets.iter().find(|&&o| o > self.scroll) {
                    self.scroll_to(offset);
                }
            }
            Action::PreviousStep => {
                if let Some(&offset) = self.step_offsets.iter().rev().find(|&&o| o < self.scroll) {
                    self.scroll_to(offset);
                }
            }
            Action::ToggleReasoning => {
                self.show_reasoning = !self.show_reasoning;
                self.relayout();
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => self.should_quit = true,
        }
    }
}
