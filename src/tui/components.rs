//! Reusable TUI components.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A bordered view over pre-wrapped lines.
pub struct ScrollableText<'a> {
    title: String,
    content: &'a [Line<'static>],
    scroll: usize,
    border_style: Style,
}

impl<'a> ScrollableText<'a> {
    /// Create a new scrollable text view.
    pub fn new(title: impl Into<String>, content: &'a [Line<'static>]) -> Self {
        Self {
            title: title.into(),
            content,
            scroll: 0,
            border_style: Style::default(),
        }
    }

    /// Set scroll position.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the border style.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Render the component.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let visible: Vec<Line> = self
            .content
            .iter()
            .skip(self.scroll)
            .take(usize::from(area.height.saturating_sub(2)))
            .cloned()
            .collect();

        let paragraph = Paragraph::new(visible).block(
            Block::default()
                .title(format!(" {} ", self.title))
                .borders(Borders::ALL)
                .border_style(self.border_style),
        );

        f.render_widget(paragraph, area);
    }
}

/// A one-row status bar with left and right aligned parts.
#[derive(Default)]
pub struct StatusBar<'a> {
    left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    style: Style,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add left-aligned content.
    #[must_use]
    pub fn left(mut self, spans: Vec<Span<'a>>) -> Self {
        self.left = spans;
        self
    }

    /// Add right-aligned content.
    #[must_use]
    pub fn right(mut self, spans: Vec<Span<'a>>) -> Self {
        self.right = spans;
        self
    }

    /// Set the bar style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Render the status bar.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let used: usize = self
            .left
            .iter()
            .chain(self.right.iter())
            .map(|s| s.content.chars().count())
            .sum();
        let padding = usize::from(area.width).saturating_sub(used).max(1);

        let mut spans = self.left;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.extend(self.right);

        f.render_widget(Paragraph::new(Line::from(spans)).style(self.style), area);
    }
}

/// Create a centered rectangle.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
