//! TUI application main loop.

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, warn};

use crate::error::{Result, ViewerError};
use crate::model::Outcome;

use super::components::{centered_rect, ScrollableText, StatusBar};
use super::events::{Event, EventHandler, KeyBindings};
use super::state::{AppState, ViewSource};
use super::theme::{available_themes, Theme};

/// Startup settings for the browser.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Store position to open first.
    pub start: usize,
    /// Outcome shown first.
    pub outcome: Outcome,
    /// Theme name.
    pub theme: String,
    /// Start with reasoning hidden.
    pub collapse_reasoning: bool,
    /// Use Unicode symbols.
    pub unicode: bool,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            start: 0,
            outcome: Outcome::Success,
            theme: "dark".to_string(),
            collapse_reasoning: false,
            unicode: true,
        }
    }
}

/// Build the initial state for `source`.
#[must_use]
pub fn initial_state(source: ViewSource, options: &TuiOptions) -> AppState {
    let theme = Theme::from_name(&options.theme).unwrap_or_else(|| {
        warn!(
            theme = %options.theme,
            available = ?available_themes(),
            "Unknown theme, using dark"
        );
        Theme::dark()
    });

    let mut app = AppState::new(source, options.start, options.outcome, theme);
    app.unicode = options.unicode;
    app.show_reasoning = !options.collapse_reasoning;
    app.relayout();
    app
}

/// Run the TUI application.
pub fn run(source: ViewSource, options: TuiOptions) -> Result<()> {
    enable_raw_mode().map_err(|e| {
        ViewerError::io(
            "Cannot launch TUI - no interactive terminal available. \
             The TUI requires a terminal with keyboard input support",
            e,
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| ViewerError::io("Failed to enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| ViewerError::io("Failed to create terminal", e))?;

    let mut app = initial_state(source, &options);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().map_err(|e| ViewerError::io("Failed to disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| ViewerError::io("Failed to leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| ViewerError::io("Failed to show cursor", e))?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let events = EventHandler::new(Duration::from_millis(100));
    let bindings = KeyBindings::default();

    loop {
        let size = terminal
            .size()
            .map_err(|e| ViewerError::io("Failed to query terminal size", e))?;
        let (width, height) = content_size(Rect::new(0, 0, size.width, size.height));
        app.resize(width, height);

        terminal
            .draw(|f| draw_ui(f, app))
            .map_err(|e| ViewerError::io("Failed to draw TUI", e))?;

        match events.next() {
            Ok(Event::Key(key)) => {
                app.status = None;
                if let Some(action) = bindings.action_for(&key) {
                    debug!(?action, "Handling key");
                    app.handle_action(action);
                }
            }
            Ok(Event::Resize(_, _) | Event::Tick) => {}
            Err(_) => {
                return Err(ViewerError::TuiError {
                    message: "event channel closed".to_string(),
                })
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Text columns and rows inside the bordered content frame.
fn content_size(area: Rect) -> (usize, usize) {
    let (content, _) = layout(area);
    (
        usize::from(content.width.saturating_sub(2)),
        usize::from(content.height.saturating_sub(2)),
    )
}

/// Draw the whole screen.
pub fn draw_ui(f: &mut Frame, app: &AppState) {
    let (content, status) = layout(f.area());

    ScrollableText::new(app.title(), &app.lines)
        .scroll(app.scroll)
        .border_style(app.theme.border_style())
        .render(f, content);

    draw_status_bar(f, app, status);

    if app.show_help {
        draw_help_overlay(f, app);
    }
}

fn draw_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let name_style = Style::default()
        .fg(app.theme.primary)
        .add_modifier(Modifier::BOLD);
    let sep = if app.unicode { " │ " } else { " | " };

    let mut left = vec![Span::styled(" trajview ", name_style)];
    if let Some(message) = &app.status {
        left.push(Span::raw(sep));
        left.push(Span::styled(message.clone(), Style::default().fg(app.theme.warning)));
    } else if let Some((position, count)) = app.group_position() {
        left.push(Span::raw(sep));
        left.push(Span::raw(format!(
            "{} ({}/{count})",
            app.report.title,
            position + 1
        )));
        left.push(Span::raw(sep));
        left.push(Span::styled(
            app.outcome.label(),
            Style::default().fg(app.theme.secondary),
        ));
    }

    let total = app.lines.len();
    let right = vec![
        Span::raw(format!("L{}/{total}", (app.scroll + 1).min(total))),
        Span::raw(sep),
        Span::raw(format!("{} steps", app.step_offsets.len())),
        Span::raw(sep),
        Span::raw("? help "),
    ];

    StatusBar::new()
        .left(left)
        .right(right)
        .style(Style::default().bg(app.theme.status_bg).fg(app.theme.foreground))
        .render(f, area);
}

fn draw_help_overlay(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 60, f.area());

    let mut lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(KeyBindings::help_rows().iter().map(|(keys, description)| {
        Line::from(vec![
            Span::styled(format!("  {keys:<20}"), app.theme.parameter_style()),
            Span::raw(*description),
        ])
    }));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(app.theme.border_style()),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transcript, TrajectoryGroup};
    use crate::store::TrajectoryStore;
    use crate::tui::state::Action;
    use ratatui::backend::TestBackend;

    fn screen(app: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn source() -> ViewSource {
        let groups = vec![
            TrajectoryGroup {
                name: "traj1".to_string(),
                index: 1,
                success: vec![Transcript::new(
                    "run.txt",
                    "<function=bash><parameter=command>cargo test</parameter></function>",
                )],
                failed: Vec::new(),
            },
            TrajectoryGroup {
                name: "traj2".to_string(),
                index: 2,
                success: Vec::new(),
                failed: vec![Transcript::new("x.txt", "gave up")],
            },
        ];
        ViewSource::Store(TrajectoryStore::from_groups("root", groups))
    }

    #[test]
    fn test_draws_group_and_status() {
        let mut app = initial_state(source(), &TuiOptions::default());
        app.resize(78, 20);

        let text = screen(&app, 80, 23);
        assert!(text.contains("traj1 - Success"));
        assert!(text.contains("CALLING FUNCTION: bash"));
        assert!(text.contains("cargo test"));
        assert!(text.contains("trajview"));
        assert!(text.contains("(1/2)"));
    }

    #[test]
    fn test_navigation_redraws() {
        let mut app = initial_state(source(), &TuiOptions::default());
        app.resize(78, 20);
        app.handle_action(Action::NextGroup);
        app.handle_action(Action::ToggleOutcome);

        let text = screen(&app, 80, 23);
        assert!(text.contains("traj2 - Failed"));
        assert!(text.contains("gave up"));
    }

    #[test]
    fn test_help_overlay() {
        let mut app = initial_state(source(), &TuiOptions::default());
        app.handle_action(Action::ToggleHelp);

        let text = screen(&app, 100, 30);
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Next trajectory group"));
    }

    #[test]
    fn test_options_apply() {
        let options = TuiOptions {
            theme: "no-such-theme".to_string(),
            collapse_reasoning: true,
            unicode: false,
            start: 1,
            ..TuiOptions::default()
        };
        let app = initial_state(source(), &options);
        assert_eq!(app.theme, Theme::dark());
        assert!(!app.show_reasoning);
        assert!(!app.unicode);
        assert_eq!(app.report.title, "traj2");
    }

    #[test]
    fn test_content_size_excludes_borders_and_status() {
        assert_eq!(content_size(Rect::new(0, 0, 80, 24)), (78, 21));
    }
}
