//! TUI event handling.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::Action;

/// Application events.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick.
    Tick,
    /// Key press event.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
}

/// Reads terminal events on a background thread.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                    _ => None,
                };
                if let Some(event) = forwarded {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }

            if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Get the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Maps keys to actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyEvent, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let shifted = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT);

        Self {
            bindings: vec![
                (key(KeyCode::Char('q')), Action::Quit),
                (KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit),
                (key(KeyCode::Right), Action::NextGroup),
                (key(KeyCode::Char('l')), Action::NextGroup),
                (key(KeyCode::Char('n')), Action::NextGroup),
                (key(KeyCode::Left), Action::PreviousGroup),
                (key(KeyCode::Char('h')), Action::PreviousGroup),
                (key(KeyCode::Char('p')), Action::PreviousGroup),
                (key(KeyCode::Tab), Action::ToggleOutcome),
                (key(KeyCode::Char('f')), Action::ToggleOutcome),
                (key(KeyCode::Up), Action::ScrollUp),
                (key(KeyCode::Char('k')), Action::ScrollUp),
                (key(KeyCode::Down), Action::ScrollDown),
                (key(KeyCode::Char('j')), Action::ScrollDown),
                (key(KeyCode::PageUp), Action::PageUp),
                (key(KeyCode::PageDown), Action::PageDown),
                (key(KeyCode::Char(' ')), Action::PageDown),
                (key(KeyCode::Home), Action::Top),
                (key(KeyCode::Char('g')), Action::Top),
                (key(KeyCode::End), Action::Bottom),
                (key(KeyCode::Char('G')), Action::Bottom),
                (shifted('G'), Action::Bottom),
                (key(KeyCode::Char(']')), Action::NextStep),
                (key(KeyCode::Char('[')), Action::PreviousStep),
                (key(KeyCode::Char('t')), Action::ToggleReasoning),
                (key(KeyCode::Char('?')), Action::ToggleHelp),
                (shifted('?'), Action::ToggleHelp),
                (key(KeyCode::Esc), Action::ToggleHelp),
            ],
        }
    }
}

impl KeyBindings {
    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|&(_, action)| action)
    }

    /// Help text: one `(keys, description)` row per action.
    #[must_use]
    pub fn help_rows() -> &'static [(&'static str, &'static str)] {
        &[
            ("→ l n", "Next trajectory group"),
            ("← h p", "Previous trajectory group"),
            ("Tab f", "Switch success / failed"),
            ("↓ j / ↑ k", "Scroll one line"),
            ("PgDn Space / PgUp", "Scroll one page"),
            ("g / G", "Top / bottom"),
            ("] / [", "Next / previous step"),
            ("t", "Show or hide reasoning"),
            ("?", "Toggle this help"),
            ("q Ctrl-C", "Quit"),
        ]
    }
}
