//! Terminal browser for trajectories.
//!
//! One full-width view of the current group's transcripts (or of an
//! evaluation file), a status bar, and a help overlay:
//! - `←`/`→` move between groups, wrapping at either end
//! - `Tab` switches between success and failed transcripts
//! - `[`/`]` jump between steps, `t` hides reasoning
//!
//! Built with ratatui for cross-platform terminal support.

mod app;
mod components;
mod events;
mod render;
mod state;
mod theme;

pub use app::{draw_ui, initial_state, run, TuiOptions};
pub use events::KeyBindings;
pub use render::{report_lines, RenderOptions, Rendered};
pub use state::{Action, AppState, ViewSource};
pub use theme::{available_themes, Theme};
