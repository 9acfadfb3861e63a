//! TUI theming and colors.

use ratatui::style::{Color, Modifier, Style};

/// Application theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Name of the theme.
    pub name: String,
    /// Body text.
    pub foreground: Color,
    /// Headings and the app name.
    pub primary: Color,
    /// Secondary accent (section rules, roles).
    pub secondary: Color,
    /// Border color.
    pub border: Color,
    /// Dimmed text: sources, hints, raw segments.
    pub muted: Color,
    /// Reasoning blocks.
    pub reasoning: Color,
    /// Function call headers.
    pub function: Color,
    /// Parameter names.
    pub parameter: Color,
    /// `old_str` side of an edit.
    pub removed: Color,
    /// `new_str` side of an edit.
    pub added: Color,
    /// Status-bar background.
    pub status_bg: Color,
    /// Errors and failed commands.
    pub error: Color,
    /// Warnings and status messages.
    pub warning: Color,
    /// Successful commands.
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            foreground: Color::White,
            primary: Color::Cyan,
            secondary: Color::Magenta,
            border: Color::DarkGray,
            muted: Color::DarkGray,
            reasoning: Color::Magenta,
            function: Color::Yellow,
            parameter: Color::Cyan,
            removed: Color::Red,
            added: Color::Green,
            status_bg: Color::DarkGray,
            error: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
        }
    }

    /// Create a light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            foreground: Color::Black,
            primary: Color::Blue,
            secondary: Color::Magenta,
            border: Color::Gray,
            muted: Color::Gray,
            reasoning: Color::Magenta,
            function: Color::Blue,
            parameter: Color::Blue,
            removed: Color::Red,
            added: Color::Green,
            status_bg: Color::Gray,
            error: Color::Red,
            warning: Color::Rgb(170, 110, 0),
            success: Color::Green,
        }
    }

    /// Get theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Style for the frame border.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for step and section headings.
    #[must_use]
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for reasoning text.
    #[must_use]
    pub fn reasoning_style(&self) -> Style {
        Style::default()
            .fg(self.reasoning)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for function call headers.
    #[must_use]
    pub fn function_style(&self) -> Style {
        Style::default()
            .fg(self.function)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for parameter labels.
    #[must_use]
    pub fn parameter_style(&self) -> Style {
        Style::default().fg(self.parameter)
    }

    /// Style for dimmed text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for a command result by exit status.
    #[must_use]
    pub fn exit_style(&self, succeeded: bool) -> Style {
        let color = if succeeded { self.success } else { self.error };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Available themes list.
#[must_use]
pub fn available_themes() -> &'static [&'static str] {
    &["dark", "light"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("LIGHT").unwrap().name, "light");
        assert_eq!(Theme::from_name("dark"), Some(Theme::default()));
        assert!(Theme::from_name("solarized").is_none());
        assert!(available_themes()
            .iter()
            .all(|name| Theme::from_name(name).is_some()));
    }
}
