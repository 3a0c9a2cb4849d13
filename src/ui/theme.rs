//! Styles for the sheet's own chrome.

use ratatui::style::{Color, Modifier, Style};

/// Central theme.  Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn sheet_style() -> Style {
        Style::default().bg(Color::Rgb(0x1e, 0x1e, 0x24)).fg(Color::White)
    }

    pub fn sheet_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// The grab handle drawn in the sheet's top border.
    pub fn handle_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    }
}
