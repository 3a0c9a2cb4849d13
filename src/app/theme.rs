//! Colours for the demo's host list and action menu.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ── action menu ────────────────────────────────────────────
    pub fn sheet_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn action_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn destructive_style() -> Style {
        Style::default().fg(Color::LightRed)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── host chrome ────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
