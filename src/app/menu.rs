//! The demo's sheet content: a list of actions for the selected item.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use action_sheet::SheetContent;

use super::theme::Theme;

/// Rows above the first action (title + blank line).
const HEADER_ROWS: u16 = 2;
/// Rows below the last action (blank line + hint).
const FOOTER_ROWS: u16 = 2;

/// Actions offered for a host item, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAction {
    Open,
    Rename,
    Duplicate,
    Share,
    Delete,
    Cancel,
}

impl SheetAction {
    pub const ALL: &[SheetAction] = &[
        SheetAction::Open,
        SheetAction::Rename,
        SheetAction::Duplicate,
        SheetAction::Share,
        SheetAction::Delete,
        SheetAction::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SheetAction::Open => "Open",
            SheetAction::Rename => "Rename",
            SheetAction::Duplicate => "Duplicate",
            SheetAction::Share => "Share…",
            SheetAction::Delete => "Delete",
            SheetAction::Cancel => "Cancel",
        }
    }

    pub fn is_destructive(self) -> bool {
        self == SheetAction::Delete
    }
}

/// Action list rendered inside the sheet.
pub struct ActionMenu {
    pub title: String,
    pub selected: usize,
    pub hint: String,
}

impl ActionMenu {
    /// Index of the action drawn on `row`, given where the content area
    /// ended up on screen.
    pub fn item_at(content: Rect, row: u16) -> Option<usize> {
        let first = content.y.saturating_add(HEADER_ROWS);
        if content.is_empty() || row < first || row >= content.bottom() {
            return None;
        }
        let idx = (row - first) as usize;
        (idx < SheetAction::ALL.len()).then_some(idx)
    }
}

impl Widget for ActionMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            format!(" {}", self.title),
            Theme::sheet_title_style(),
        )));
        lines.push(Line::raw(""));

        for (i, &action) in SheetAction::ALL.iter().enumerate() {
            let base = if action.is_destructive() {
                Theme::destructive_style()
            } else {
                Theme::action_style()
            };
            let (prefix, style) = if i == self.selected {
                (" ▸ ", base.patch(Theme::selected_style()))
            } else {
                ("   ", base)
            };
            let width = area.width as usize;
            let text = format!("{prefix}{:<width$}", action.label(), width = width.saturating_sub(3));
            lines.push(Line::from(Span::styled(text, style)));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.hint),
            Theme::hint_style(),
        )));

        Paragraph::new(lines).render(area, buf);
    }
}

impl SheetContent for ActionMenu {
    fn height(&self, _width: u16) -> u16 {
        HEADER_ROWS + SheetAction::ALL.len() as u16 + FOOTER_ROWS
    }
}
