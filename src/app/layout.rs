//! Layout helpers to split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the host list and a bottom status bar.
pub struct AppLayout {
    pub list_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // list pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            list_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Map a screen row to an index into the list, given the scroll offset.
    /// `None` for rows on the border or outside the pane.
    pub fn list_row(&self, column: u16, row: u16, offset: usize) -> Option<usize> {
        let inner_top = self.list_area.y.saturating_add(1);
        let inner_bottom = self.list_area.bottom().saturating_sub(1);
        let inner_left = self.list_area.x.saturating_add(1);
        let inner_right = self.list_area.right().saturating_sub(1);
        if row < inner_top || row >= inner_bottom || column < inner_left || column >= inner_right {
            return None;
        }
        Some((row - inner_top) as usize + offset)
    }
}
