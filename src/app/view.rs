//! Host content and the per-frame draw.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use action_sheet::ActionSheetExt;

use super::layout::AppLayout;
use super::menu::ActionMenu;
use super::state::AppState;
use super::theme::Theme;

/// Sheets wider than this look stretched on big terminals.
const SHEET_MAX_WIDTH: u16 = 60;

// ───────────────────────────────────────── list state ────────

/// Selection and scroll position of the host list.
#[derive(Debug, Default)]
pub struct HostListState {
    /// Index of the highlighted item.
    pub selected: usize,
    /// First visible item.
    pub offset: usize,
}

impl HostListState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── host view ─────────

/// Everything drawn underneath the sheet: the item list and status bar.
struct HostView<'a> {
    items: &'a [String],
    list: &'a HostListState,
    status: &'a str,
    layout: AppLayout,
}

impl Widget for HostView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Items ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let inner = block.inner(self.layout.list_area);
        block.render(self.layout.list_area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(self.list.offset)
            .take(inner.height as usize)
            .map(|(i, item)| {
                if i == self.list.selected {
                    Line::from(Span::styled(format!(" ▸ {item}"), Theme::selected_style()))
                } else {
                    Line::raw(format!("   {item}"))
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);

        Paragraph::new(self.status)
            .style(Theme::status_bar_style())
            .render(self.layout.status_area, buf);
    }
}

// ───────────────────────────────────────── frame ─────────────

/// Draw one frame into `buf`.
pub fn draw(state: &mut AppState, area: Rect, buf: &mut Buffer) {
    state.terminal_area = area;
    let layout = AppLayout::from_area(area);
    state
        .list_state
        .clamp_scroll(layout.list_area.height.saturating_sub(2) as usize);

    let title = state.selected_item().unwrap_or("(nothing selected)").to_string();
    let hint = state.config.sheet_hint();
    let host_hint = state.config.host_hint();
    let status = state.status_message.as_deref().unwrap_or(&host_hint);
    let selected = state.sheet_selected;

    let host = HostView {
        items: &state.items,
        list: &state.list_state,
        status,
        layout,
    };
    host.action_sheet(state.presented, || ActionMenu {
        title,
        selected,
        hint,
    })
    .max_width(SHEET_MAX_WIDTH)
    .render(area, buf, &mut state.sheet);
}
