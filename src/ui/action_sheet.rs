//! Bottom action sheet widget.
//!
//! Renders a scrim over whatever is already in the buffer, then the sheet
//! itself anchored to the bottom edge and pushed down by the current drag
//! offset.  Dragging above the resting position does not lift the sheet;
//! a stretch spacer grows below the content instead.
//!
//! [`ActionSheetState`] owns the per-instance [`SheetState`] plus the drag
//! tracker and the hit zones of the last frame, so a host only has to
//! forward mouse events and apply the returned [`Outcome`].

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    text::Span,
    widgets::{Block, BorderType, Borders, StatefulWidget, Widget},
};

use crate::core::gesture::{DragEvent, DragTracker};
use crate::core::sheet::{Outcome, SheetConfig, SheetState};

use super::scrim::Scrim;
use super::theme::Theme;

/// Rows taken by the sheet's own chrome (the top border with the handle).
pub const CHROME_ROWS: u16 = 1;

const HANDLE: &str = " ━━━━ ";

// ───────────────────────────────────────── content ───────────

/// Anything that can sit inside the sheet.  The sheet sizes itself from the
/// height the content asks for.
pub trait SheetContent: Widget {
    /// Rows needed at the given inner width.
    fn height(&self, width: u16) -> u16;
}

/// Wrap any widget with a fixed height.
pub struct FixedHeight<W> {
    pub widget: W,
    pub height: u16,
}

impl<W: Widget> Widget for FixedHeight<W> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.widget.render(area, buf);
    }
}

impl<W: Widget> SheetContent for FixedHeight<W> {
    fn height(&self, _width: u16) -> u16 {
        self.height
    }
}

// ───────────────────────────────────────── hit zones ─────────

/// Screen regions of the last rendered frame, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetHitZones {
    /// Full-bleed scrim (everything the sheet does not cover).
    pub scrim: Rect,
    /// Visible part of the sheet, including the stretch spacer.
    pub sheet: Rect,
    /// Visible part of the content area inside the sheet.
    pub content: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Sheet,
    Scrim,
}

impl SheetHitZones {
    pub fn hit(&self, column: u16, row: u16) -> Option<Zone> {
        let pos = Position::new(column, row);
        if self.sheet.contains(pos) {
            Some(Zone::Sheet)
        } else if self.scrim.contains(pos) {
            Some(Zone::Scrim)
        } else {
            None
        }
    }
}

// ───────────────────────────────────────── state ─────────────

/// What a mouse event did to the sheet.
#[must_use = "outcomes carry dismissals for the presentation flag"]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetResponse {
    /// Nothing the host needs to know about.
    Idle,
    /// A transition ran (scrim tap or drag release).
    Outcome(Outcome),
    /// The sheet was tapped without dragging.
    Tap { column: u16, row: u16 },
}

impl SheetResponse {
    /// Run `on_dismiss` if the response dismissed the sheet.
    pub fn notify(self, on_dismiss: impl FnOnce()) {
        if let SheetResponse::Outcome(outcome) = self {
            outcome.notify(on_dismiss);
        }
    }
}

/// Everything one sheet instance keeps between frames.
#[derive(Debug, Clone)]
pub struct ActionSheetState {
    sheet: SheetState,
    tracker: DragTracker,
    /// Zone the tracked press started in.
    pressed: Option<Zone>,
    zones: SheetHitZones,
}

impl ActionSheetState {
    pub fn new(config: SheetConfig) -> Self {
        let tracker = DragTracker::new(config.units_per_row);
        Self {
            sheet: SheetState::new(config),
            tracker,
            pressed: None,
            zones: SheetHitZones::default(),
        }
    }

    pub fn sheet(&self) -> &SheetState {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut SheetState {
        &mut self.sheet
    }

    /// Hit zones from the most recent render.
    pub fn zones(&self) -> SheetHitZones {
        self.zones
    }

    /// Forget the hit zones when a frame skips drawing the sheet.
    pub(crate) fn clear_zones(&mut self) {
        self.zones = SheetHitZones::default();
    }

    /// Feed the host's presentation flag (see [`SheetState::sync_presented`]).
    pub fn sync_presented(&mut self, presented: bool) -> Outcome {
        if !presented {
            self.tracker.cancel();
            self.pressed = None;
        }
        self.sheet.sync_presented(presented)
    }

    pub fn tick(&mut self, dt: Duration) {
        self.sheet.tick(dt);
    }

    /// Route a mouse event that the host has already decided belongs to the
    /// sheet layer.  `at` is when the event arrived.
    ///
    /// Presses on the sheet drag it.  Presses on the scrim dismiss only when
    /// released without moving; dragging across the scrim does nothing.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, at: Instant) -> SheetResponse {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = self.zones.hit(mouse.column, mouse.row);
                match self.pressed {
                    Some(_) => self.tracker.press(mouse.column, mouse.row, at),
                    None => self.tracker.cancel(),
                }
                SheetResponse::Idle
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let event = self.tracker.move_to(mouse.row, at);
                if let (Some(Zone::Sheet), Some(DragEvent::Changed { translation })) =
                    (self.pressed, event)
                {
                    self.sheet.drag_changed(translation);
                }
                SheetResponse::Idle
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let event = self.tracker.release(mouse.row, at);
                match (self.pressed.take(), event) {
                    (Some(Zone::Sheet), Some(DragEvent::Ended(sample))) => {
                        SheetResponse::Outcome(self.sheet.drag_ended(sample))
                    }
                    (Some(Zone::Sheet), Some(DragEvent::Tap { column, row })) => {
                        SheetResponse::Tap { column, row }
                    }
                    (Some(Zone::Scrim), Some(DragEvent::Tap { column, row })) => {
                        tracing::debug!(column, row, "scrim tapped");
                        SheetResponse::Outcome(self.sheet.tap_scrim())
                    }
                    _ => SheetResponse::Idle,
                }
            }
            _ => SheetResponse::Idle,
        }
    }
}

impl Default for ActionSheetState {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

// ───────────────────────────────────────── widget ────────────

/// The sheet widget.  Render it over the full area the scrim should cover.
pub struct ActionSheet<C> {
    content: C,
    max_width: Option<u16>,
}

impl<C: SheetContent> ActionSheet<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            max_width: None,
        }
    }

    /// Cap the sheet width; narrower sheets are centred horizontally.
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Render and return hit zones for mouse interaction.  The zones are
    /// also stored in `state`.
    pub fn render_and_hit(
        self,
        area: Rect,
        buf: &mut Buffer,
        state: &mut ActionSheetState,
    ) -> SheetHitZones {
        let zones = self.draw(area, buf, &mut state.sheet);
        state.zones = zones;
        zones
    }

    fn draw(self, area: Rect, buf: &mut Buffer, sheet: &mut SheetState) -> SheetHitZones {
        let upr = sheet.config().units_per_row;
        let width = self.max_width.map_or(area.width, |w| w.min(area.width));
        let x = area.x + (area.width - width) / 2;

        // ── measure ─────────────────────────────────────────────
        let content_rows = self.content.height(width.saturating_sub(2));
        let sheet_rows = content_rows.saturating_add(CHROME_ROWS).min(area.height);
        sheet.measure(f64::from(sheet_rows) * upr);

        // ── scrim ───────────────────────────────────────────────
        Scrim {
            opacity: sheet.presented_dim(),
        }
        .render(area, buf);

        let mut zones = SheetHitZones {
            scrim: area,
            ..SheetHitZones::default()
        };

        // ── placement ───────────────────────────────────────────
        let offset_rows = (sheet.presented_offset() / upr).round();
        let down = offset_rows.max(0.0) as u16;
        // The spacer only fills the rows above the sheet; content keeps its
        // measured height.
        let stretch =
            ((-offset_rows).max(0.0) as u16).min(area.height.saturating_sub(sheet_rows));
        let total = sheet_rows.saturating_add(stretch).min(area.height);

        let top = u32::from(area.bottom() - total) + u32::from(down);
        if total == 0 || top >= u32::from(area.bottom()) {
            return zones;
        }
        let top = top as u16;
        let visible = (area.bottom() - top).min(total);

        // ── draw off-screen, then copy the visible rows ─────────
        let mut scratch = Buffer::empty(Rect::new(0, 0, width, total));
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Rounded)
            .border_style(Theme::sheet_border_style())
            .title(Span::styled(HANDLE, Theme::handle_style()))
            .title_alignment(Alignment::Center)
            .style(Theme::sheet_style());
        let inner = block.inner(scratch.area);
        block.render(scratch.area, &mut scratch);

        // Content on top, stretch spacer below it.
        let content_area = Rect {
            height: inner.height.saturating_sub(stretch),
            ..inner
        };
        self.content.render(content_area, &mut scratch);

        for sy in 0..visible {
            for sx in 0..width {
                if let (Some(src), Some(dst)) =
                    (scratch.cell((sx, sy)), buf.cell_mut((x + sx, top + sy)))
                {
                    *dst = src.clone();
                }
            }
        }

        zones.sheet = Rect::new(x, top, width, visible);
        zones.content = Rect::new(
            x + content_area.x,
            top + content_area.y,
            content_area.width,
            content_area.height,
        )
        .intersection(zones.sheet);
        zones
    }
}

impl<C: SheetContent> StatefulWidget for ActionSheet<C> {
    type State = ActionSheetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        self.render_and_hit(area, buf, state);
    }
}
