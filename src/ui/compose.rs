//! Composition wrapper: attach an action sheet to any widget.
//!
//! ```ignore
//! let view = HostView { .. }.action_sheet(state.presented, || menu(&state));
//! frame.render_stateful_widget(view, frame.area(), &mut state.sheet);
//! ```
//!
//! The wrapper holds no state; each call site keeps its own
//! [`ActionSheetState`], so any number of wrapped views can coexist.

use std::time::Instant;

use crossterm::event::MouseEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
};

use super::action_sheet::{ActionSheet, ActionSheetState, SheetContent, SheetResponse};

// ───────────────────────────────────────── hit-testing ───────

/// The layer that receives pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Host,
    Sheet,
}

impl Layer {
    /// Host content is interactive only while the sheet is not presented,
    /// and the sheet only while it is.
    pub fn hit_target(presented: bool) -> Self {
        if presented {
            Layer::Sheet
        } else {
            Layer::Host
        }
    }
}

/// Where a mouse event ended up.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routed {
    /// The host should handle the event itself.
    Host,
    /// The sheet consumed it.
    Sheet(SheetResponse),
}

/// Send `mouse` to whichever layer is active.
pub fn route_mouse(
    presented: bool,
    state: &mut ActionSheetState,
    mouse: MouseEvent,
    at: Instant,
) -> Routed {
    match Layer::hit_target(presented) {
        Layer::Host => Routed::Host,
        Layer::Sheet => Routed::Sheet(state.handle_mouse(mouse, at)),
    }
}

// ───────────────────────────────────────── wrapper ───────────

/// Host content with an action sheet layered on top.
pub struct WithActionSheet<H, F> {
    host: H,
    presented: bool,
    content: F,
    max_width: Option<u16>,
}

impl<H, F> WithActionSheet<H, F> {
    /// Cap the sheet width (see [`ActionSheet::max_width`]).
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Extension point available on every widget.
pub trait ActionSheetExt: Widget + Sized {
    /// Overlay an action sheet.  `content` builds the sheet's inner widget;
    /// it runs at most once per frame and only while the sheet can be seen.
    fn action_sheet<C, F>(self, presented: bool, content: F) -> WithActionSheet<Self, F>
    where
        C: SheetContent,
        F: FnOnce() -> C,
    {
        WithActionSheet {
            host: self,
            presented,
            content,
            max_width: None,
        }
    }
}

impl<W: Widget> ActionSheetExt for W {}

impl<H, F, C> StatefulWidget for WithActionSheet<H, F>
where
    H: Widget,
    C: SheetContent,
    F: FnOnce() -> C,
{
    type State = ActionSheetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Any dismissal reported here mirrors a flag that is already false.
        let _ = state.sync_presented(self.presented);

        self.host.render(area, buf);

        if !state.sheet().is_visible() {
            state.clear_zones();
            return;
        }
        let mut sheet = ActionSheet::new((self.content)());
        if let Some(width) = self.max_width {
            sheet = sheet.max_width(width);
        }
        sheet.render_and_hit(area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::widgets::Paragraph;

    use crate::ui::action_sheet::FixedHeight;

    const AREA: Rect = Rect::new(0, 0, 16, 10);

    fn content() -> FixedHeight<Paragraph<'static>> {
        FixedHeight {
            widget: Paragraph::new("menu"),
            height: 2,
        }
    }

    fn render(presented: bool, state: &mut ActionSheetState, builds: &Cell<u32>) -> Buffer {
        let mut buf = Buffer::empty(AREA);
        Paragraph::new("host").action_sheet(presented, || {
            builds.set(builds.get() + 1);
            content()
        })
        .render(AREA, &mut buf, state);
        buf
    }

    fn button(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 1,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(row: u16) -> MouseEvent {
        button(MouseEventKind::Down(MouseButton::Left), row)
    }

    #[test]
    fn hit_target_follows_the_flag() {
        assert_eq!(Layer::hit_target(true), Layer::Sheet);
        assert_eq!(Layer::hit_target(false), Layer::Host);
    }

    #[test]
    fn dismissed_wrapper_shows_only_the_host() {
        let builds = Cell::new(0);
        let mut state = ActionSheetState::default();

        // The first frame builds the content once to measure it.
        let buf = render(false, &mut state, &builds);
        assert_eq!(buf[(0, 0)].symbol(), "h");
        assert_eq!(builds.get(), 1);

        render(false, &mut state, &builds);
        assert_eq!(builds.get(), 1, "hidden sheet content was rebuilt");
        assert_eq!(state.zones().sheet, Rect::default());
    }

    #[test]
    fn presenting_slides_the_sheet_in() {
        let builds = Cell::new(0);
        let mut state = ActionSheetState::default();
        render(false, &mut state, &builds);

        render(true, &mut state, &builds);
        assert!(state.sheet().is_animating());
        state.tick(Duration::from_secs(1));

        let buf = render(true, &mut state, &builds);
        assert_eq!(state.zones().sheet, Rect::new(0, 7, 16, 3));
        assert_eq!(buf[(1, 8)].symbol(), "m");
        // Host text is still there under the scrim.
        assert_eq!(buf[(0, 0)].symbol(), "h");
    }

    #[test]
    fn wrappers_do_not_share_state() {
        let builds = Cell::new(0);
        let mut a = ActionSheetState::default();
        let mut b = ActionSheetState::default();
        render(true, &mut a, &builds);
        render(false, &mut b, &builds);

        a.sheet_mut().drag_changed(40.0);
        assert_eq!(a.sheet().drag_offset(), 40.0);
        assert_eq!(b.sheet().drag_offset(), b.sheet().sheet_height());
    }

    #[test]
    fn host_gets_input_while_dismissed() {
        let mut state = ActionSheetState::default();
        assert_eq!(
            route_mouse(false, &mut state, click(0), Instant::now()),
            Routed::Host
        );
    }

    #[test]
    fn sheet_gets_input_while_presented() {
        let builds = Cell::new(0);
        let mut state = ActionSheetState::default();
        render(true, &mut state, &builds);
        state.tick(Duration::from_secs(1));
        render(true, &mut state, &builds);

        let at = Instant::now();
        let pressed = route_mouse(true, &mut state, click(0), at);
        assert_eq!(pressed, Routed::Sheet(SheetResponse::Idle));
        let release = button(MouseEventKind::Up(MouseButton::Left), 0);
        let routed = route_mouse(true, &mut state, release, at);
        assert!(matches!(
            routed,
            Routed::Sheet(SheetResponse::Outcome(o)) if o.dismissed
        ));
    }
}
