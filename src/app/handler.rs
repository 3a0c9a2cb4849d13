//! Input handling: maps key/mouse events to state mutations.
//!
//! While the sheet is presented it owns all input; otherwise the host list
//! does.  Mouse events go through [`route_mouse`] so that decision lives in
//! one place.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use action_sheet::{route_mouse, Routed, SheetResponse};

use super::layout::AppLayout;
use super::menu::{ActionMenu, SheetAction};
use super::state::AppState;
use crate::config::Action;

/// Process a key event, dispatching on which layer is active.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    if state.presented {
        handle_sheet_key(state, action);
    } else {
        handle_host_key(state, action);
    }
}

fn handle_host_key(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.list_state.select_prev(),
        Action::MoveDown => state.list_state.select_next(state.items.len()),
        Action::Confirm => state.present_sheet(),
        Action::Quit => state.should_quit = true,
        Action::Dismiss => state.status_message = None,
    }
}

fn handle_sheet_key(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.sheet_selected = state.sheet_selected.saturating_sub(1),
        Action::MoveDown => {
            if state.sheet_selected + 1 < SheetAction::ALL.len() {
                state.sheet_selected += 1;
            }
        }
        Action::Confirm => {
            let action = SheetAction::ALL[state.sheet_selected.min(SheetAction::ALL.len() - 1)];
            state.choose(action);
        }
        Action::Dismiss => state.dismiss_sheet(),
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event that arrived at `at`.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, at: Instant) {
    match route_mouse(state.presented, &mut state.sheet, mouse, at) {
        Routed::Host => handle_host_mouse(state, mouse),
        Routed::Sheet(SheetResponse::Outcome(outcome)) => state.apply(outcome),
        Routed::Sheet(SheetResponse::Tap { row, .. }) => {
            if let Some(idx) = ActionMenu::item_at(state.sheet.zones().content, row) {
                state.sheet_selected = idx;
                state.choose(SheetAction::ALL[idx]);
            }
        }
        Routed::Sheet(SheetResponse::Idle) => {}
    }
}

fn handle_host_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::from_area(state.terminal_area);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(idx) = layout.list_row(mouse.column, mouse.row, state.list_state.offset)
            else {
                return;
            };
            if idx >= state.items.len() {
                return;
            }
            // Clicking the highlighted row opens its actions.
            if idx == state.list_state.selected {
                state.present_sheet();
            } else {
                state.list_state.selected = idx;
            }
        }
        MouseEventKind::ScrollDown => state.list_state.select_next(state.items.len()),
        MouseEventKind::ScrollUp => state.list_state.select_prev(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::{buffer::Buffer, layout::Rect};

    use crate::app::view;
    use crate::config::AppConfig;

    const AREA: Rect = Rect::new(0, 0, 40, 20);

    fn state(presented: bool) -> AppState {
        let items = ["alpha.txt", "beta.png", "gamma.rs"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut state = AppState::new(items, AppConfig::default(), presented);
        frame(&mut state);
        state
    }

    fn frame(state: &mut AppState) -> Buffer {
        let mut buf = Buffer::empty(AREA);
        view::draw(state, AREA, &mut buf);
        buf
    }

    /// Run the animations to rest and draw once so hit zones are current.
    fn settle(state: &mut AppState) {
        for _ in 0..200 {
            state.sheet.tick(Duration::from_millis(16));
        }
        frame(state);
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn sheet_top(state: &AppState) -> u16 {
        state.sheet.zones().sheet.y
    }

    #[test]
    fn starts_dismissed_and_off_screen() {
        let state = state(false);
        let sheet = state.sheet.sheet();
        assert_eq!(sheet.drag_offset(), sheet.sheet_height());
        assert_eq!(sheet.dim_opacity(), 0.0);
        assert_eq!(state.sheet.zones().sheet, Rect::default());
    }

    #[test]
    fn confirm_presents_and_escape_dismisses() {
        let mut state = state(false);
        handle_key(&mut state, press(KeyCode::Enter));
        assert!(state.presented);
        settle(&mut state);
        assert_eq!(state.sheet.sheet().presented_offset(), 0.0);
        assert_eq!(state.sheet.sheet().presented_dim(), 0.5);

        handle_key(&mut state, press(KeyCode::Esc));
        assert!(!state.presented);
        assert_eq!(state.last_choice, None);
    }

    #[test]
    fn flicking_the_sheet_down_clears_the_flag() {
        let mut state = state(true);
        settle(&mut state);
        let top = sheet_top(&state);

        let t0 = Instant::now();
        let ms = Duration::from_millis;
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 20, top), t0);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 20, top + 4), t0 + ms(15));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 20, top + 8), t0 + ms(30));
        assert!(state.presented);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 20, top + 10), t0 + ms(45));

        assert!(!state.presented);
    }

    #[test]
    fn slow_release_springs_back() {
        let mut state = state(true);
        settle(&mut state);
        let top = sheet_top(&state);

        let t0 = Instant::now();
        let ms = Duration::from_millis;
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 20, top), t0);
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 20, top + 3), t0 + ms(50));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 20, top + 3), t0 + ms(600));

        assert!(state.presented);
        settle(&mut state);
        assert_eq!(state.sheet.sheet().presented_offset(), 0.0);
        assert_eq!(state.sheet.sheet().presented_dim(), 0.5);
    }

    #[test]
    fn scrim_click_dismisses_without_touching_the_list() {
        let mut state = state(true);
        settle(&mut state);

        // Row 2 is a list row under the scrim.
        let t0 = Instant::now();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 5, 2), t0);
        assert!(state.presented);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 5, 2), t0);
        assert!(!state.presented);
        assert_eq!(state.list_state.selected, 0);
    }

    #[test]
    fn tapping_an_action_runs_it() {
        let mut state = state(false);
        handle_key(&mut state, press(KeyCode::Down));
        handle_key(&mut state, press(KeyCode::Enter));
        settle(&mut state);

        let content = state.sheet.zones().content;
        let delete_row = content.y + 2 + 4;
        let t0 = Instant::now();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 10, delete_row), t0);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 10, delete_row), t0);

        assert!(!state.presented);
        assert_eq!(state.last_choice.as_deref(), Some("Delete beta.png"));
        assert_eq!(state.items, vec!["alpha.txt", "gamma.rs"]);
    }

    #[test]
    fn keyboard_choice_duplicates() {
        let mut state = state(false);
        handle_key(&mut state, press(KeyCode::Enter));
        handle_key(&mut state, press(KeyCode::Down));
        handle_key(&mut state, press(KeyCode::Down));
        handle_key(&mut state, press(KeyCode::Enter));

        assert!(!state.presented);
        assert_eq!(state.items[1], "alpha.txt copy");
        assert!(state.status_message.is_some());
    }

    #[test]
    fn host_clicks_select_then_open() {
        let mut state = state(false);
        // List content starts one row below the top border.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 5, 3), Instant::now());
        assert_eq!(state.list_state.selected, 2);
        assert!(!state.presented);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 5, 3), Instant::now());
        assert!(state.presented);

        // The release of the opening click lands on the sheet layer.
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 5, 3), Instant::now());
        assert!(state.presented);
    }

    #[test]
    fn host_sheet_and_flag_stay_in_step_across_frames() {
        let mut state = state(false);
        handle_key(&mut state, press(KeyCode::Enter));
        settle(&mut state);
        state.presented = false;
        frame(&mut state);
        settle(&mut state);

        assert_eq!(state.sheet.zones().sheet, Rect::default());
        assert_eq!(state.sheet.sheet().presented_dim(), 0.0);
    }
}
