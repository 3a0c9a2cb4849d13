//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use chrono::Local;
use ratatui::layout::Rect;

use action_sheet::{ActionSheetState, Outcome};

use super::menu::SheetAction;
use super::view::HostListState;
use crate::config::AppConfig;

/// Top-level application state.
pub struct AppState {
    /// Host content: the items the sheet offers actions for.
    pub items: Vec<String>,
    pub list_state: HostListState,
    /// The presentation flag.  Owned here; the sheet only ever clears it,
    /// through [`AppState::apply`].
    pub presented: bool,
    pub sheet: ActionSheetState,
    /// Highlighted row in the sheet's action list.
    pub sheet_selected: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last action chosen from the sheet, printed on exit.
    pub last_choice: Option<String>,
    pub config: AppConfig,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(items: Vec<String>, config: AppConfig, presented: bool) -> Self {
        Self {
            items,
            list_state: HostListState::default(),
            presented,
            sheet: ActionSheetState::new(config.sheet_config()),
            sheet_selected: 0,
            status_message: None,
            last_choice: None,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.list_state.selected).map(String::as_str)
    }

    /// Clear the presentation flag if `outcome` dismissed the sheet.
    pub fn apply(&mut self, outcome: Outcome) {
        outcome.notify(|| {
            tracing::info!("sheet dismissed itself");
            self.presented = false;
        });
    }

    /// Push the current flag into the sheet.
    pub fn sync_sheet(&mut self) {
        let outcome = self.sheet.sync_presented(self.presented);
        self.apply(outcome);
    }

    /// Host side: raise the sheet for the selected item.
    pub fn present_sheet(&mut self) {
        if self.selected_item().is_none() {
            self.status_message = Some("Nothing to act on".into());
            return;
        }
        self.presented = true;
        self.sheet_selected = 0;
        self.sync_sheet();
    }

    /// Sheet side: slide away and clear the flag.
    pub fn dismiss_sheet(&mut self) {
        let outcome = self.sheet.sheet_mut().dismiss(true);
        self.apply(outcome);
    }

    /// Run `action` on the selected item and close the sheet.
    pub fn choose(&mut self, action: SheetAction) {
        if let Some(item) = self.selected_item().map(str::to_string) {
            match action {
                SheetAction::Cancel => {}
                SheetAction::Delete => {
                    self.items.remove(self.list_state.selected);
                    if self.list_state.selected >= self.items.len() {
                        self.list_state.selected = self.items.len().saturating_sub(1);
                    }
                    self.record(action, &item);
                }
                SheetAction::Duplicate => {
                    self.items
                        .insert(self.list_state.selected + 1, format!("{item} copy"));
                    self.record(action, &item);
                }
                SheetAction::Open | SheetAction::Rename | SheetAction::Share => {
                    self.record(action, &item);
                }
            }
        }
        self.dismiss_sheet();
    }

    fn record(&mut self, action: SheetAction, item: &str) {
        let choice = format!("{} {item}", action.label());
        tracing::info!(%choice, "action chosen");
        self.status_message = Some(format!("{}  {choice}", Local::now().format("%H:%M:%S")));
        self.last_choice = Some(choice);
    }
}
