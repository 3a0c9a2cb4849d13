//! A draggable, dismissible bottom action sheet for Ratatui.
//!
//! * [`core`]: the presentation state machine, animation curves and drag
//!   recognition.  No rendering.
//! * [`ui`]: the sheet widget, the scrim, and [`ActionSheetExt`], which
//!   layers a sheet over any widget.
//!
//! The host owns the "presented" flag.  It passes the flag in every frame
//! and clears it whenever an [`Outcome`] or [`SheetResponse`] reports that
//! the sheet dismissed itself.

pub mod core;
pub mod ui;

pub use crate::core::animation::Curve;
pub use crate::core::gesture::GestureSample;
pub use crate::core::sheet::{Outcome, SheetConfig, SheetState};
pub use crate::ui::action_sheet::{
    ActionSheet, ActionSheetState, FixedHeight, SheetContent, SheetHitZones, SheetResponse,
};
pub use crate::ui::compose::{route_mouse, ActionSheetExt, Layer, Routed, WithActionSheet};
