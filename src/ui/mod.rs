//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* sheet state and turns it into cells on the
//! terminal.  No state transitions are decided here; they are only
//! triggered from mouse input and read back for drawing.

pub mod action_sheet;
pub mod compose;
pub mod scrim;
pub mod theme;
