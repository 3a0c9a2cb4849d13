//! Core state machine – sheet transitions, animation curves, and drag
//! recognition.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Units are
//! logical points; the UI layer converts them to terminal rows.

pub mod animation;
pub mod gesture;
pub mod sheet;
