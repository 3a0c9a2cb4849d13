//! Demo application: state, event plumbing and input handling, plus the
//! host content the sheet is layered over.

pub mod event;
pub mod handler;
pub mod layout;
pub mod menu;
pub mod state;
pub mod theme;
pub mod view;
