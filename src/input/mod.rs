//! Raw interaction events and their semantic classification.
//!
//! Browser hosts hand over pointer and keyboard events with whichever button
//! fields their engine exposes; this module normalizes them into semantic
//! categories the tracker can act on.

pub mod classify;
pub mod types;

// Re-export commonly used types
pub use classify::{classify_key, classify_pointer};
pub use types::{InteractionEvent, KeyAction, PointerButton, RawKeyEvent, RawPointerEvent};
