//! Cross-engine click and key classification.
//!
//! Engines disagree on button encodings: the modern `which` field uses
//! 1/2/3 for left/middle/right while the legacy `button` field uses 1/2/4
//! for left/right/middle. The modern field wins when both are present.

use crate::input::types::{KeyAction, PointerButton, RawKeyEvent, RawPointerEvent};

/// Key code for the enter key.
const KEY_CODE_ENTER: u32 = 13;

/// Key code for the space key.
const KEY_CODE_SPACE: u32 = 32;

/// Classify a raw pointer event into a semantic button.
///
/// Returns `None` when neither field is present or the code is unrecognized;
/// callers must treat that as "unknown", never as a default category.
pub fn classify_pointer(event: &RawPointerEvent) -> Option<PointerButton> {
    if let Some(which) = event.which {
        return match which {
            1 => Some(PointerButton::Left),
            2 => Some(PointerButton::Middle),
            3 => Some(PointerButton::Right),
            _ => None,
        };
    }
    if let Some(button) = event.button {
        // Legacy codes: right and middle differ numerically from the
        // modern mapping.
        return match button {
            1 => Some(PointerButton::Left),
            2 => Some(PointerButton::Right),
            4 => Some(PointerButton::Middle),
            _ => None,
        };
    }
    None
}

/// Classify a raw keyboard event into a semantic key action.
pub fn classify_key(event: &RawKeyEvent) -> Option<KeyAction> {
    match event.key_code? {
        KEY_CODE_ENTER => Some(KeyAction::Enter),
        KEY_CODE_SPACE => Some(KeyAction::Space),
        _ => None,
    }
}
