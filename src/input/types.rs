//! Raw event types as delivered by the host, before classification.
//!
//! Raw events carry both the legacy `button` field and the modern `which`
//! field; either may be absent depending on the originating engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw pointer event as surfaced by the host.
///
/// `which` is the modern field (1=left, 2=middle, 3=right); `button` is the
/// legacy one (1=left, 2=right, 4=middle). The numeric codes differ between
/// the two and the classifier preserves that asymmetry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPointerEvent {
    /// Timestamp when the event occurred
    pub timestamp: Option<DateTime<Utc>>,
    /// Modern button field, when exposed
    pub which: Option<i32>,
    /// Legacy button field, when exposed
    pub button: Option<i32>,
}

impl RawPointerEvent {
    /// Create an event exposing only the modern `which` field.
    pub fn with_which(which: i32) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            which: Some(which),
            button: None,
        }
    }

    /// Create an event exposing only the legacy `button` field.
    pub fn with_button(button: i32) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            which: None,
            button: Some(button),
        }
    }
}

/// A raw keyboard event as surfaced by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawKeyEvent {
    /// Timestamp when the event occurred
    pub timestamp: Option<DateTime<Utc>>,
    /// Key code, when exposed
    pub key_code: Option<u32>,
}

impl RawKeyEvent {
    pub fn with_key_code(key_code: u32) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            key_code: Some(key_code),
        }
    }
}

/// Semantic pointer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Semantic keyboard category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Enter,
    Space,
}

/// Unified raw event type handed to the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InteractionEvent {
    Pointer(RawPointerEvent),
    Key(RawKeyEvent),
}

impl InteractionEvent {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            InteractionEvent::Pointer(e) => e.timestamp,
            InteractionEvent::Key(e) => e.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_constructors() {
        let modern = RawPointerEvent::with_which(1);
        assert_eq!(modern.which, Some(1));
        assert!(modern.button.is_none());

        let legacy = RawPointerEvent::with_button(2);
        assert!(legacy.which.is_none());
        assert_eq!(legacy.button, Some(2));
    }

    #[test]
    fn test_interaction_event_timestamp() {
        let event = InteractionEvent::Key(RawKeyEvent::with_key_code(13));
        assert!(event.timestamp().is_some());

        let bare = InteractionEvent::Pointer(RawPointerEvent::default());
        assert!(bare.timestamp().is_none());
    }
}
