//! Button events.
//!
//! The resolver turns two consecutive [`ButtonState`](crate::state::ButtonState)s into
//! at most one [`ButtonEvent`]. Events are device-agnostic and carry a 1-indexed
//! button number, matching the labels printed on the device.
//!
//! ## Wire shape
//! Events serialize as `{ "kind": ..., "target": ... }`:
//! - `{"kind":"KeyDown","target":3}`
//! - `{"kind":"KeyUp","target":3}`
//! - `{"kind":"WakeUp","target":null}`

use crate::error::EventError;
use crate::state::BUTTON_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A button went down.
    KeyDown,
    /// A button came back up.
    KeyUp,
    /// The device resumed from its idle/screensaver state.
    WakeUp,
}

/// One decoded event.
///
/// `target` is `Some(1..=15)` for key events and `None` for [`EventKind::WakeUp`].
/// Every constructor, deserialization included, upholds that pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireEvent")]
pub struct ButtonEvent {
    kind: EventKind,
    target: Option<u8>,
}

#[derive(Deserialize)]
struct WireEvent {
    kind: EventKind,
    target: Option<u8>,
}

impl TryFrom<WireEvent> for ButtonEvent {
    type Error = EventError;

    fn try_from(wire: WireEvent) -> Result<Self, Self::Error> {
        ButtonEvent::new(wire.kind, wire.target)
    }
}

const fn is_button(button: u8) -> bool {
    button >= 1 && button as usize <= BUTTON_COUNT
}

impl ButtonEvent {
    /// Checked constructor.
    pub fn new(kind: EventKind, target: Option<u8>) -> Result<Self, EventError> {
        match (kind, target) {
            (EventKind::WakeUp, None) => Ok(Self::wake_up()),
            (EventKind::KeyDown | EventKind::KeyUp, Some(b)) if is_button(b) => {
                Ok(Self { kind, target })
            }
            _ => Err(EventError::InvalidTarget { kind, target }),
        }
    }

    /// # Panics
    /// If `button` is outside `1..=15`.
    #[inline]
    pub const fn key_down(button: u8) -> Self {
        assert!(is_button(button), "button out of range");
        Self {
            kind: EventKind::KeyDown,
            target: Some(button),
        }
    }

    /// # Panics
    /// If `button` is outside `1..=15`.
    #[inline]
    pub const fn key_up(button: u8) -> Self {
        assert!(is_button(button), "button out of range");
        Self {
            kind: EventKind::KeyUp,
            target: Some(button),
        }
    }

    #[inline]
    pub const fn wake_up() -> Self {
        Self {
            kind: EventKind::WakeUp,
            target: None,
        }
    }

    #[inline]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// 1-indexed button for key events, `None` for wake-up.
    #[inline]
    pub const fn target(&self) -> Option<u8> {
        self.target
    }

    /// `true` for key-down and key-up.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self.kind, EventKind::KeyDown | EventKind::KeyUp)
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.target) {
            (EventKind::WakeUp, _) => f.write_str("WakeUp"),
            (kind, Some(button)) => write!(f, "{kind:?}({button})"),
            (kind, None) => write!(f, "{kind:?}"),
        }
    }
}
