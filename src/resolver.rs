//! Differential decoding of consecutive button states.
//!
//! The device sends one report per physical transition, so two consecutive
//! snapshots normally differ in exactly one bit. [`classify`] compares them:
//!
//! | previous vs current            | result                    |
//! |--------------------------------|---------------------------|
//! | both idle                      | [`EventKind::WakeUp`]     |
//! | one bit set in current only    | [`EventKind::KeyDown`]    |
//! | one bit set in previous only   | [`EventKind::KeyUp`]      |
//! | identical and non-zero         | [`Transition::Ambiguous`] |
//! | more than one bit differs      | [`Transition::MultiButton`] |
//!
//! The first idle report after activity is a plain release (one bit differs).
//! Only a second idle report in a row is a wake-up: the device replays an
//! all-zero report when it leaves its screensaver.
//!
//! Nothing here keeps state. The caller owns the previous snapshot.
//!
//! [`EventKind::WakeUp`]: crate::event::EventKind::WakeUp
//! [`EventKind::KeyDown`]: crate::event::EventKind::KeyDown
//! [`EventKind::KeyUp`]: crate::event::EventKind::KeyUp

use crate::event::ButtonEvent;
use crate::state::ButtonState;

/// Outcome of comparing two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A single, well-formed event.
    Event(ButtonEvent),
    /// Identical non-idle snapshots. The device should never repeat a held state.
    Ambiguous { mask: u16 },
    /// Several buttons changed at once. Not decomposed.
    MultiButton { changed: u16 },
}

impl Transition {
    /// The event, if this transition produced one.
    #[inline]
    pub fn event(self) -> Option<ButtonEvent> {
        match self {
            Transition::Event(e) => Some(e),
            _ => None,
        }
    }

    /// `true` when a protocol assumption was violated.
    #[inline]
    pub fn is_diagnostic(&self) -> bool {
        !matches!(self, Transition::Event(_))
    }
}

/// Classify the step from `previous` to `current`.
pub fn classify(current: ButtonState, previous: ButtonState) -> Transition {
    let changed = current.mask() ^ previous.mask();

    if changed == 0 {
        return if current.is_idle() {
            Transition::Event(ButtonEvent::wake_up())
        } else {
            Transition::Ambiguous {
                mask: current.mask(),
            }
        };
    }

    if changed & (changed - 1) != 0 {
        return Transition::MultiButton { changed };
    }

    let index = changed.trailing_zeros();
    let button = index as u8 + 1;
    if current.mask() & changed != 0 {
        Transition::Event(ButtonEvent::key_down(button))
    } else {
        Transition::Event(ButtonEvent::key_up(button))
    }
}

/// Event produced by the step from `previous` to `current`, if any.
///
/// Diagnostic cases yield `None`; use [`classify`] to tell them apart.
#[inline]
pub fn compare(current: ButtonState, previous: ButtonState) -> Option<ButtonEvent> {
    classify(current, previous).event()
}
