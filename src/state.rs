//! Button state snapshots.
//!
//! A [`ButtonState`] is the decoded form of one input report: a 15-bit mask with
//! one bit per physical button. It is a plain `Copy` value; the poll loop keeps
//! the previous one around and hands both to the [`resolver`](crate::resolver).
//!
//! ## Report layout
//! ```text
//! offset  0..=3    header, ignored
//! offset  4..=18   one byte per button (button 1 at offset 4), 0 = released
//! offset 19..      padding, ignored
//! ```
//! Any non-zero byte counts as pressed; the magnitude is discarded.

use crate::error::ReportError;

/// Offset of the first button byte within a report.
pub const BUTTON_OFFSET: usize = 4;

/// Number of buttons carried by a report.
pub const BUTTON_COUNT: usize = 15;

/// Shortest buffer that still covers the whole button window.
pub const MIN_REPORT_LEN: usize = BUTTON_OFFSET + BUTTON_COUNT;

const MASK_BITS: u16 = (1 << BUTTON_COUNT) - 1;

/// Which buttons are held down in one report.
///
/// Bit `i` is button `i + 1`. Bits above 14 are always clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ButtonState {
    mask: u16,
}

impl ButtonState {
    /// No buttons held. Used as the initial "previous" state.
    pub const IDLE: ButtonState = ButtonState { mask: 0 };

    /// Decode a raw report.
    ///
    /// Only bytes [`BUTTON_OFFSET`]`..`[`MIN_REPORT_LEN`] are inspected.
    pub fn parse(report: &[u8]) -> Result<Self, ReportError> {
        let window = report
            .get(BUTTON_OFFSET..MIN_REPORT_LEN)
            .ok_or(ReportError::MalformedReport { len: report.len() })?;

        let mask = window
            .iter()
            .enumerate()
            .filter(|(_, &b)| b != 0)
            .fold(0u16, |acc, (i, _)| acc | (1u16 << i));

        Ok(Self { mask })
    }

    /// Build a state from a raw mask. Bits above 14 are dropped.
    #[inline]
    pub const fn from_mask(mask: u16) -> Self {
        Self {
            mask: mask & MASK_BITS,
        }
    }

    #[inline]
    pub const fn mask(&self) -> u16 {
        self.mask
    }

    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.mask == 0
    }

    /// Whether 1-indexed `button` is held. Out-of-range buttons never are.
    pub fn is_pressed(&self, button: u8) -> bool {
        match button {
            1..=15 => self.mask & (1 << (button - 1)) != 0,
            _ => false,
        }
    }

    /// Held buttons, 1-indexed, ascending.
    pub fn pressed(&self) -> impl Iterator<Item = u8> {
        let mask = self.mask;
        (0..BUTTON_COUNT as u8)
            .filter(move |&i| mask & (1u16 << i) != 0)
            .map(|i| i + 1)
    }

    /// Lowest held button, if any.
    #[inline]
    pub fn first_pressed(&self) -> Option<u8> {
        if self.mask == 0 {
            None
        } else {
            Some(self.mask.trailing_zeros() as u8 + 1)
        }
    }

    /// Number of held buttons.
    #[inline]
    pub fn count(&self) -> u32 {
        self.mask.count_ones()
    }
}
