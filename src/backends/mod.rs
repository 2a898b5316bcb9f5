//! Report sources for `deckwatch`.
//!
//! Implementations of [`ReportSource`](crate::device::ReportSource).
//!
//! # Feature flags
//! - **`hid`** — enables the `hidapi` backend (default).
//! - **`debug-log`** — traces every raw HID read at `trace` level.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

pub mod virtual_input;
