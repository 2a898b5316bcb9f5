//! Error types.
//!
//! [`ReportError`] covers decoding of a single report and is the only error the
//! decoding core can produce. [`Error`] is the crate-level error returned by the
//! plumbing around it (sources, config, the monitor loop).

use thiserror::Error;

/// A report could not be decoded into a [`ButtonState`](crate::state::ButtonState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The buffer does not reach the end of the button window.
    #[error("malformed report: {len} byte(s), need at least 19")]
    MalformedReport { len: usize },
}

/// A [`ButtonEvent`](crate::event::ButtonEvent) with a kind/target pair that
/// cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("invalid target {target:?} for {kind:?}")]
    InvalidTarget {
        kind: crate::event::EventKind,
        target: Option<u8>,
    },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[cfg(feature = "hid")]
    #[error("hid error: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("no device matching {vid:04x}:{pid:04x}")]
    DeviceNotFound { vid: u16, pid: u16 },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
