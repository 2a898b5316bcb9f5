//! Logging.
//!
//! Everything in this crate logs through the [`log`] facade. Hosts that already
//! run a logger get our records for free; the rest can call [`init`] to install
//! [`StderrLogger`].
//!
//! [`EventLogger`] is a listener that writes each decoded event to the log.

use crate::event::ButtonEvent;
use crate::eventbus::EventListener;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

/// A listener that logs every event at `info`.
#[derive(Debug, Default)]
pub struct EventLogger {
    json: bool,
}

impl EventLogger {
    pub fn new() -> Self {
        EventLogger { json: false }
    }

    /// Log events as their JSON wire shape instead of `KeyDown(3)` form.
    pub fn json() -> Self {
        EventLogger { json: true }
    }

    fn render(&self, event: &ButtonEvent) -> String {
        if self.json {
            serde_json::to_string(event).unwrap_or_else(|_| event.to_string())
        } else {
            event.to_string()
        }
    }
}

impl EventListener for EventLogger {
    fn on_event(&mut self, event: &ButtonEvent) {
        log::info!(target: "deckwatch::event", "{}", self.render(event));
    }
}

/// Minimal `log` backend writing `[LEVEL target] message` lines to stderr.
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "[{:<5} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install [`StderrLogger`] as the global logger.
///
/// Fails if another logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
