//! Poll loop.
//!
//! [`Monitor`] ties a [`ReportSource`] to the decoder. It owns the "previous"
//! [`ButtonState`] slot, so every report is compared against exactly the one
//! before it. Decoded events go to the monitor's [`EventBus`].
//!
//! # Failure policy
//! - A malformed report is logged at `warn` and skipped. The previous state is
//!   not touched.
//! - Ambiguous and multi-button transitions are logged at `warn`. No event is
//!   emitted, and the previous state still advances to the new report.
//! - Source errors end [`Monitor::run`]. Nothing is retried here.

use crate::device::ReportSource;
use crate::error::Result;
use crate::event::ButtonEvent;
use crate::eventbus::EventBus;
use crate::resolver::{self, Transition};
use crate::state::ButtonState;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of one [`Monitor::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// No report was available.
    Idle,
    /// The report could not be decoded and was dropped.
    Skipped,
    /// The report decoded, but produced no event.
    Quiet(Transition),
    /// The report produced an event, already dispatched to the bus.
    Event(ButtonEvent),
}

/// Counters for one [`Monitor::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: u64,
    pub events: u64,
    pub skipped: u64,
    pub diagnostics: u64,
}

pub struct Monitor<S: ReportSource> {
    source: S,
    previous: ButtonState,
    bus: EventBus,
}

impl<S: ReportSource> Monitor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: ButtonState::IDLE,
            bus: EventBus::new(),
        }
    }

    pub fn with_bus(source: S, bus: EventBus) -> Self {
        Self {
            source,
            previous: ButtonState::IDLE,
            bus,
        }
    }

    /// Last successfully decoded state.
    #[inline]
    pub fn previous(&self) -> ButtonState {
        self.previous
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Read and decode one report.
    pub fn step(&mut self) -> Result<Step> {
        let Some(report) = self.source.read()? else {
            return Ok(Step::Idle);
        };

        let current = match ButtonState::parse(&report) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("{}: {e}, skipping", self.source.id());
                return Ok(Step::Skipped);
            }
        };

        let transition = resolver::classify(current, self.previous);
        log::debug!(
            "{}: {:015b} -> {:015b} {:?}",
            self.source.id(),
            self.previous.mask(),
            current.mask(),
            transition
        );
        self.previous = current;

        match transition {
            Transition::Event(event) => {
                self.bus.emit(&event);
                Ok(Step::Event(event))
            }
            Transition::Ambiguous { mask } => {
                log::warn!(
                    "{}: repeated held state {mask:015b}, expected one change per report",
                    self.source.id()
                );
                Ok(Step::Quiet(transition))
            }
            Transition::MultiButton { changed } => {
                log::warn!(
                    "{}: {} buttons changed at once ({changed:015b}), dropping transition",
                    self.source.id(),
                    changed.count_ones()
                );
                Ok(Step::Quiet(transition))
            }
        }
    }

    /// Step until `stop` is set or the source runs dry.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        log::info!("monitoring {} ({})", self.source.name(), self.source.id());

        while !stop.load(Ordering::Relaxed) {
            if self.source.is_exhausted() {
                log::debug!("{}: source exhausted", self.source.id());
                break;
            }

            match self.step() {
                Ok(Step::Idle) => {}
                Ok(Step::Skipped) => {
                    summary.reports += 1;
                    summary.skipped += 1;
                }
                Ok(Step::Quiet(_)) => {
                    summary.reports += 1;
                    summary.diagnostics += 1;
                }
                Ok(Step::Event(_)) => {
                    summary.reports += 1;
                    summary.events += 1;
                }
                Err(e) => {
                    log::error!("{}: read failed: {e}", self.source.id());
                    return Err(e);
                }
            }
        }

        log::info!(
            "stopped {}: {} report(s), {} event(s)",
            self.source.id(),
            summary.reports,
            summary.events
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::ScriptedSource;

    /// Per-thread log capture, so parallel tests only see their own records.
    mod capture {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::cell::RefCell;
        use std::sync::Once;

        thread_local! {
            static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
        }

        struct Recorder;

        impl Log for Recorder {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }
            fn log(&self, record: &Record) {
                RECORDS.with(|r| {
                    r.borrow_mut()
                        .push((record.level(), record.args().to_string()))
                });
            }
            fn flush(&self) {}
        }

        static RECORDER: Recorder = Recorder;
        static INSTALL: Once = Once::new();

        pub fn install() {
            INSTALL.call_once(|| {
                log::set_logger(&RECORDER).expect("logger already set");
                log::set_max_level(LevelFilter::Trace);
            });
            RECORDS.with(|r| r.borrow_mut().clear());
        }

        pub fn warnings() -> Vec<String> {
            RECORDS.with(|r| {
                r.borrow()
                    .iter()
                    .filter(|(level, _)| *level == Level::Warn)
                    .map(|(_, msg)| msg.clone())
                    .collect()
            })
        }
    }

    fn source() -> ScriptedSource {
        ScriptedSource::new("scripted:0", "Scripted")
    }

    #[test]
    fn starts_idle() {
        let m = Monitor::new(source());
        assert_eq!(m.previous(), ButtonState::IDLE);
    }

    #[test]
    fn step_reports_event_and_advances() {
        let mut src = source();
        src.push_held(&[3]);
        let mut m = Monitor::new(src);

        assert_eq!(m.step().unwrap(), Step::Event(ButtonEvent::key_down(3)));
        assert!(m.previous().is_pressed(3));
    }

    #[test]
    fn malformed_report_keeps_previous() {
        let mut src = source();
        src.push_held(&[1]).feed(vec![0u8; 10]).push_idle();
        let mut m = Monitor::new(src);

        m.step().unwrap();
        assert_eq!(m.step().unwrap(), Step::Skipped);
        assert!(m.previous().is_pressed(1));
        assert_eq!(m.step().unwrap(), Step::Event(ButtonEvent::key_up(1)));
    }

    #[test]
    fn ambiguous_report_advances_without_event() {
        let mut src = source();
        src.push_held(&[2]).push_held(&[2]).push_idle();
        let mut m = Monitor::new(src);

        m.step().unwrap();
        assert_eq!(
            m.step().unwrap(),
            Step::Quiet(Transition::Ambiguous { mask: 0b10 })
        );
        assert_eq!(m.step().unwrap(), Step::Event(ButtonEvent::key_up(2)));
    }

    #[test]
    fn multi_button_report_advances_previous() {
        let mut src = source();
        src.push_held(&[1, 2]).push_held(&[1]);
        let mut m = Monitor::new(src);

        assert!(matches!(
            m.step().unwrap(),
            Step::Quiet(Transition::MultiButton { changed: 0b11 })
        ));
        assert_eq!(m.step().unwrap(), Step::Event(ButtonEvent::key_up(2)));
    }

    #[test]
    fn each_dropped_report_logs_one_warning() {
        capture::install();

        let mut src = source();
        src.push_held(&[2])
            .push_held(&[2]) // same held state twice
            .feed(vec![0u8; 5]) // too short
            .push_held(&[2, 3, 4]) // two buttons at once
            .push_idle() // three buttons at once
            .push_idle();
        let mut m = Monitor::new(src);

        let mut dropped = 0;
        while !m.source().is_exhausted() {
            match m.step().unwrap() {
                Step::Skipped | Step::Quiet(_) => dropped += 1,
                _ => {}
            }
        }

        let warnings = capture::warnings();
        assert_eq!(dropped, 4);
        assert_eq!(warnings.len(), dropped, "{warnings:?}");
        assert!(warnings.iter().all(|w| w.starts_with("scripted:0:")));
        assert!(warnings[0].contains("repeated held state"));
        assert!(warnings[1].contains("malformed report"));
        assert!(warnings[2].contains("2 buttons changed"));
        assert!(warnings[3].contains("3 buttons changed"));
    }

    #[test]
    fn clean_session_logs_no_warnings() {
        capture::install();

        let mut src = source();
        src.push_held(&[7]).push_idle().push_idle();
        let summary = Monitor::new(src).run(&AtomicBool::new(false)).unwrap();

        assert_eq!(summary.events, 3);
        assert!(capture::warnings().is_empty());
    }

    #[test]
    fn timeout_is_idle() {
        let mut src = source();
        src.push_timeout();
        let mut m = Monitor::new(src);
        assert_eq!(m.step().unwrap(), Step::Idle);
    }

    #[test]
    fn run_stops_when_flag_is_set() {
        let mut src = source();
        src.push_held(&[1]).push_idle();
        let mut m = Monitor::new(src);

        let stop = AtomicBool::new(true);
        let summary = m.run(&stop).unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(m.source().remaining(), 2);
    }

    #[test]
    fn run_counts_until_exhausted() {
        let mut src = source();
        src.push_held(&[4])
            .push_timeout()
            .feed(vec![1, 2, 3])
            .push_held(&[4, 5, 6])
            .push_idle()
            .push_idle();
        let mut m = Monitor::new(src);

        let summary = m.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                reports: 5,
                events: 2,
                skipped: 1,
                diagnostics: 2,
            }
        );
    }
}
