//! In-memory report source.
//!
//! [`ScriptedSource`] replays a queue of raw reports. Tests and the offline demo
//! use it in place of real hardware; it also accepts deliberately broken
//! reports so the monitor's skip path can be exercised.

use crate::device::ReportSource;
use crate::error::Result;
use crate::state::{BUTTON_COUNT, BUTTON_OFFSET, MIN_REPORT_LEN};
use std::collections::VecDeque;

/// Length of the reports built by the `push_*` helpers.
const SCRIPTED_REPORT_LEN: usize = 32;

#[derive(Debug, Default)]
pub struct ScriptedSource {
    id: String,
    name: String,
    reports: VecDeque<Option<Vec<u8>>>,
}

impl ScriptedSource {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            reports: VecDeque::new(),
        }
    }

    /// Queue a raw report as-is.
    pub fn feed(&mut self, report: Vec<u8>) -> &mut Self {
        self.reports.push_back(Some(report));
        self
    }

    /// Queue a report with the given 1-indexed buttons held.
    ///
    /// Buttons outside `1..=15` are ignored.
    pub fn push_held(&mut self, buttons: &[u8]) -> &mut Self {
        let mut report = vec![0u8; SCRIPTED_REPORT_LEN.max(MIN_REPORT_LEN)];
        for &b in buttons {
            if (1..=BUTTON_COUNT as u8).contains(&b) {
                report[BUTTON_OFFSET + (b as usize - 1)] = 1;
            }
        }
        self.feed(report)
    }

    /// Queue an all-zero report.
    pub fn push_idle(&mut self) -> &mut Self {
        self.push_held(&[])
    }

    /// Queue a read that returns nothing, as a timed-out device read would.
    pub fn push_timeout(&mut self) -> &mut Self {
        self.reports.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.reports.len()
    }
}

impl ReportSource for ScriptedSource {
    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.reports.pop_front().flatten())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn is_exhausted(&self) -> bool {
        self.reports.is_empty()
    }
}
