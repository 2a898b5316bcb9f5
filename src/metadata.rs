//! Device metadata snapshot.
//!
//! [`DeviceMeta`] describes the device behind a [`ReportSource`](crate::device::ReportSource)
//! for logging and display. The HID backend fills it in at open time; scripted
//! sources leave everything `None`.
//!
//! `vid`/`pid` and `serial_number` are stable across reconnects. `path` is
//! platform-specific and may change between ports; treat it as diagnostic.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// USB Vendor ID (VID), if known.
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    pub pid: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    pub product_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial_number: Option<String>,

    /// OS path to the device. Opaque.
    pub path: Option<String>,
}

impl fmt::Display for DeviceMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.vid, self.pid) {
            (Some(vid), Some(pid)) => write!(f, "{vid:04x}:{pid:04x}")?,
            _ => f.write_str("????:????")?,
        }
        if let Some(product) = &self.product_string {
            write!(f, " {product}")?;
        }
        if let Some(serial) = &self.serial_number {
            write!(f, " [{serial}]")?;
        }
        Ok(())
    }
}
