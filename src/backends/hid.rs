//! `hidapi`-backed report source.
//!
//! [`HidReportSource`] opens one device by VID/PID and reads raw input reports
//! from it. It does not enumerate for the caller and does not reconnect: if the
//! device is missing, [`HidReportSource::open`] fails with
//! [`Error::DeviceNotFound`] and the host decides what to do next.

use crate::config::Config;
use crate::device::ReportSource;
use crate::error::{Error, Result};
use crate::metadata::DeviceMeta;
use hidapi::{DeviceInfo, HidApi, HidDevice};

pub struct HidReportSource {
    id: String,
    name: String,
    raw: HidDevice,
    buf: Vec<u8>,
    timeout_ms: i32,
    meta: DeviceMeta,
}

impl HidReportSource {
    /// Open the first device matching `config.vendor_id`/`config.product_id`.
    pub fn open(api: &HidApi, config: &Config) -> Result<Self> {
        let (vid, pid) = (config.vendor_id, config.product_id);
        let info = api
            .device_list()
            .find(|d| d.vendor_id() == vid && d.product_id() == pid)
            .ok_or(Error::DeviceNotFound { vid, pid })?;

        let device = info.open_device(api)?;
        Ok(Self::from_parts(info, device, config))
    }

    fn from_parts(info: &DeviceInfo, raw: HidDevice, config: &Config) -> Self {
        let meta = DeviceMeta {
            vid: Some(info.vendor_id()),
            pid: Some(info.product_id()),
            product_string: info.product_string().map(str::to_string),
            serial_number: info.serial_number().map(str::to_string),
            path: Some(info.path().to_string_lossy().into_owned()),
        };

        let name = info.product_string().unwrap_or("Unknown").to_string();
        let id = match info.serial_number() {
            Some(serial) if !serial.is_empty() => {
                format!("{:04x}:{:04x}:{serial}", info.vendor_id(), info.product_id())
            }
            _ => format!("{:04x}:{:04x}", info.vendor_id(), info.product_id()),
        };

        log::info!("opened {meta}");

        Self {
            id,
            name,
            raw,
            buf: vec![0u8; config.report_len],
            timeout_ms: config.read_timeout_ms,
            meta,
        }
    }
}

impl ReportSource for HidReportSource {
    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        let n = self.raw.read_timeout(&mut self.buf, self.timeout_ms)?;
        if n == 0 {
            return Ok(None);
        }

        let report = &self.buf[..n];

        #[cfg(feature = "debug-log")]
        log::trace!("{} read {} bytes: {:02x?}", self.id, n, report);

        Ok(Some(report.to_vec()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }
}
