//! Report sources.
//!
//! A [`ReportSource`] hands out raw input reports one at a time. It is the only
//! seam between the decoder and the outside world: the HID backend implements it
//! over `hidapi`, and [`ScriptedSource`](crate::backends::virtual_input::ScriptedSource)
//! implements it over an in-memory queue.
//!
//! Sources do not decode anything. Opening, closing and reconnecting are the
//! source's (or the host's) business.

use crate::error::Result;
use crate::metadata::DeviceMeta;

pub trait ReportSource {
    /// Read one report.
    ///
    /// `Ok(None)` means nothing arrived within the source's timeout.
    fn read(&mut self) -> Result<Option<Vec<u8>>>;

    fn name(&self) -> &str;

    fn id(&self) -> &str;

    /// Finite sources return `true` once drained. Live devices never do.
    fn is_exhausted(&self) -> bool {
        false
    }

    fn metadata(&self) -> DeviceMeta {
        DeviceMeta::default()
    }
}

impl<S: ReportSource + ?Sized> ReportSource for Box<S> {
    fn read(&mut self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
    fn id(&self) -> &str {
        (**self).id()
    }
    fn is_exhausted(&self) -> bool {
        (**self).is_exhausted()
    }
    fn metadata(&self) -> DeviceMeta {
        (**self).metadata()
    }
}
