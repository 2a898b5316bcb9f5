//! Monitor configuration.
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! vendor_id = 0x0fd9
//! product_id = 0x0080
//! read_timeout_ms = 100
//! report_len = 512
//! log_level = "info"
//! ```

use crate::error::{Error, Result};
use crate::state::MIN_REPORT_LEN;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Elgato.
pub const DEFAULT_VENDOR_ID: u16 = 0x0fd9;
/// Stream Deck whose reports carry 15 one-byte button slots.
pub const DEFAULT_PRODUCT_ID: u16 = 0x0080;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Per-read timeout. `-1` blocks until a report arrives. `0` is rejected:
    /// a non-blocking read would turn the monitor loop into a busy spin.
    pub read_timeout_ms: i32,
    /// Size of the read buffer. The device sends 512-byte input reports.
    pub report_len: usize,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            read_timeout_ms: 100,
            report_len: 512,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_len < MIN_REPORT_LEN {
            return Err(Error::Config(format!(
                "report_len {} is shorter than {MIN_REPORT_LEN}",
                self.report_len
            )));
        }
        if self.read_timeout_ms < -1 || self.read_timeout_ms == 0 {
            return Err(Error::Config(format!(
                "read_timeout_ms {} (use a positive timeout, or -1 to block)",
                self.read_timeout_ms
            )));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| Error::Config(format!("unknown log_level {:?}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.vendor_id, 0x0fd9);
        assert_eq!(config.product_id, 0x0080);
    }

    #[test]
    fn partial_file_overrides_some_keys() {
        let config = Config::from_toml_str(
            r#"
product_id = 0x006d
read_timeout_ms = 250
log_level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.vendor_id, DEFAULT_VENDOR_ID);
        assert_eq!(config.product_id, 0x006d);
        assert_eq!(config.read_timeout_ms, 250);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn short_report_len_is_rejected() {
        let err = Config::from_toml_str("report_len = 16").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn non_blocking_timeout_is_rejected() {
        let err = Config::from_toml_str("read_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(Config::from_toml_str("read_timeout_ms = -1").is_ok());
        assert!(Config::from_toml_str("read_timeout_ms = -2").is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let err = Config::from_toml_str(r#"log_level = "loud""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::from_toml_str("this is not valid toml [[[").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load("/nonexistent/deckwatch.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
