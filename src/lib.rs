//! deckwatch — Stream Deck button report decoder.
//!
//! Turns raw 15-button input reports into key-down, key-up and wake-up events.
//!
//! The decoding core is two pure pieces:
//! - [`ButtonState::parse`] turns one report into a 15-bit mask.
//! - [`resolver::compare`] turns two consecutive masks into at most one [`ButtonEvent`].
//!
//! Around it sits thin plumbing: [`ReportSource`] for reading reports,
//! [`Monitor`] for threading the previous state through a poll loop, and
//! [`EventBus`] for dispatching events to listeners.
//!
//! ```
//! use deckwatch::{resolver, ButtonEvent, ButtonState};
//!
//! let mut report = [0u8; 19];
//! report[6] = 1; // button 3
//! let pressed = ButtonState::parse(&report).unwrap();
//!
//! assert_eq!(resolver::compare(pressed, ButtonState::IDLE), Some(ButtonEvent::key_down(3)));
//! assert_eq!(resolver::compare(ButtonState::IDLE, pressed), Some(ButtonEvent::key_up(3)));
//! assert_eq!(resolver::compare(ButtonState::IDLE, ButtonState::IDLE), Some(ButtonEvent::wake_up()));
//! ```

pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod metadata;
pub mod monitor;
pub mod resolver;
pub mod state;

pub use config::Config;
pub use device::ReportSource;
pub use error::{Error, EventError, ReportError, Result};
pub use event::{ButtonEvent, EventKind};
pub use eventbus::{EventBus, EventFilter, EventListener, ListenerId};
pub use filtered_listener::FilteredListener;
pub use metadata::DeviceMeta;
pub use monitor::{Monitor, RunSummary, Step};
pub use resolver::Transition;
pub use state::ButtonState;
