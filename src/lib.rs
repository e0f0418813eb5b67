//! Host-testable core of the tally activity counter.
//!
//! Everything that decides what the device does lives here: press
//! classification, activity counters, the append-only event log, per-day
//! history and the screen layouts. Hardware is reached only through the
//! [`event_log::LogStore`], [`clock::Clock`] and [`ui::Panel`] traits, so
//! the whole control loop runs on the host under `cargo test`.
//!
//! The embedded binary (`src/main.rs`, feature `embedded`) wires these to
//! the nRF52840 flash, a DS3231 RTC and an SSD1306 OLED.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod activity;
pub mod clock;
pub mod config;
pub mod error;
pub mod event_log;
pub mod history;
pub mod tracker;
pub mod ui;

pub use activity::{ActivityStore, Selection};
pub use clock::{Clock, Timestamp};
pub use error::{ClockError, Error, StorageError};
pub use event_log::{EventLog, LogRecord, LogStore, MemoryLogStore};
pub use tracker::{Action, Mode, Tracker};
pub use ui::{Button, Gesture, Ink, Levels, Panel, Press};
