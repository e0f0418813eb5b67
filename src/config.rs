//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, the activity list and
//! the on-flash log layout live here so they can be tuned in one place.
//! There is no runtime configuration.

// Activities

/// Trackable activities, in on-screen order.
pub const ACTIVITIES: &[&str] = &["A", "B", "C", "D", "E", "F"];

/// Upper bound on `ACTIVITIES.len()` (sizes the counter array).
pub const MAX_ACTIVITIES: usize = 16;

// Input timing

/// Hold duration (ms) at which a press becomes a long press.
pub const LONG_PRESS_MS: u64 = 2000;

/// Button debounce time (ms). A press released sooner than this is
/// treated as contact bounce and produces no gesture.
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// How long the history view stays up before the home screen returns (ms).
/// Input is not processed while it is shown.
pub const HISTORY_DWELL_MS: u64 = 2500;

/// Control-loop polling interval (ms). Button edges shorter than this
/// are not observed; bounces that do get sampled are filtered by
/// `BUTTON_DEBOUNCE_MS`.
pub const POLL_INTERVAL_MS: u64 = 10;

// History

/// Number of days shown in the history view (oldest first, ending today).
pub const HISTORY_DAYS: usize = 3;

// Display (SSD1306 128x64, FONT_6X10)

pub const DISPLAY_WIDTH: i32 = 128;
pub const DISPLAY_HEIGHT: i32 = 64;

/// Pixel height of one activity row.
pub const LINE_HEIGHT: i32 = 11;

/// Advance width of one glyph.
pub const GLYPH_WIDTH: i32 = 6;

/// Activity rows visible at once.
pub const MAX_VISIBLE: usize = 5;

/// Characters of an activity name shown on the home screen.
pub const NAME_CHARS_HOME: usize = 10;

/// Characters of an activity name shown on the history screen.
pub const NAME_CHARS_HISTORY: usize = 16;

// Event log

/// First line of every log.
pub const LOG_HEADER: &str = "Activity,Timestamp";

/// Longest record line (including the trailing newline) the log accepts.
/// Longer lines found while scanning are skipped.
pub const MAX_RECORD_LEN: usize = 64;

/// Flash page index where the event log starts (4 KB per page on nRF52840).
/// Must match the end of FLASH in `memory.x`.
pub const STORAGE_FLASH_PAGE_START: u32 = 208;

/// Number of flash pages reserved for the event log.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 32;

// GPIO pin assignments
//
// Logical names; the `embassy_nrf::peripherals::*` pins are picked in
// `main.rs`. Buttons are wired to VDD with the internal pull-down enabled,
// so a pressed button reads high.
//
//   Button NAV     → P0.11
//   Button LOG     → P0.12
//   OLED   SDA/SCL → P0.26 / P0.27  (TWISPI0)
//   RTC    SDA/SCL → P0.30 / P0.31  (TWISPI1)

/// 7-bit I²C address of the DS3231.
pub const DS3231_ADDRESS: u8 = 0x68;
