//! nRF52840 board glue - the hardware behind the library's traits.
//!
//! - **Buttons**: two push buttons sampled as levels each cycle
//! - **Display**: SSD1306 128×64 OLED via I²C, implements `Panel`
//! - **Flash log**: event log on internal flash, implements `LogStore`
//!
//! The DS3231 clock adapter is generic over `embedded-hal` and lives in the
//! library (`tally::clock::Ds3231`).

pub mod buttons;
pub mod display;
pub mod flash_log;
