//! Clock adapter - wall-clock timestamps and day keys.
//!
//! Timestamps are rendered as `DD:MM:YY,Wkd` for both the on-screen clock
//! and log records; the date part (`DD:MM:YY`) is the day key history is
//! bucketed by.
//!
//! The hardware source is a DS3231 RTC on I²C. Its registers are BCD:
//!
//! ```text
//! 0x00 seconds   0x01 minutes   0x02 hours (bit 6 = 12h, bit 5 = PM)
//! 0x03 weekday   0x04 date      0x05 month (bit 7 = century)
//! 0x06 year (00-99)
//! ```
//!
//! The weekday register is ignored; it is derived from the date instead.

use core::fmt::Write;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::config::DS3231_ADDRESS;
use crate::error::ClockError;

/// `DD:MM:YY`
pub type DayKey = String<8>;

/// `DD:MM:YY,Wkd`
pub type Stamp = String<16>;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A wall-clock reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub const fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Build from calendar fields; `None` if the date or time does not exist.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self(NaiveDateTime::new(date, time)))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// `DD:MM:YY,Wkd` - shared by the display and the log.
    pub fn formatted(&self) -> Stamp {
        let mut s = Stamp::new();
        let _ = s.push_str(day_key(self.date()).as_str());
        let _ = s.push(',');
        let _ = s.push_str(weekday_abbrev(self.weekday()));
        s
    }

    pub fn day_key(&self) -> DayKey {
        day_key(self.date())
    }
}

/// Day key for a calendar date: `DD:MM:YY`.
pub fn day_key(date: NaiveDate) -> DayKey {
    let mut key = DayKey::new();
    let _ = write!(
        key,
        "{:02}:{:02}:{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    );
    key
}

pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// The `count` calendar days ending at `reference`, oldest first.
pub fn days_ending_at(reference: NaiveDate, count: usize) -> impl Iterator<Item = NaiveDate> {
    (0..count)
        .rev()
        .filter_map(move |back| reference.checked_sub_days(Days::new(back as u64)))
}

/// A source of wall-clock time.
pub trait Clock {
    fn now(&mut self) -> Result<Timestamp, ClockError>;

    fn now_formatted(&mut self) -> Result<Stamp, ClockError> {
        self.now().map(|t| t.formatted())
    }
}

/// Clock that returns whatever it was last set to.
///
/// Used by host tests and simulations.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    now: Timestamp,
}

impl FixedClock {
    pub const fn new(now: Timestamp) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Move forward by whole days, keeping the time of day.
    pub fn advance_days(&mut self, days: u64) {
        if let Some(next) = self.now.0.checked_add_days(Days::new(days)) {
            self.now = Timestamp(next);
        }
    }
}

impl Clock for FixedClock {
    fn now(&mut self) -> Result<Timestamp, ClockError> {
        Ok(self.now)
    }
}

/// DS3231 real-time clock on an I²C bus.
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Clock for Ds3231<I2C> {
    fn now(&mut self) -> Result<Timestamp, ClockError> {
        let first_reg = [0x00u8];
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDRESS, &first_reg, &mut regs)
            .map_err(|_| ClockError::Bus)?;
        decode_registers(&regs)
    }
}

fn bcd(byte: u8) -> u32 {
    u32::from(byte >> 4) * 10 + u32::from(byte & 0x0F)
}

/// Decode the seven DS3231 time-keeping registers (0x00..=0x06).
pub fn decode_registers(regs: &[u8; 7]) -> Result<Timestamp, ClockError> {
    let second = bcd(regs[0] & 0x7F);
    let minute = bcd(regs[1] & 0x7F);
    let hour = if regs[2] & 0x40 != 0 {
        let h12 = bcd(regs[2] & 0x1F);
        let pm = regs[2] & 0x20 != 0;
        match (h12, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        }
    } else {
        bcd(regs[2] & 0x3F)
    };
    let day = bcd(regs[4] & 0x3F);
    let month = bcd(regs[5] & 0x1F);
    let century = if regs[5] & 0x80 != 0 { 100 } else { 0 };
    let year = 2000 + century + bcd(regs[6]) as i32;

    Timestamp::from_ymd_hms(year, month, day, hour, minute, second)
        .ok_or(ClockError::InvalidTime)
}
