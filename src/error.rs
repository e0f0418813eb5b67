//! Unified error type for tally.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The event log store failed.
    Storage(StorageError),

    /// The real-time clock could not be read.
    Clock(ClockError),

    /// The activity list is empty, exceeds `MAX_ACTIVITIES` or has a label
    /// that cannot be written into a log line.
    InvalidActivities,
}

/// Failures of the append-only log store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The log has not been created yet.
    Missing,
    /// No room left for another record.
    Full,
    /// A record does not fit into `MAX_RECORD_LEN`.
    RecordTooLong,
    /// Low-level read/write/erase failure.
    Io,
}

/// Failures of the clock source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// I²C transaction to the RTC failed.
    Bus,
    /// The RTC returned a date/time that does not exist.
    InvalidTime,
}

// Convenience conversions

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Error::Clock(e)
    }
}
