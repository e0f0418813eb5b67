//! Per-day history derived from the event log.
//!
//! Nothing here is stored: every request replays the whole log once and
//! counts the chosen activity's records into day buckets. That is linear
//! in the log size, which is fine for something that only runs on a long
//! press.

use chrono::NaiveDate;
use heapless::Vec;

use crate::clock::{day_key, days_ending_at, DayKey};
use crate::event_log::{EventLog, LogStore};

/// Occurrences of one activity on one day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub key: DayKey,
    pub count: u32,
}

/// `DAYS` buckets ordered oldest to newest.
pub type History<const DAYS: usize> = Vec<DayBucket, DAYS>;

/// Count `activity`'s records for the `DAYS` days ending at `reference`.
///
/// The window length is the return type's capacity, so the result always
/// holds exactly `DAYS` buckets. Days without records get a zero bucket.
/// If the log cannot be read at all, every bucket is zero.
pub fn aggregate<S: LogStore, const DAYS: usize>(
    log: &mut EventLog<S>,
    activity: &str,
    reference: NaiveDate,
) -> History<DAYS> {
    let mut history = History::new();
    for date in days_ending_at(reference, DAYS) {
        let _ = history.push(DayBucket {
            date,
            key: day_key(date),
            count: 0,
        });
    }

    let scanned = log.scan(|record| {
        if record.activity != activity {
            return;
        }
        let key = record.day_key();
        if let Some(bucket) = history.iter_mut().find(|b| b.key.as_str() == key) {
            bucket.count = bucket.count.saturating_add(1);
        }
    });

    match scanned {
        Ok(summary) => {
            debug!(
                "History for {}: {} records scanned, {} skipped",
                activity,
                summary.records,
                summary.skipped
            );
        }
        Err(e) => {
            warn!("History unavailable: {:?}", e);
            for bucket in history.iter_mut() {
                bucket.count = 0;
            }
        }
    }

    history
}
