//! Append-only activity log.
//!
//! Plain text, one record per line:
//!
//! ```text
//! Activity,Timestamp
//! Reading,03:02:25,Mon
//! Walk,03:02:25,Mon
//! ```
//!
//! The first line is always the header. Records are only ever appended;
//! nothing here rewrites or truncates the log. Replay tolerates damage:
//! lines with the wrong field count, invalid UTF-8 or more than
//! `MAX_RECORD_LEN` bytes are skipped and the scan carries on.

use heapless::{String, Vec};

use crate::config::{LOG_HEADER, MAX_RECORD_LEN};
use crate::error::StorageError;

/// Byte-oriented backing store with file-like create / append / read-all.
///
/// Every call is synchronous and complete when it returns; nothing is
/// buffered across calls.
pub trait LogStore {
    fn exists(&mut self) -> Result<bool, StorageError>;

    /// Create the store with `initial` as its only contents.
    fn create(&mut self, initial: &[u8]) -> Result<(), StorageError>;

    fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError>;

    /// Feed the stored bytes front to back to `sink`, in chunks of any size.
    fn read_all(&mut self, sink: &mut dyn FnMut(&[u8])) -> Result<(), StorageError>;
}

/// One logged occurrence, borrowed from the line it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub activity: &'a str,
    /// `DD:MM:YY,Wkd`
    pub timestamp: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Parse one line (without its `\n`). `None` for malformed lines.
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let text = core::str::from_utf8(line).ok()?;
        let (activity, timestamp) = text.split_once(',')?;
        let (date, weekday) = timestamp.split_once(',')?;
        if [activity, date, weekday].iter().any(|f| f.is_empty()) || weekday.contains(',') {
            return None;
        }
        Some(Self {
            activity,
            timestamp,
        })
    }

    /// Date part of the timestamp.
    pub fn day_key(&self) -> &'a str {
        match self.timestamp.split_once(',') {
            Some((date, _)) => date,
            None => self.timestamp,
        }
    }
}

/// Encode a record line, newline included.
pub fn encode_record(
    activity: &str,
    timestamp: &str,
) -> Result<String<MAX_RECORD_LEN>, StorageError> {
    let mut line = String::new();
    let fits = line.push_str(activity).is_ok()
        && line.push(',').is_ok()
        && line.push_str(timestamp).is_ok()
        && line.push('\n').is_ok();
    if !fits {
        return Err(StorageError::RecordTooLong);
    }
    Ok(line)
}

/// Outcome of a full replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSummary {
    pub records: usize,
    pub skipped: usize,
}

/// Reassembles lines from arbitrarily chunked store reads.
struct LineSplitter {
    line: Vec<u8, MAX_RECORD_LEN>,
    overflow: bool,
    index: usize,
}

impl LineSplitter {
    const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflow: false,
            index: 0,
        }
    }

    /// Calls `on_line(index, line)`; `line` is `None` for an over-long line.
    fn feed(&mut self, chunk: &[u8], on_line: &mut impl FnMut(usize, Option<&[u8]>)) {
        for &byte in chunk {
            if byte == b'\n' {
                self.emit(on_line);
            } else if !self.overflow && self.line.push(byte).is_err() {
                self.overflow = true;
            }
        }
    }

    fn finish(&mut self, on_line: &mut impl FnMut(usize, Option<&[u8]>)) {
        if !self.line.is_empty() || self.overflow {
            self.emit(on_line);
        }
    }

    fn emit(&mut self, on_line: &mut impl FnMut(usize, Option<&[u8]>)) {
        if self.overflow {
            on_line(self.index, None);
        } else {
            on_line(self.index, Some(&self.line));
        }
        self.line.clear();
        self.overflow = false;
        self.index += 1;
    }
}

/// The durable record sequence on top of a [`LogStore`].
pub struct EventLog<S> {
    store: S,
    initialized: bool,
}

impl<S: LogStore> EventLog<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            initialized: false,
        }
    }

    /// Create the log with its header if it does not exist yet.
    ///
    /// Returns `true` if the log was created by this call.
    pub fn ensure_initialized(&mut self) -> Result<bool, StorageError> {
        if self.initialized {
            return Ok(false);
        }

        let created = if self.store.exists()? {
            info!("Log already exists");
            false
        } else {
            let mut header: String<MAX_RECORD_LEN> = String::new();
            let _ = header.push_str(LOG_HEADER);
            let _ = header.push('\n');
            self.store.create(header.as_bytes())?;
            info!("Created log");
            true
        };

        self.initialized = true;
        Ok(created)
    }

    /// Append one record.
    pub fn append(&mut self, activity: &str, timestamp: &str) -> Result<(), StorageError> {
        let line = encode_record(activity, timestamp)?;
        self.store.append(line.as_bytes())
    }

    /// Replay every record front to back, skipping the header and any
    /// malformed lines.
    pub fn scan<F>(&mut self, mut visit: F) -> Result<ScanSummary, StorageError>
    where
        F: FnMut(LogRecord<'_>),
    {
        let mut summary = ScanSummary::default();
        let mut splitter = LineSplitter::new();

        let mut on_line = |index: usize, line: Option<&[u8]>| {
            if index == 0 {
                return;
            }
            match line.and_then(LogRecord::parse) {
                Some(record) => {
                    summary.records += 1;
                    visit(record);
                }
                None => {
                    debug!("Skipping malformed log line {}", index);
                    summary.skipped += 1;
                }
            }
        };

        self.store
            .read_all(&mut |chunk: &[u8]| splitter.feed(chunk, &mut on_line))?;
        splitter.finish(&mut on_line);

        Ok(summary)
    }

    /// Number of records logged for `activity`.
    pub fn count_for(&mut self, activity: &str) -> Result<usize, StorageError> {
        let mut count = 0;
        self.scan(|record| {
            if record.activity == activity {
                count += 1;
            }
        })?;
        Ok(count)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// RAM-backed store with a fixed byte capacity.
///
/// Reports [`StorageError::Full`] when an append would not fit, like a
/// real medium running out of space. Used on the host.
pub struct MemoryLogStore<const N: usize> {
    data: Option<Vec<u8, N>>,
    fail_writes: bool,
}

impl<const N: usize> MemoryLogStore<N> {
    /// A store whose log does not exist yet.
    pub const fn new() -> Self {
        Self {
            data: None,
            fail_writes: false,
        }
    }

    /// A store that already holds `bytes`.
    pub fn with_contents(bytes: &[u8]) -> Result<Self, StorageError> {
        let data = Vec::from_slice(bytes).map_err(|_| StorageError::Full)?;
        Ok(Self {
            data: Some(data),
            fail_writes: false,
        })
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Make every subsequent `create`/`append` fail with an I/O error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl<const N: usize> Default for MemoryLogStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LogStore for MemoryLogStore<N> {
    fn exists(&mut self) -> Result<bool, StorageError> {
        Ok(self.data.is_some())
    }

    fn create(&mut self, initial: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        self.data = Some(Vec::from_slice(initial).map_err(|_| StorageError::Full)?);
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        let data = self.data.as_mut().ok_or(StorageError::Missing)?;
        if data.capacity() - data.len() < bytes.len() {
            return Err(StorageError::Full);
        }
        data.extend_from_slice(bytes).map_err(|_| StorageError::Full)
    }

    fn read_all(&mut self, sink: &mut dyn FnMut(&[u8])) -> Result<(), StorageError> {
        let data = self.data.as_ref().ok_or(StorageError::Missing)?;
        sink(data);
        Ok(())
    }
}
