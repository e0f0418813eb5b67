//! Activity list, running counts and the scroll window.

use heapless::Vec;

use crate::config::MAX_ACTIVITIES;
use crate::error::Error;

/// Which activity is selected and which slice of the list is on screen.
///
/// Invariant: `window_offset <= current < window_offset + visible_rows`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selection {
    pub current: usize,
    pub window_offset: usize,
}

/// In-memory counters, one per activity.
///
/// Counts live only as long as the process; the durable record is the
/// event log, which this type never touches.
#[derive(Clone, Debug)]
pub struct ActivityStore {
    labels: &'static [&'static str],
    counts: Vec<u32, MAX_ACTIVITIES>,
    selection: Selection,
    visible_rows: usize,
}

impl ActivityStore {
    pub fn new(labels: &'static [&'static str], visible_rows: usize) -> Result<Self, Error> {
        if labels.is_empty() || labels.len() > MAX_ACTIVITIES || visible_rows == 0 {
            return Err(Error::InvalidActivities);
        }
        // Labels are written verbatim into comma-separated log lines.
        if labels.iter().any(|l| l.is_empty() || l.contains(&[',', '\n', '\r'][..])) {
            return Err(Error::InvalidActivities);
        }
        let mut counts = Vec::new();
        for _ in labels {
            let _ = counts.push(0);
        }
        Ok(Self {
            labels,
            counts,
            selection: Selection::default(),
            visible_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn current(&self) -> usize {
        self.selection.current
    }

    pub fn current_label(&self) -> &'static str {
        self.labels[self.selection.current]
    }

    pub fn current_count(&self) -> u32 {
        self.counts[self.selection.current]
    }

    /// Indices of the rows inside the scroll window.
    pub fn visible(&self) -> core::ops::Range<usize> {
        let start = self.selection.window_offset;
        start..(start + self.visible_rows).min(self.len())
    }

    /// Advance the selection cyclically, scrolling only as far as needed to
    /// keep it on screen.
    pub fn select_next(&mut self) {
        let sel = &mut self.selection;
        sel.current = (sel.current + 1) % self.labels.len();
        if sel.current >= sel.window_offset + self.visible_rows {
            sel.window_offset = sel.current + 1 - self.visible_rows;
        } else if sel.current < sel.window_offset {
            sel.window_offset = sel.current;
        }
    }

    pub fn increment_current(&mut self) {
        let count = &mut self.counts[self.selection.current];
        *count = count.saturating_add(1);
    }

    pub fn reset_current(&mut self) {
        self.counts[self.selection.current] = 0;
    }
}
