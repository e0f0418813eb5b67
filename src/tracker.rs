//! The device's top-level state machine.
//!
//! `Tracker` owns everything the control loop touches: the activity
//! counters, the event log, the clock, the panel and the button state. The
//! firmware calls [`Tracker::poll`] once per cycle with fresh button levels
//! and the uptime in milliseconds.
//!
//! Two modes:
//!
//! - `Normal` - buttons are classified and dispatched.
//! - `ShowingHistory` - the history view is up until a deadline; buttons
//!   are not sampled and anything pressed meanwhile is lost. On return the
//!   button state is resynced, so a press starting after the deadline
//!   counts normally.

use crate::activity::ActivityStore;
use crate::clock::{Clock, Stamp};
use crate::config::{BUTTON_DEBOUNCE_MS, HISTORY_DAYS, HISTORY_DWELL_MS, LONG_PRESS_MS};
use crate::error::Error;
use crate::event_log::{EventLog, LogStore};
use crate::history::{self, History};
use crate::ui::input_logic::Controls;
use crate::ui::render::{self, CLOCK_PLACEHOLDER};
use crate::ui::{Button, Gesture, Levels, Panel, Press};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Normal,
    ShowingHistory { until_ms: u64 },
}

/// What a poll did, for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Selection moved to `current`.
    Scrolled { current: usize },
    /// Activity `index` was counted; `logged` is false if no record was
    /// written (the count stands either way).
    Counted { index: usize, count: u32, logged: bool },
    /// Activity `index` was reset to zero. Not recorded in the log.
    Reset { index: usize },
    HistoryShown { index: usize },
    HistoryClosed,
}

pub struct Tracker<S, C, P> {
    activities: ActivityStore,
    log: EventLog<S>,
    clock: C,
    panel: P,
    controls: Controls,
    mode: Mode,
}

impl<S: LogStore, C: Clock, P: Panel> Tracker<S, C, P> {
    pub fn new(activities: ActivityStore, store: S, clock: C, panel: P) -> Self {
        Self {
            activities,
            log: EventLog::new(store),
            clock,
            panel,
            controls: Controls::new(LONG_PRESS_MS, BUTTON_DEBOUNCE_MS),
            mode: Mode::Normal,
        }
    }

    /// Make sure the log exists, then draw the home screen.
    ///
    /// An error here is fatal: the control loop must not be entered.
    pub fn start(&mut self) -> Result<(), Error> {
        self.log.ensure_initialized()?;
        self.redraw();
        Ok(())
    }

    /// Replace the screen with an error message.
    pub fn show_fault(&mut self, message: &str) {
        render::draw_error(&mut self.panel, message);
    }

    /// Run one control cycle.
    pub fn poll(&mut self, now_ms: u64, levels: Levels) -> Option<Action> {
        match self.mode {
            Mode::ShowingHistory { until_ms } => {
                if now_ms < until_ms {
                    return None;
                }
                self.mode = Mode::Normal;
                self.controls.resync(levels);
                debug!("History closed");
                self.redraw();
                Some(Action::HistoryClosed)
            }
            Mode::Normal => {
                let gesture = self.controls.poll(levels, now_ms)?;
                self.dispatch(gesture, now_ms)
            }
        }
    }

    fn dispatch(&mut self, gesture: Gesture, now_ms: u64) -> Option<Action> {
        match (gesture.button, gesture.press) {
            (Button::Nav, Press::Short) => {
                self.activities.select_next();
                self.redraw();
                Some(Action::Scrolled {
                    current: self.activities.current(),
                })
            }
            (Button::Nav, Press::Long) => self.show_history(now_ms),
            (Button::Log, Press::Short) => Some(self.count_current()),
            (Button::Log, Press::Long) => {
                self.activities.reset_current();
                info!("Reset {}", self.activities.current_label());
                self.redraw();
                Some(Action::Reset {
                    index: self.activities.current(),
                })
            }
        }
    }

    /// Bump the selected counter and record it.
    ///
    /// The in-memory increment is kept even when the record cannot be
    /// written, so the count may run ahead of the log.
    fn count_current(&mut self) -> Action {
        self.activities.increment_current();
        let label = self.activities.current_label();

        let logged = match self.clock.now() {
            Ok(now) => {
                let stamp = now.formatted();
                match self.log.append(label, &stamp) {
                    Ok(()) => {
                        info!("Logged {} at {}", label, stamp.as_str());
                        true
                    }
                    Err(e) => {
                        warn!("Log append failed for {}: {:?}", label, e);
                        false
                    }
                }
            }
            Err(e) => {
                warn!("Clock unavailable, {} not logged: {:?}", label, e);
                false
            }
        };

        self.redraw();
        Action::Counted {
            index: self.activities.current(),
            count: self.activities.current_count(),
            logged,
        }
    }

    fn show_history(&mut self, now_ms: u64) -> Option<Action> {
        let today = match self.clock.now() {
            Ok(now) => now.date(),
            Err(e) => {
                warn!("Clock unavailable, no history: {:?}", e);
                return None;
            }
        };

        let label = self.activities.current_label();
        let days: History<HISTORY_DAYS> = history::aggregate(&mut self.log, label, today);
        render::draw_history(&mut self.panel, label, &days);

        self.mode = Mode::ShowingHistory {
            until_ms: now_ms + HISTORY_DWELL_MS,
        };
        debug!("History shown for {}", label);
        Some(Action::HistoryShown {
            index: self.activities.current(),
        })
    }

    fn redraw(&mut self) {
        let clock_text = self.clock.now_formatted().unwrap_or_else(|_| {
            let mut s = Stamp::new();
            let _ = s.push_str(CLOCK_PLACEHOLDER);
            s
        });
        render::draw_home(&mut self.panel, &self.activities, &clock_text);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn activities(&self) -> &ActivityStore {
        &self.activities
    }

    pub fn event_log(&mut self) -> &mut EventLog<S> {
        &mut self.log
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}
