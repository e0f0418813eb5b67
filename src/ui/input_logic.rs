//! Short/long press classification and two-button arbitration.
//!
//! Buttons are polled, not interrupt driven: each control cycle hands in
//! the current levels and a millisecond timestamp, and transitions are
//! inferred by comparing against the previous cycle.
//!
//! Per button:
//!
//! ```text
//! Idle ──press──▶ Holding(t0) ──release──▶ Idle        => Short
//!                     │                                (nothing if held
//!                     │                                 < debounce)
//!                     └─held ≥ threshold─▶ LongHandled => Long (once)
//!                                              │
//!                                              └─release─▶ Idle
//! ```

use super::{Button, Gesture, Levels, Press};

/// Where a single button is in its press cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Holding { since_ms: u64 },
    LongHandled,
}

/// Classifies one button's level samples into presses.
#[derive(Clone, Copy, Debug)]
pub struct PressDetector {
    phase: Phase,
    long_press_ms: u64,
    debounce_ms: u64,
}

impl PressDetector {
    pub const fn new(long_press_ms: u64, debounce_ms: u64) -> Self {
        Self {
            phase: Phase::Idle,
            long_press_ms,
            debounce_ms,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` from the first pressed sample until the release is seen.
    pub fn is_tracking(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Forget any press in progress.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Feed one sample.
    ///
    /// A long press fires once, as soon as the hold reaches the threshold;
    /// its release is then swallowed. A short press fires on release,
    /// unless the hold was shorter than the debounce time.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<Press> {
        match (self.phase, pressed) {
            (Phase::Idle, true) => {
                self.phase = Phase::Holding { since_ms: now_ms };
                None
            }
            (Phase::Holding { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) >= self.long_press_ms {
                    self.phase = Phase::LongHandled;
                    Some(Press::Long)
                } else {
                    None
                }
            }
            (Phase::Holding { since_ms }, false) => {
                self.phase = Phase::Idle;
                if now_ms.saturating_sub(since_ms) < self.debounce_ms {
                    debug!("Ignoring bounce");
                    None
                } else {
                    Some(Press::Short)
                }
            }
            (Phase::LongHandled, false) => {
                self.phase = Phase::Idle;
                None
            }
            (Phase::Idle, false) | (Phase::LongHandled, true) => None,
        }
    }
}

/// Both buttons plus the policy for pressing them together.
///
/// Only one button owns the input at a time. Ownership is taken on a
/// press edge and held until that button's release has been processed.
/// If both go down in the same cycle NAV wins. A button pressed while the
/// other owns the input is ignored until it is released and pressed again.
#[derive(Clone, Copy, Debug)]
pub struct Controls {
    nav: PressDetector,
    log: PressDetector,
    owner: Option<Button>,
    previous: Levels,
}

impl Controls {
    pub const fn new(long_press_ms: u64, debounce_ms: u64) -> Self {
        Self {
            nav: PressDetector::new(long_press_ms, debounce_ms),
            log: PressDetector::new(long_press_ms, debounce_ms),
            owner: None,
            previous: Levels::RELEASED,
        }
    }

    pub fn owner(&self) -> Option<Button> {
        self.owner
    }

    /// Levels seen in the last cycle.
    pub fn previous(&self) -> Levels {
        self.previous
    }

    pub fn detector(&self, button: Button) -> &PressDetector {
        match button {
            Button::Nav => &self.nav,
            Button::Log => &self.log,
        }
    }

    fn detector_mut(&mut self, button: Button) -> &mut PressDetector {
        match button {
            Button::Nav => &mut self.nav,
            Button::Log => &mut self.log,
        }
    }

    /// Drop all press state and take `levels` as the last cycle seen.
    ///
    /// For resuming after input was not polled for a while: buttons
    /// already down stay ignored until released, and a press starting on
    /// the next cycle is an edge again.
    pub fn resync(&mut self, levels: Levels) {
        self.nav.reset();
        self.log.reset();
        self.owner = None;
        self.previous = levels;
    }

    /// Pick the button allowed to advance this cycle.
    fn arbitrate(&mut self, levels: Levels) -> Option<Button> {
        if self.owner.is_none() {
            let previous = self.previous;
            self.owner = [Button::Nav, Button::Log]
                .into_iter()
                .find(|&b| levels.pressed(b) && !previous.pressed(b));
        }
        self.owner
    }

    /// Run one control cycle. At most one gesture comes out per cycle.
    pub fn poll(&mut self, levels: Levels, now_ms: u64) -> Option<Gesture> {
        let gesture = self.arbitrate(levels).and_then(|button| {
            let detector = self.detector_mut(button);
            let press = detector.update(levels.pressed(button), now_ms);
            if !detector.is_tracking() {
                self.owner = None;
            }
            press.map(|press| Gesture { button, press })
        });

        self.previous = levels;
        gesture
    }
}
