//! GPIO button sampling.
//!
//! Two push buttons wired to VDD with the internal pull-down enabled
//! (active-high):
//!   - NAV - next activity / history
//!   - LOG - count / reset
//!
//! There is no edge capture or debouncing task: the control loop samples
//! both levels once per cycle and the library infers presses from
//! consecutive samples.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use tally::Levels;

pub struct Buttons {
    nav: Input<'static>,
    log: Input<'static>,
}

impl Buttons {
    pub fn new(nav: AnyPin, log: AnyPin) -> Self {
        Self {
            nav: Input::new(nav, Pull::Down),
            log: Input::new(log, Pull::Down),
        }
    }

    /// Read both buttons.
    pub fn sample(&mut self) -> Levels {
        Levels {
            nav: self.nav.is_high(),
            log: self.log.is_high(),
        }
    }
}
