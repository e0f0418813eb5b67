//! User interface - two push buttons and a monochrome status panel.
//!
//! ## Components
//!
//! - **Input**: press classification and button arbitration (`input_logic`)
//! - **Screens**: home and history layouts drawn through [`Panel`] (`render`)
//!
//! The panel driver itself is board glue and lives with the firmware.

pub mod input_logic;
pub mod render;

/// The two physical buttons.
///
///   - NAV: short = next activity, long = history of the selected one
///   - LOG: short = count + record, long = reset the selected count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Nav,
    Log,
}

/// Raw button levels sampled in one control cycle (`true` = pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Levels {
    pub nav: bool,
    pub log: bool,
}

impl Levels {
    pub const RELEASED: Self = Self {
        nav: false,
        log: false,
    };

    pub fn pressed(&self, button: Button) -> bool {
        match button {
            Button::Nav => self.nav,
            Button::Log => self.log,
        }
    }
}

/// How long a button was held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    Short,
    Long,
}

/// A classified input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gesture {
    pub button: Button,
    pub press: Press,
}

/// Pixel state for a monochrome panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ink {
    On,
    Off,
}

/// Drawing surface the screens render into.
///
/// Coordinates are pixels from the top-left corner; text is positioned by
/// the top-left of its first glyph. Nothing is visible until `present`.
pub trait Panel {
    fn clear(&mut self);

    fn draw_text(&mut self, text: &str, x: i32, y: i32, ink: Ink);

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, ink: Ink);

    fn present(&mut self);
}
