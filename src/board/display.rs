//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use tally::{Ink, Panel};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C: I2c>(i2c: I2C) -> Display<I2C> {
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn color(ink: Ink) -> BinaryColor {
    match ink {
        Ink::On => BinaryColor::On,
        Ink::Off => BinaryColor::Off,
    }
}

fn text_style(ink: Ink) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color(ink))
        .build()
}

/// The OLED as a [`Panel`]. Draw errors are ignored; a failed flush just
/// leaves the previous frame on screen.
pub struct OledPanel<I2C> {
    display: Display<I2C>,
}

impl<I2C: I2c> OledPanel<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            display: init(i2c),
        }
    }
}

impl<I2C: I2c> Panel for OledPanel<I2C> {
    fn clear(&mut self) {
        self.display.clear_buffer();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, ink: Ink) {
        let _ = Text::with_baseline(text, Point::new(x, y), text_style(ink), Baseline::Top)
            .draw(&mut self.display);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, ink: Ink) {
        let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(color(ink)))
            .draw(&mut self.display);
    }

    fn present(&mut self) {
        let _ = self.display.flush();
    }
}
