//! Screen layouts.
//!
//! Home (128×64):
//! ```text
//!         03:02:25,Mon          clock, centred
//! ▓Reading                 3▓   selected row inverted
//!  Walk                    0
//!  ...                          up to MAX_VISIBLE rows
//! ```
//!
//! History:
//! ```text
//! History:
//! Reading
//! 01:02: 4                      DD:MM: count, oldest first
//! 02:02: 0
//! 03:02: 1
//! ```

use core::fmt::Write;

use heapless::String;

use super::{Ink, Panel};
use crate::activity::ActivityStore;
use crate::config::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_WIDTH, LINE_HEIGHT, NAME_CHARS_HISTORY, NAME_CHARS_HOME,
};
use crate::history::DayBucket;

const GLYPH_HEIGHT: i32 = 10;
const HISTORY_FIRST_ROW: i32 = 22;
const HISTORY_ROW_STEP: i32 = 12;

/// Shown in place of the clock when the RTC cannot be read.
pub const CLOCK_PLACEHOLDER: &str = "--:--:--,---";

pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_WIDTH
}

/// First `max_chars` characters of `text`.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Render the home screen: clock and the visible slice of the activity list.
pub fn draw_home<P: Panel>(panel: &mut P, store: &ActivityStore, clock_text: &str) {
    panel.clear();

    let clock_x = ((DISPLAY_WIDTH - text_width(clock_text)) / 2).max(0);
    panel.draw_text(clock_text, clock_x, 0, Ink::On);

    for (row, index) in store.visible().enumerate() {
        let y = LINE_HEIGHT * (row as i32 + 1);
        let name = truncate(store.labels()[index], NAME_CHARS_HOME);

        let mut count: String<10> = String::new();
        let _ = write!(count, "{}", store.counts()[index]);
        let count_x = DISPLAY_WIDTH - text_width(&count);

        let ink = if index == store.current() {
            panel.fill_rect(0, y, DISPLAY_WIDTH as u32, LINE_HEIGHT as u32, Ink::On);
            Ink::Off
        } else {
            Ink::On
        };
        panel.draw_text(name, 0, y, ink);
        panel.draw_text(&count, count_x, y, ink);
    }

    panel.present();
}

/// Render the per-day history of one activity.
pub fn draw_history<P: Panel>(panel: &mut P, label: &str, history: &[DayBucket]) {
    panel.clear();

    panel.draw_text("History:", 0, 0, Ink::On);
    panel.draw_text(truncate(label, NAME_CHARS_HISTORY), 0, 10, Ink::On);

    for (i, bucket) in history.iter().enumerate() {
        let y = HISTORY_FIRST_ROW + HISTORY_ROW_STEP * i as i32;
        if y + GLYPH_HEIGHT > DISPLAY_HEIGHT {
            break;
        }
        let mut line: String<20> = String::new();
        let _ = write!(line, "{}: {}", truncate(&bucket.key, 5), bucket.count);
        panel.draw_text(&line, 0, y, Ink::On);
    }

    panel.present();
}

/// Render a transient error message.
pub fn draw_error<P: Panel>(panel: &mut P, message: &str) {
    panel.clear();

    panel.draw_text("ERROR", 0, 0, Ink::On);
    panel.draw_text(message, 0, 20, Ink::On);

    panel.present();
}
