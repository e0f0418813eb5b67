//! tally firmware - nRF52840 entry point.
//!
//! Wires the library's control loop to the board:
//!
//! - SSD1306 OLED on TWISPI0 (P0.26 SDA / P0.27 SCL)
//! - DS3231 RTC on TWISPI1 (P0.30 SDA / P0.31 SCL)
//! - NAV / LOG buttons on P0.11 / P0.12
//! - event log in internal flash (see `config::STORAGE_FLASH_PAGE_START`)
//!
//! One cooperative loop: sample both buttons, poll the tracker, sleep for
//! `POLL_INTERVAL_MS`. No other tasks are spawned.

#![no_std]
#![no_main]

mod board;

use board::buttons::Buttons;
use board::display::OledPanel;
use board::flash_log::FlashLogStore;
use defmt::{debug, error, info};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Instant, Timer};
use tally::clock::Ds3231;
use tally::config::{ACTIVITIES, MAX_VISIBLE, POLL_INTERVAL_MS};
use tally::ui::render;
use tally::{ActivityStore, Tracker};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    TWISPI1 => twim::InterruptHandler<peripherals::TWISPI1>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("tally starting");

    let oled_i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut panel = OledPanel::new(oled_i2c);

    let rtc_i2c = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, twim::Config::default());
    let clock = Ds3231::new(rtc_i2c);

    let store = FlashLogStore::new(BlockingAsync::new(Nvmc::new(p.NVMC)));
    let mut buttons = Buttons::new(p.P0_11.degrade(), p.P0_12.degrade());

    let activities = match ActivityStore::new(ACTIVITIES, MAX_VISIBLE) {
        Ok(activities) => activities,
        Err(e) => {
            error!("Bad activity list: {:?}", e);
            render::draw_error(&mut panel, "Bad activities");
            halt().await
        }
    };

    let mut tracker = Tracker::new(activities, store, clock, panel);
    if let Err(e) = tracker.start() {
        error!("Startup failed: {:?}", e);
        tracker.show_fault("Log init failed");
        halt().await
    }
    info!("Tracking {} activities", ACTIVITIES.len());

    loop {
        let levels = buttons.sample();
        if let Some(action) = tracker.poll(Instant::now().as_millis(), levels) {
            debug!("{:?}", action);
        }
        Timer::after(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Park the firmware after a fatal startup error; the error screen stays up.
async fn halt() -> ! {
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
