//! Integration tests for the tally control loop, driven through the public API.

use tally::clock::FixedClock;
use tally::config::{HISTORY_DWELL_MS, LONG_PRESS_MS, MAX_VISIBLE};
use tally::{Action, ActivityStore, Ink, Levels, MemoryLogStore, Mode, Panel, Timestamp, Tracker};

/// Keeps the text of the last presented frame.
#[derive(Default)]
struct TextPanel {
    lines: Vec<String>,
    shown: Vec<String>,
}

impl Panel for TextPanel {
    fn clear(&mut self) {
        self.lines.clear();
    }

    fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _ink: Ink) {
        self.lines.push(text.to_string());
    }

    fn fill_rect(&mut self, _x: i32, _y: i32, _width: u32, _height: u32, _ink: Ink) {}

    fn present(&mut self) {
        self.shown = self.lines.clone();
    }
}

const LABELS: &[&str] = &["A", "B"];

const NAV: Levels = Levels {
    nav: true,
    log: false,
};
const LOG: Levels = Levels {
    nav: false,
    log: true,
};

/// A tracker plus a running uptime.
struct Rig {
    tracker: Tracker<MemoryLogStore<1024>, FixedClock, TextPanel>,
    now: u64,
}

impl Rig {
    fn new(store: MemoryLogStore<1024>) -> Self {
        let activities = ActivityStore::new(LABELS, MAX_VISIBLE).expect("valid activity list");
        let at = Timestamp::from_ymd_hms(2025, 2, 3, 8, 0, 0).expect("valid date");
        let mut tracker = Tracker::new(activities, store, FixedClock::new(at), TextPanel::default());
        tracker.start().expect("log init");
        Self { tracker, now: 0 }
    }

    fn step(&mut self, levels: Levels, ms: u64) -> Option<Action> {
        self.now += ms;
        self.tracker.poll(self.now, levels)
    }

    fn short(&mut self, levels: Levels) -> Option<Action> {
        assert_eq!(self.step(levels, 10), None);
        self.step(Levels::RELEASED, 100)
    }

    fn long(&mut self, levels: Levels) -> Option<Action> {
        assert_eq!(self.step(levels, 10), None);
        let action = self.step(levels, LONG_PRESS_MS);
        self.step(Levels::RELEASED, 10);
        action
    }

    fn log_text(&mut self) -> String {
        let bytes = self
            .tracker
            .event_log()
            .store()
            .contents()
            .expect("log exists");
        String::from_utf8(bytes.to_vec()).expect("utf-8 log")
    }

    fn screen(&self) -> Vec<&str> {
        self.tracker
            .panel()
            .shown
            .iter()
            .map(String::as_str)
            .collect()
    }
}

#[test]
fn count_reset_and_history_session() {
    let mut rig = Rig::new(MemoryLogStore::new());
    assert_eq!(rig.log_text(), "Activity,Timestamp\n");
    assert_eq!(rig.tracker.activities().counts(), &[0, 0]);

    assert_eq!(rig.short(NAV), Some(Action::Scrolled { current: 1 }));
    assert!(matches!(
        rig.short(LOG),
        Some(Action::Counted { index: 1, count: 1, logged: true })
    ));
    assert!(matches!(
        rig.short(LOG),
        Some(Action::Counted { index: 1, count: 2, logged: true })
    ));
    assert_eq!(rig.tracker.activities().counts(), &[0, 2]);
    assert_eq!(
        rig.log_text(),
        "Activity,Timestamp\nB,03:02:25,Mon\nB,03:02:25,Mon\n"
    );

    // Reset touches the counter only.
    assert_eq!(rig.long(LOG), Some(Action::Reset { index: 1 }));
    assert_eq!(rig.tracker.activities().counts(), &[0, 0]);
    assert_eq!(rig.tracker.event_log().count_for("B"), Ok(2));

    assert_eq!(rig.short(NAV), Some(Action::Scrolled { current: 0 }));
    assert_eq!(rig.long(NAV), Some(Action::HistoryShown { index: 0 }));
    assert_eq!(
        rig.screen(),
        ["History:", "A", "01:02: 0", "02:02: 0", "03:02: 0"]
    );
    assert!(matches!(rig.tracker.mode(), Mode::ShowingHistory { .. }));

    assert_eq!(rig.step(Levels::RELEASED, HISTORY_DWELL_MS), Some(Action::HistoryClosed));
    assert_eq!(rig.screen(), ["03:02:25,Mon", "A", "0", "B", "0"]);

    // Input is live again straight away.
    assert_eq!(rig.short(NAV), Some(Action::Scrolled { current: 1 }));
}

#[test]
fn history_of_the_selected_activity_counts_todays_records() {
    let mut rig = Rig::new(MemoryLogStore::new());
    rig.short(NAV);
    rig.short(LOG);
    rig.short(LOG);
    rig.long(NAV);
    assert_eq!(
        rig.screen(),
        ["History:", "B", "01:02: 0", "02:02: 0", "03:02: 2"]
    );
}

#[test]
fn existing_log_is_appended_to_not_replaced() {
    let earlier = b"Activity,Timestamp\nA,02:02:25,Sun\n";
    let mut rig = Rig::new(MemoryLogStore::with_contents(earlier).expect("fits"));

    // Counts start from zero; the log is not replayed into them.
    assert_eq!(rig.tracker.activities().counts(), &[0, 0]);

    rig.short(LOG);
    assert_eq!(
        rig.log_text(),
        "Activity,Timestamp\nA,02:02:25,Sun\nA,03:02:25,Mon\n"
    );

    rig.long(NAV);
    assert_eq!(
        rig.screen(),
        ["History:", "A", "01:02: 0", "02:02: 1", "03:02: 1"]
    );
}

#[test]
fn full_log_keeps_counting() {
    let mut rig = Rig::new(MemoryLogStore::new());
    let mut logged = 0;
    for _ in 0..100 {
        match rig.short(LOG) {
            Some(Action::Counted { logged: true, .. }) => logged += 1,
            Some(Action::Counted { logged: false, .. }) => {}
            other => panic!("unexpected action {:?}", other),
        }
    }
    assert_eq!(rig.tracker.activities().counts(), &[100, 0]);
    assert!(logged < 100);
    assert_eq!(rig.tracker.event_log().count_for("A"), Ok(logged));
}
