//! Integration tests for scrollknob host-testable logic.
//!
//! Drives a [`Session`] end to end through its public API, with a sink
//! that turns motion into the same 4-byte mouse reports the firmware
//! sends over USB.

use std::cell::Cell;

use scrollknob::config::{TONE_LOCK_HIGH, TONE_LOCK_LOW, TONE_TIMEOUT, TONE_UNLOCK};
use scrollknob::hid::{split_motion, HidSink, MouseReport};
use scrollknob::input::{ButtonEvent, QuadratureDecoder};
use scrollknob::scroll::{
    Clock, FeedbackSink, FocusArbiter, Mode, ModeView, SharedFocus, ViewObserver, ViewState,
};
use scrollknob::Session;

struct TestClock(Cell<u32>);

impl Clock for TestClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Default)]
struct ReportLog {
    connected: bool,
    reports: Vec<MouseReport>,
}

impl ReportLog {
    fn pointer_total(&self) -> (i32, i32) {
        self.reports
            .iter()
            .fold((0, 0), |(x, y), r| (x + r.x as i32, y + r.y as i32))
    }

    fn wheel_reports(&self) -> Vec<i8> {
        self.reports
            .iter()
            .filter(|r| r.x == 0 && r.y == 0)
            .map(|r| r.wheel)
            .collect()
    }
}

impl HidSink for ReportLog {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn move_relative(&mut self, dx: i32, dy: i32, wheel: i32) {
        self.reports.extend(split_motion(dx, dy, wheel));
    }

    fn start(&mut self) {}
}

#[derive(Default)]
struct ToneLog(Vec<(u16, u16)>);

impl FeedbackSink for ToneLog {
    fn tone(&mut self, freq_hz: u16, duration_ms: u16) {
        self.0.push((freq_hz, duration_ms));
    }
}

#[derive(Default)]
struct LastView(Option<ViewState>);

impl ViewObserver for LastView {
    fn refresh(&mut self, view: &ViewState) {
        self.0 = Some(*view);
    }
}

type Knob<'a> = Session<ReportLog, ToneLog, &'a SharedFocus, &'a TestClock, LastView>;

fn knob<'a>(clock: &'a TestClock, focus: &'a SharedFocus, connected: bool) -> Knob<'a> {
    let hid = ReportLog {
        connected,
        ..Default::default()
    };
    Session::new(hid, ToneLog::default(), focus, clock, LastView::default())
}

fn run_for(s: &mut Knob<'_>, clock: &TestClock, ms: u32) {
    for _ in 0..ms / 10 {
        clock.0.set(clock.0.get() + 10);
        s.tick();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Scrolling
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn clockwise_detents_reach_host_as_one_wheel_report() {
    let clock = TestClock(Cell::new(1_000));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);
    s.enter();
    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 300);
    s.hid_mut().reports.clear();

    let mut decoder = QuadratureDecoder::new(false, false);
    let cw = [(true, false), (true, true), (false, true), (false, false)];
    for _ in 0..2 {
        for &(a, b) in &cw {
            let step = decoder.update(a, b);
            if step != 0 {
                s.on_encoder_tick(step as i32);
            }
        }
    }
    run_for(&mut s, &clock, 20);

    // 2 ticks × ramp 7, reversed for the natural direction.
    let reports = &s.hid().reports;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0], MouseReport::motion(0, 0, -14));

    let mut buf = [0u8; 4];
    assert_eq!(reports[0].serialize(&mut buf), 4);
    assert_eq!(buf, [0x00, 0x00, 0x00, 0xF2]);
}

#[test]
fn fast_turn_at_top_speed_spans_several_reports() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);
    s.enter();
    s.handle_button(ButtonEvent::Speed);
    s.handle_button(ButtonEvent::Speed);
    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 300);
    s.hid_mut().reports.clear();

    s.on_encoder_tick(10);
    run_for(&mut s, &clock, 20);

    // 10 ticks × ramp cap 10 × speed 5.
    assert_eq!(s.hid().wheel_reports(), vec![-127, -127, -127, -119]);
}

#[test]
fn inverted_direction_scrolls_the_other_way() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);
    s.enter();
    s.handle_button(ButtonEvent::Invert);
    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 300);
    s.hid_mut().reports.clear();

    s.on_encoder_tick(1);
    run_for(&mut s, &clock, 20);

    assert_eq!(s.hid().wheel_reports(), vec![5]);
}

// ═══════════════════════════════════════════════════════════════════════
// Drift compensation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn lock_and_unlock_leave_host_cursor_in_place() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);
    s.enter();

    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 300);
    assert_eq!(s.hid().pointer_total(), (200, 200));

    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 200);

    assert_eq!(s.hid().pointer_total(), (0, 0));
    assert_eq!(s.hid().wheel_reports(), vec![-2, 2]);
    assert_eq!(s.feedback().0, vec![TONE_LOCK_LOW, TONE_LOCK_HIGH, TONE_UNLOCK]);
}

#[test]
fn host_connecting_after_lock_gets_deferred_kick() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, false);
    s.enter();
    s.handle_button(ButtonEvent::Toggle);

    assert_eq!(s.mode(), Mode::ScrollLock);
    assert_eq!(s.view().0.map(|v| v.mode), Some(ModeView::Connecting));
    assert!(s.hid().reports.is_empty());

    s.hid_mut().connected = true;
    run_for(&mut s, &clock, 2_000);

    assert_eq!(s.view().0.map(|v| v.mode), Some(ModeView::Scrolling));
    assert_eq!(s.hid().pointer_total(), (200, 200));
    assert!(s.cursor_offset_applied());
}

// ═══════════════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn screen_button_backgrounds_session_and_frees_knob() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);

    s.handle_button(ButtonEvent::Screen);
    assert!(s.is_active());
    s.handle_button(ButtonEvent::Toggle);
    assert!(focus.is_held());

    s.handle_button(ButtonEvent::Screen);
    assert!(!s.is_active());
    assert!(!focus.is_held());
    assert_eq!(s.mode(), Mode::Navigation);

    let before = s.hid().reports.len();
    s.on_encoder_tick(3);
    run_for(&mut s, &clock, 100);
    assert_eq!(s.hid().reports.len(), before);
}

#[test]
fn idle_scroll_lock_times_out_and_recenters() {
    let clock = TestClock(Cell::new(0));
    let focus = SharedFocus::new();
    let mut s = knob(&clock, &focus, true);
    s.enter();
    s.handle_button(ButtonEvent::Toggle);
    run_for(&mut s, &clock, 300);

    clock.0.set(300_010);
    s.tick();
    run_for(&mut s, &clock, 100);

    assert_eq!(s.mode(), Mode::Navigation);
    assert!(!focus.is_held());
    assert_eq!(s.feedback().0.last(), Some(&TONE_TIMEOUT));
    assert_eq!(s.hid().pointer_total(), (0, 0));
    assert_eq!(s.view().0.map(|v| v.mode), Some(ModeView::Navigation));
}
