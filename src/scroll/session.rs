//! Scroll session state machine.
//!
//! Two modes share the knob:
//!
//! - **Navigation**: ticks are ignored here; sibling consumers own the knob.
//! - **ScrollLock**: ticks are buffered and flushed to the host as wheel
//!   reports; the session holds the encoder focus.
//!
//! Everything runs from the owner's control loop. Entry points never block:
//! paced HID sequences and multi-part tones go through a [`StepQueue`] that
//! [`Session::tick`] drains.
//!
//! On engaging scroll lock with the host connected, a one-off pointer
//! "kick" wakes hosts that drop the first motion after a fresh link. The
//! kick is reversed before scroll lock is left so the host cursor does not
//! drift across sessions.

use crate::config::{
    HID_STEP_PACING_MS, INACTIVITY_TIMEOUT_MS, KICK_STEP_PX, KICK_WHEEL_NUDGE,
    STEP_QUEUE_CAPACITY, TONE_LOCK_HIGH, TONE_LOCK_LOW, TONE_TIMEOUT, TONE_UNLOCK,
};
use crate::hid::HidSink;
use crate::input::ButtonEvent;

use super::accumulator::{scroll_amount, ScrollAccumulator};
use super::link::{LinkMonitor, LinkTransition};
use super::ports::{Clock, FeedbackSink, FocusArbiter, ViewObserver};
use super::settings::ScrollSettings;
use super::steps::{Step, StepQueue};
use super::view::{ModeView, ViewState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Navigation,
    ScrollLock,
}

/// Why scroll lock is being left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Exit {
    Manual,
    Timeout,
}

pub struct Session<H, F, A, C, V> {
    hid: H,
    feedback: F,
    focus: A,
    clock: C,
    view: V,

    mode: Mode,
    active: bool,
    settings: ScrollSettings,
    last_activity: u32,
    /// A kick is on the host and has not been reversed yet.
    cursor_offset_applied: bool,
    /// Net pointer displacement the host has actually received from kick
    /// and recenter steps.
    applied_offset: (i32, i32),
    transport_started: bool,

    accumulator: ScrollAccumulator,
    link: LinkMonitor,
    steps: StepQueue<STEP_QUEUE_CAPACITY>,
}

impl<H, F, A, C, V> Session<H, F, A, C, V>
where
    H: HidSink,
    F: FeedbackSink,
    A: FocusArbiter,
    C: Clock,
    V: ViewObserver,
{
    /// Build an inactive session. Call [`Session::enter`] before feeding
    /// input.
    pub fn new(hid: H, feedback: F, focus: A, clock: C, view: V) -> Self {
        Self {
            hid,
            feedback,
            focus,
            clock,
            view,
            mode: Mode::Navigation,
            active: false,
            settings: ScrollSettings::default(),
            last_activity: 0,
            cursor_offset_applied: false,
            applied_offset: (0, 0),
            transport_started: false,
            accumulator: ScrollAccumulator::new(),
            link: LinkMonitor::new(),
            steps: StepQueue::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────────

    /// The scroll screen came to the foreground.
    pub fn enter(&mut self) {
        let now = self.clock.now_ms();
        let connected = self.hid.is_connected();
        let relock = self.mode == Mode::ScrollLock;
        if relock {
            self.focus.release();
        }

        self.active = true;
        self.mode = Mode::Navigation;
        self.last_activity = now;
        self.accumulator.reset(now);
        self.link.reset(now, connected);
        self.steps.clear();

        if relock {
            // Entered again without a leave: this engagement's kick is
            // still on the host.
            self.reset_at(now);
        } else {
            self.cursor_offset_applied = false;
            self.applied_offset = (0, 0);
        }

        info!("session: enter (connected={})", connected);
        self.refresh();
    }

    /// The scroll screen went to the background.
    ///
    /// Silent: no tones, no compensation. Always ends in Navigation with
    /// the focus released.
    pub fn leave(&mut self) {
        if self.mode == Mode::ScrollLock {
            self.focus.release();
        }
        self.active = false;
        self.mode = Mode::Navigation;
        self.accumulator.clear();
        self.link.cancel_kick();
        self.steps.clear();

        info!("session: leave");
    }

    // ───────────────────────────────────────────────────────────────────
    // Input entry points
    // ───────────────────────────────────────────────────────────────────

    pub fn handle_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Toggle => self.on_button_press(),
            ButtonEvent::Speed => self.toggle_speed(),
            ButtonEvent::Invert => self.toggle_invert(),
            ButtonEvent::Screen => {
                if self.active {
                    self.leave();
                } else {
                    self.enter();
                }
            }
        }
    }

    /// Knob press: flip between Navigation and ScrollLock.
    pub fn on_button_press(&mut self) {
        if !self.active {
            return;
        }
        let now = self.clock.now_ms();
        self.last_activity = now;
        self.start_transport();

        match self.mode {
            Mode::Navigation => self.engage(now),
            Mode::ScrollLock => self.disengage(now, Exit::Manual),
        }
        self.refresh();
    }

    /// Raw encoder delta, in detents.
    pub fn on_encoder_tick(&mut self, delta: i32) {
        if !self.active {
            return;
        }
        self.last_activity = self.clock.now_ms();

        if self.mode != Mode::ScrollLock || !self.hid.is_connected() {
            return;
        }
        self.accumulator.accumulate(delta);
    }

    pub fn toggle_speed(&mut self) {
        self.last_activity = self.clock.now_ms();
        self.settings.speed = self.settings.speed.next();
        info!("session: speed {}", self.settings.speed.label());
        self.refresh();
    }

    pub fn toggle_invert(&mut self) {
        self.last_activity = self.clock.now_ms();
        self.settings.invert = !self.settings.invert;
        info!("session: invert {}", self.settings.invert);
        self.refresh();
    }

    /// Periodic entry point; call at 60 Hz or faster.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        let now = self.clock.now_ms();

        self.run_due_steps(now);

        if self.link.take_due_kick(now)
            && self.mode == Mode::ScrollLock
            && self.hid.is_connected()
        {
            info!("session: deferred kick");
            self.kick_at(now);
        }

        self.flush(now);
        self.check_inactivity(now);
        self.poll_link(now);
    }

    // ───────────────────────────────────────────────────────────────────
    // Drift compensation
    // ───────────────────────────────────────────────────────────────────

    /// Wake the host with an oversized pointer move and a wheel nudge.
    /// Applied at most once until [`Session::reset_cursor`] reverses it.
    pub fn kick(&mut self) {
        let now = self.clock.now_ms();
        self.kick_at(now);
    }

    /// Undo a previous kick. Without a connection the host cursor state is
    /// unknown, so the flag is just cleared.
    pub fn reset_cursor(&mut self) {
        let now = self.clock.now_ms();
        self.reset_at(now);
    }

    fn kick_at(&mut self, now: u32) {
        if self.cursor_offset_applied {
            return;
        }
        self.schedule(now, 0, Step::pointer(KICK_STEP_PX, KICK_STEP_PX));
        self.schedule(now, HID_STEP_PACING_MS, Step::pointer(KICK_STEP_PX, KICK_STEP_PX));
        self.schedule(now, HID_STEP_PACING_MS, Step::wheel(-KICK_WHEEL_NUDGE));
        self.schedule(now, HID_STEP_PACING_MS, Step::wheel(KICK_WHEEL_NUDGE));
        self.cursor_offset_applied = true;
        debug!("session: kick queued");
        self.run_due_steps(now);
    }

    fn reset_at(&mut self, now: u32) {
        if !self.cursor_offset_applied && self.applied_offset == (0, 0) {
            return;
        }
        self.cursor_offset_applied = false;
        if !self.hid.is_connected() {
            debug!("session: offset dropped while disconnected");
            self.applied_offset = (0, 0);
            return;
        }
        // Queued behind any kick moves still in flight, so the inverse is
        // computed from what really reached the host.
        self.schedule(now, 0, Step::recenter(false));
        self.schedule(now, HID_STEP_PACING_MS, Step::recenter(true));
        debug!("session: reset queued");
        self.run_due_steps(now);
    }

    // ───────────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────────

    fn engage(&mut self, now: u32) {
        self.mode = Mode::ScrollLock;
        self.focus.acquire();
        self.accumulator.reset(now);

        self.schedule(now, 0, Step::tone(TONE_LOCK_LOW));
        self.schedule(now, HID_STEP_PACING_MS, Step::tone(TONE_LOCK_HIGH));

        if self.hid.is_connected() {
            self.kick_at(now);
        } else {
            debug!("session: host not connected, kick deferred");
        }
        self.run_due_steps(now);
        info!("session: scroll lock engaged");
    }

    fn disengage(&mut self, now: u32, exit: Exit) {
        self.mode = Mode::Navigation;
        self.focus.release();
        self.accumulator.clear();
        self.link.cancel_kick();

        let tone = match exit {
            Exit::Manual => TONE_UNLOCK,
            Exit::Timeout => TONE_TIMEOUT,
        };
        self.schedule(now, 0, Step::tone(tone));
        self.reset_at(now);
        self.run_due_steps(now);
        info!("session: scroll lock released ({})", exit);
    }

    // ───────────────────────────────────────────────────────────────────
    // Periodic work
    // ───────────────────────────────────────────────────────────────────

    fn flush(&mut self, now: u32) {
        let Some(pending) = self.accumulator.take_due(now) else {
            return;
        };
        if pending == 0 || self.mode != Mode::ScrollLock || !self.hid.is_connected() {
            return;
        }
        let amount = scroll_amount(pending, &self.settings);
        self.hid.move_relative(0, 0, amount);
    }

    fn check_inactivity(&mut self, now: u32) {
        if self.mode != Mode::ScrollLock || !self.hid.is_connected() {
            return;
        }
        if now.wrapping_sub(self.last_activity) > INACTIVITY_TIMEOUT_MS {
            warn!("session: inactivity timeout");
            self.disengage(now, Exit::Timeout);
            self.refresh();
        }
    }

    fn poll_link(&mut self, now: u32) {
        if !self.link.is_due(now) {
            return;
        }
        match self.link.poll(now, self.hid.is_connected()) {
            LinkTransition::None => {}
            LinkTransition::Connected => {
                if self.mode == Mode::ScrollLock {
                    self.link.arm_kick(now);
                }
                self.refresh();
            }
            LinkTransition::Disconnected => self.refresh(),
        }
    }

    // ───────────────────────────────────────────────────────────────────
    // Helpers
    // ───────────────────────────────────────────────────────────────────

    fn start_transport(&mut self) {
        if self.transport_started {
            return;
        }
        self.hid.start();
        self.transport_started = true;
        info!("session: transport started");
    }

    /// Queue a step. A full queue runs its oldest step early; kick and
    /// reset moves must never be lost.
    fn schedule(&mut self, now: u32, delay_ms: u32, step: Step) {
        if self.steps.push(now, delay_ms, step).is_ok() {
            return;
        }
        warn!("session: step queue full, running oldest early");
        if let Some(oldest) = self.steps.pop_front() {
            self.run_step(oldest);
        }
        if self.steps.push(now, delay_ms, step).is_err() {
            warn!("session: step dropped");
        }
    }

    fn run_due_steps(&mut self, now: u32) {
        while let Some(step) = self.steps.pop_due(now) {
            self.run_step(step);
        }
    }

    fn run_step(&mut self, step: Step) {
        match step {
            Step::Pointer { dx, dy, wheel } => {
                if self.hid.is_connected() {
                    self.move_pointer(dx, dy, wheel);
                } else if dx != 0 || dy != 0 {
                    // The kick did not land; let the next connect edge retry.
                    debug!("session: kick move skipped, host gone");
                    self.cursor_offset_applied = false;
                }
            }
            Step::Recenter { final_step } => {
                if !self.hid.is_connected() {
                    debug!("session: recenter skipped, host gone");
                    self.applied_offset = (0, 0);
                    return;
                }
                let (ax, ay) = self.applied_offset;
                let (dx, dy) = if final_step {
                    (ax.saturating_neg(), ay.saturating_neg())
                } else {
                    (
                        ax.saturating_neg().clamp(-KICK_STEP_PX, KICK_STEP_PX),
                        ay.saturating_neg().clamp(-KICK_STEP_PX, KICK_STEP_PX),
                    )
                };
                if dx != 0 || dy != 0 {
                    self.move_pointer(dx, dy, 0);
                }
            }
            Step::Tone {
                freq_hz,
                duration_ms,
            } => self.feedback.tone(freq_hz, duration_ms),
        }
    }

    fn move_pointer(&mut self, dx: i32, dy: i32, wheel: i32) {
        self.hid.move_relative(dx, dy, wheel);
        let (ax, ay) = self.applied_offset;
        self.applied_offset = (ax.saturating_add(dx), ay.saturating_add(dy));
    }

    fn refresh(&mut self) {
        let view = self.view_state();
        self.view.refresh(&view);
    }

    // ───────────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────────

    pub fn view_state(&self) -> ViewState {
        let connected = self.hid.is_connected();
        let mode = match (self.mode, connected) {
            (Mode::Navigation, _) => ModeView::Navigation,
            (Mode::ScrollLock, true) => ModeView::Scrolling,
            (Mode::ScrollLock, false) => ModeView::Connecting,
        };
        ViewState {
            mode,
            connected,
            settings: self.settings,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn settings(&self) -> ScrollSettings {
        self.settings
    }

    pub fn cursor_offset_applied(&self) -> bool {
        self.cursor_offset_applied
    }

    /// Pointer offset currently on the host from kick/recenter moves.
    pub fn applied_offset(&self) -> (i32, i32) {
        self.applied_offset
    }

    pub fn pending_ticks(&self) -> i32 {
        self.accumulator.pending()
    }

    pub fn kick_pending(&self) -> bool {
        self.link.kick_pending()
    }

    /// Steps still waiting for their deadline.
    pub fn queued_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn hid_mut(&mut self) -> &mut H {
        &mut self.hid
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn focus(&self) -> &A {
        &self.focus
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
