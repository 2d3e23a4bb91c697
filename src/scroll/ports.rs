//! Collaborators the scroll session talks to, besides the HID sink.

use core::sync::atomic::{AtomicBool, Ordering};

use super::view::ViewState;

/// Monotonic millisecond counter. Wraps at `u32::MAX`; every consumer
/// uses wrapping subtraction.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Short audible cues. Non-blocking.
pub trait FeedbackSink {
    fn tone(&mut self, freq_hz: u16, duration_ms: u16);
}

impl<T: FeedbackSink + ?Sized> FeedbackSink for &mut T {
    fn tone(&mut self, freq_hz: u16, duration_ms: u16) {
        (**self).tone(freq_hz, duration_ms)
    }
}

/// Ownership of the physical encoder.
///
/// While held, sibling consumers of the same knob must ignore its ticks.
/// The session holds it exactly while in scroll lock.
pub trait FocusArbiter {
    fn acquire(&self);
    fn release(&self);
    fn is_held(&self) -> bool;
}

impl<T: FocusArbiter + ?Sized> FocusArbiter for &T {
    fn acquire(&self) {
        (**self).acquire()
    }

    fn release(&self) {
        (**self).release()
    }

    fn is_held(&self) -> bool {
        (**self).is_held()
    }
}

/// Process-wide focus flag, shareable as a `static`.
#[derive(Debug, Default)]
pub struct SharedFocus {
    held: AtomicBool,
}

impl SharedFocus {
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }
}

impl FocusArbiter for SharedFocus {
    fn acquire(&self) {
        self.held.store(true, Ordering::Release);
    }

    fn release(&self) {
        self.held.store(false, Ordering::Release);
    }

    fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Redraw hook. Invoked whenever mode, link state or settings change.
pub trait ViewObserver {
    fn refresh(&mut self, view: &ViewState);
}

impl<T: ViewObserver + ?Sized> ViewObserver for &mut T {
    fn refresh(&mut self, view: &ViewState) {
        (**self).refresh(view)
    }
}

/// Headless operation.
impl ViewObserver for () {
    fn refresh(&mut self, _view: &ViewState) {}
}
