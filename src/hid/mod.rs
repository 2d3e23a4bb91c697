//! HID output side: the mouse report format and the sink the scroll
//! session writes to.

pub mod mouse;

#[cfg(test)]
mod tests;

pub use mouse::{split_motion, MouseReport};

/// Relative pointer/scroll output towards the host.
///
/// Writes are fire-and-forget. A write issued while disconnected is
/// silently dropped, so callers check [`HidSink::is_connected`] first.
pub trait HidSink {
    /// Whether the host link is up and accepting reports.
    fn is_connected(&self) -> bool;

    /// Queue one relative motion (pointer X/Y and wheel).
    fn move_relative(&mut self, dx: i32, dy: i32, wheel: i32);

    /// Bring up the transport. Called at most once per power cycle.
    fn start(&mut self);
}

impl<T: HidSink + ?Sized> HidSink for &mut T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn move_relative(&mut self, dx: i32, dy: i32, wheel: i32) {
        (**self).move_relative(dx, dy, wheel)
    }

    fn start(&mut self) {
        (**self).start()
    }
}
