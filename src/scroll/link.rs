//! Low-rate host link polling and the deferred wake kick.
//!
//! Connection queries are comparatively expensive, so the link is
//! sampled on its own slow cadence and only edges are reported.

use crate::config::{KICK_DELAY_MS, LINK_POLL_INTERVAL_MS};

/// Result of one link poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkTransition {
    None,
    Connected,
    Disconnected,
}

#[derive(Debug, Default)]
pub struct LinkMonitor {
    last_poll: u32,
    last_connected: bool,
    kick_deadline: Option<u32>,
}

impl LinkMonitor {
    pub const fn new() -> Self {
        Self {
            last_poll: 0,
            last_connected: false,
            kick_deadline: None,
        }
    }

    /// Restart polling at `now` with a known link state. Cancels any
    /// armed kick.
    pub fn reset(&mut self, now: u32, connected: bool) {
        self.last_poll = now;
        self.last_connected = connected;
        self.kick_deadline = None;
    }

    pub fn last_connected(&self) -> bool {
        self.last_connected
    }

    /// Whether the next poll window is open.
    pub fn is_due(&self, now: u32) -> bool {
        now.wrapping_sub(self.last_poll) > LINK_POLL_INTERVAL_MS
    }

    /// Feed one sample. Outside a poll window the sample is ignored and
    /// [`LinkTransition::None`] is returned.
    pub fn poll(&mut self, now: u32, connected: bool) -> LinkTransition {
        if !self.is_due(now) {
            return LinkTransition::None;
        }
        self.last_poll = now;

        if connected == self.last_connected {
            return LinkTransition::None;
        }
        self.last_connected = connected;

        if connected {
            info!("link: host connected");
            LinkTransition::Connected
        } else {
            info!("link: host disconnected");
            LinkTransition::Disconnected
        }
    }

    /// Schedule the wake kick [`KICK_DELAY_MS`] after `now`. Re-arming
    /// pushes the deadline out; it never queues a second kick.
    pub fn arm_kick(&mut self, now: u32) {
        self.kick_deadline = Some(now.wrapping_add(KICK_DELAY_MS));
    }

    pub fn cancel_kick(&mut self) {
        self.kick_deadline = None;
    }

    pub fn kick_pending(&self) -> bool {
        self.kick_deadline.is_some()
    }

    /// One-shot: returns `true` exactly once, on the first call strictly
    /// after the deadline, and disarms.
    pub fn take_due_kick(&mut self, now: u32) -> bool {
        match self.kick_deadline {
            Some(deadline) if is_after(now, deadline) => {
                self.kick_deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// `a > b` on a wrapping millisecond clock.
pub(crate) fn is_after(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_edges() {
        let mut link = LinkMonitor::new();
        link.reset(0, false);

        assert_eq!(link.poll(501, false), LinkTransition::None);
        assert_eq!(link.poll(1_002, true), LinkTransition::Connected);
        assert_eq!(link.poll(1_503, true), LinkTransition::None);
        assert_eq!(link.poll(2_004, false), LinkTransition::Disconnected);
    }

    #[test]
    fn samples_outside_window_are_ignored() {
        let mut link = LinkMonitor::new();
        link.reset(0, false);

        assert!(!link.is_due(500));
        assert_eq!(link.poll(500, true), LinkTransition::None);
        assert!(!link.last_connected());
        assert_eq!(link.poll(501, true), LinkTransition::Connected);
    }

    #[test]
    fn kick_fires_once_strictly_after_deadline() {
        let mut link = LinkMonitor::new();
        link.arm_kick(2_000);
        assert!(link.kick_pending());

        assert!(!link.take_due_kick(2_999));
        assert!(!link.take_due_kick(3_000));
        assert!(link.take_due_kick(3_001));
        assert!(!link.take_due_kick(3_002));
        assert!(!link.kick_pending());
    }

    #[test]
    fn reset_cancels_armed_kick() {
        let mut link = LinkMonitor::new();
        link.arm_kick(0);
        link.reset(10, true);
        assert!(!link.take_due_kick(5_000));
    }

    #[test]
    fn kick_deadline_across_clock_wrap() {
        let mut link = LinkMonitor::new();
        link.arm_kick(u32::MAX - 100);
        assert!(!link.take_due_kick(u32::MAX));
        assert!(!link.take_due_kick(899));
        assert!(link.take_due_kick(900));
    }
}
