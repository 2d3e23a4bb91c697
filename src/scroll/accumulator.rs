//! Encoder tick buffering and the velocity ramp.
//!
//! Ticks arrive in bursts at whatever rate the knob is turned. They are
//! summed here and drained on a fixed cadence, so the host sees a steady
//! stream of wheel reports whose size grows with rotation speed.

use crate::config::{
    MOMENTUM_GUARD_TICKS, RAMP_BASE, RAMP_CAP, RAMP_SLOPE, SCROLL_FLUSH_INTERVAL_MS,
    SCROLL_OUTPUT_FLOOR,
};

use super::settings::ScrollSettings;

#[derive(Debug, Default)]
pub struct ScrollAccumulator {
    pending: i32,
    last_flush: u32,
}

impl ScrollAccumulator {
    pub const fn new() -> Self {
        Self {
            pending: 0,
            last_flush: 0,
        }
    }

    /// Drop buffered ticks and restart the flush cadence at `now`.
    pub fn reset(&mut self, now: u32) {
        self.pending = 0;
        self.last_flush = now;
    }

    pub fn clear(&mut self) {
        self.pending = 0;
    }

    pub fn pending(&self) -> i32 {
        self.pending
    }

    /// Add a raw encoder delta. Returns `false` when the momentum guard
    /// discarded it.
    ///
    /// Once more than [`MOMENTUM_GUARD_TICKS`] are buffered in one
    /// direction, a tick in the other direction is treated as bounce.
    pub fn accumulate(&mut self, delta: i32) -> bool {
        if self.pending.abs() > MOMENTUM_GUARD_TICKS
            && delta != 0
            && delta.signum() != self.pending.signum()
        {
            debug!("scroll: reverse tick {} dropped (pending {})", delta, self.pending);
            return false;
        }
        self.pending = self.pending.saturating_add(delta);
        true
    }

    /// Opens a flush window when more than the flush interval has passed.
    ///
    /// Returns the drained tick count for the window (possibly zero).
    /// The buffer is empty afterwards whether or not the caller emits.
    pub fn take_due(&mut self, now: u32) -> Option<i32> {
        if now.wrapping_sub(self.last_flush) <= SCROLL_FLUSH_INTERVAL_MS {
            return None;
        }
        self.last_flush = now;
        Some(core::mem::take(&mut self.pending))
    }
}

/// Saturating linear ramp: `min(cap, base + slope * velocity)`.
pub fn ramp_multiplier(velocity: i32) -> i32 {
    RAMP_BASE
        .saturating_add(velocity.saturating_mul(RAMP_SLOPE))
        .min(RAMP_CAP)
}

/// Lifts a non-zero amount below the floor up to the floor, keeping sign.
pub fn apply_output_floor(amount: i32) -> i32 {
    if amount != 0 && amount.abs() < SCROLL_OUTPUT_FLOOR {
        SCROLL_OUTPUT_FLOOR * amount.signum()
    } else {
        amount
    }
}

/// Wheel amount for `pending` buffered ticks.
///
/// The knob's raw direction is reversed relative to the expected scroll
/// direction, so output is negated unless `invert` is set.
pub fn scroll_amount(pending: i32, settings: &ScrollSettings) -> i32 {
    let multiplier = ramp_multiplier(pending.saturating_abs());
    let mut amount = pending
        .saturating_mul(multiplier)
        .saturating_mul(settings.speed.factor());

    amount = amount.saturating_neg();
    if settings.invert {
        amount = amount.saturating_neg();
    }

    apply_output_floor(amount)
}
