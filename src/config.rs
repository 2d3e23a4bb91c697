//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and tuning
//! constants live here so they can be tuned in one place.

// Control loop

/// Period of the host control loop tick (ms). 10 ms = 100 Hz, above the
/// 60 Hz floor the scroll cadence needs.
pub const CONTROL_TICK_MS: u64 = 10;

/// Minimum spacing between scroll flushes (ms). A flush happens once the
/// elapsed time is strictly greater than this.
pub const SCROLL_FLUSH_INTERVAL_MS: u32 = 15;

/// Connection-state poll period (ms).
pub const LINK_POLL_INTERVAL_MS: u32 = 500;

/// Delay between a connect edge and the deferred wake kick (ms).
pub const KICK_DELAY_MS: u32 = 1000;

/// ScrollLock auto-reverts after this much inactivity (ms). 5 minutes.
pub const INACTIVITY_TIMEOUT_MS: u32 = 300_000;

// Scroll ramp

/// Multiplier applied to a single slow tick.
pub const RAMP_BASE: i32 = 3;

/// Multiplier growth per accumulated tick.
pub const RAMP_SLOPE: i32 = 2;

/// Upper bound of the ramp multiplier.
pub const RAMP_CAP: i32 = 10;

/// Accumulated magnitude above which reverse ticks are treated as bounce.
pub const MOMENTUM_GUARD_TICKS: i32 = 2;

/// Smallest non-zero wheel amount sent to the host.
pub const SCROLL_OUTPUT_FLOOR: i32 = 2;

// Drift compensation

/// Per-step pointer displacement of the wake kick. Applied twice.
pub const KICK_STEP_PX: i32 = 100;

/// Wheel nudge sent after the kick moves (sent as -N then +N).
pub const KICK_WHEEL_NUDGE: i32 = 2;

/// Pacing between consecutive HID writes of a kick/reset sequence (ms).
pub const HID_STEP_PACING_MS: u32 = 50;

/// Capacity of the timed step queue.
pub const STEP_QUEUE_CAPACITY: usize = 16;

// Feedback tones (frequency Hz, duration ms)

pub const TONE_LOCK_LOW: (u16, u16) = (1000, 50);
pub const TONE_LOCK_HIGH: (u16, u16) = (1200, 50);
pub const TONE_UNLOCK: (u16, u16) = (500, 100);
/// Longer and lower than the manual unlock tone.
pub const TONE_TIMEOUT: (u16, u16) = (200, 500);

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "scrollknob";
pub const USB_PRODUCT: &str = "Scroll Knob HID Mouse";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

/// Depth of the mouse report channel between the session and USB writer.
pub const HID_REPORT_QUEUE_DEPTH: usize = 16;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*` pins
// are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A        → P0.03
//   Encoder B        → P0.04
//   Button KNOB      → P0.11   (toggle scroll lock)
//   Button SPEED     → P0.12
//   Button INVERT    → P0.24
//   Button SCREEN    → P0.25   (foreground / background the scroll screen)
//   Buzzer (PWM)     → P0.28
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Encoder pin sampling period (ms).
pub const ENCODER_POLL_MS: u64 = 1;

/// Depth of the input event channel feeding the control loop.
pub const INPUT_QUEUE_DEPTH: usize = 32;
