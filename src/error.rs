//! Unified error type for scrollknob.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Session
    /// The timed step queue has no free slot.
    StepQueueFull,

    // USB
    /// The HID report channel towards the USB writer is full.
    ReportQueueFull,

    /// USB stack returned an error.
    Usb,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::StepQueueFull => "step queue full",
            Error::ReportQueueFull => "HID report queue full",
            Error::Usb => "USB error",
            Error::Display => "display error",
        };
        f.write_str(msg)
    }
}
