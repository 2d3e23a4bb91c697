//! USB Device subsystem - presents an HID mouse to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  The scroll session pushes mouse reports into a
//! channel; a writer task drains them to the HID endpoint.

pub mod hid_device;
