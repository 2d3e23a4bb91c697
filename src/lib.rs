//! Host-testable core of scrollknob.
//!
//! Everything here is pure logic with no hardware access: the scroll
//! session state machine, the mouse report format, and the quadrature
//! decoder. The embedded binary (`main.rs`, feature `embedded`) wires
//! these to USB, GPIO, PWM and the display.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This crate stays `no_std` outside of its own unit tests.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod hid;
pub mod input;
pub mod scroll;

pub use error::Error;
pub use hid::HidSink;
pub use scroll::Session;
