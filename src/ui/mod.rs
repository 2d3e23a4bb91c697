//! User interface subsystem - OLED display + physical buttons.
//!
//! The scroll session publishes a `ViewState` whenever mode, link or
//! settings change; the display task redraws from the latest one.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 4 tactile switches with debouncing (KNOB, SPEED,
//!   INVERT, SCREEN)

pub mod buttons;
pub mod display;
