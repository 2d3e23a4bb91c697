//! Physical inputs: the knob (quadrature encoder + push switch) and the
//! settings buttons.

pub mod quadrature;

pub use quadrature::QuadratureDecoder;

/// Physical button events (after debouncing).
///
///   - TOGGLE: knob press, flips scroll lock
///   - SPEED:  cycle 1x / 3x / 5x
///   - INVERT: flip scroll direction
///   - SCREEN: bring the scroll screen to the foreground or background
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Toggle,
    Speed,
    Invert,
    Screen,
}

/// Everything the input tasks send to the control loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Button(ButtonEvent),
    /// Signed detent count since the previous event.
    Encoder(i32),
}
