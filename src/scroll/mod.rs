//! Encoder-to-scroll translation.
//!
//! The [`Session`] owns the mode state machine and drives the pieces below
//! from a single periodic tick:
//!
//! - [`accumulator`]: tick buffering, momentum guard, velocity ramp
//! - [`link`]: connection edge detection and the deferred wake kick
//! - [`steps`]: paced HID/tone sequences without blocking
//! - [`view`]: status-screen model handed to the redraw hook

pub mod accumulator;
pub mod link;
pub mod ports;
pub mod session;
pub mod settings;
pub mod steps;
pub mod view;


pub use link::LinkTransition;
pub use ports::{Clock, FeedbackSink, FocusArbiter, SharedFocus, ViewObserver};
pub use session::{Mode, Session};
pub use settings::{ScrollSettings, ScrollSpeed};
pub use view::{ModeView, ViewState};
