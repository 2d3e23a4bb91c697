//! Logging shims for the library.
//!
//! - With the `defmt` feature: forwards to `defmt` (RTT on target).
//! - Without it (host tests, plain library use): compiles to nothing.
//!
//! Only plain `{}` placeholders are used so the same format strings are
//! valid for both back-ends. Declared first in `lib.rs` with `#[macro_use]`
//! so every module sees the macros.

#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
    }};
}
