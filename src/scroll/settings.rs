//! User-selectable scroll settings.

/// Scalar applied after the velocity ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollSpeed {
    #[default]
    X1,
    X3,
    X5,
}

impl ScrollSpeed {
    pub const fn factor(self) -> i32 {
        match self {
            ScrollSpeed::X1 => 1,
            ScrollSpeed::X3 => 3,
            ScrollSpeed::X5 => 5,
        }
    }

    /// 1x -> 3x -> 5x -> 1x.
    pub const fn next(self) -> Self {
        match self {
            ScrollSpeed::X1 => ScrollSpeed::X3,
            ScrollSpeed::X3 => ScrollSpeed::X5,
            ScrollSpeed::X5 => ScrollSpeed::X1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScrollSpeed::X1 => "1x",
            ScrollSpeed::X3 => "3x",
            ScrollSpeed::X5 => "5x",
        }
    }
}

/// Settings survive screen changes; they reset only on power cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollSettings {
    pub speed: ScrollSpeed,
    /// When set, the knob's natural direction is passed through.
    pub invert: bool,
}
