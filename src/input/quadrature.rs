//! Quadrature decoding for the knob.
//!
//! Pin levels are packed as `(A << 1) | B`. Clockwise rotation (A leads B)
//! walks 00 → 10 → 11 → 01 → 00. Transitions that flip both pins at once
//! are impossible on a clean signal and are ignored as noise.

/// Quarter-steps per mechanical detent.
pub const STEPS_PER_DETENT: i8 = 4;

/// Direction of each `(previous << 2) | current` transition.
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    state: u8,
    quarter_steps: i8,
}

impl QuadratureDecoder {
    /// Start from the current pin levels.
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: pack(a, b),
            quarter_steps: 0,
        }
    }

    /// Feed one sample. Returns +1 / -1 when a full detent completes
    /// (clockwise positive), else 0.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let next = pack(a, b);
        if next == self.state {
            return 0;
        }
        let index = ((self.state << 2) | next) as usize;
        self.state = next;
        self.quarter_steps += TRANSITIONS[index];

        if self.quarter_steps >= STEPS_PER_DETENT {
            self.quarter_steps = 0;
            1
        } else if self.quarter_steps <= -STEPS_PER_DETENT {
            self.quarter_steps = 0;
            -1
        } else {
            0
        }
    }
}

fn pack(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const CW: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];
    const CCW: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn feed(dec: &mut QuadratureDecoder, seq: &[(bool, bool)]) -> i32 {
        seq.iter().map(|&(a, b)| dec.update(a, b) as i32).sum()
    }

    #[test]
    fn clockwise_detent_is_positive() {
        let mut dec = QuadratureDecoder::new(false, false);
        assert_eq!(feed(&mut dec, &CW), 1);
        assert_eq!(feed(&mut dec, &CW), 1);
    }

    #[test]
    fn counter_clockwise_detent_is_negative() {
        let mut dec = QuadratureDecoder::new(false, false);
        assert_eq!(feed(&mut dec, &CCW), -1);
    }

    #[test]
    fn bounce_on_one_pin_cancels_out() {
        let mut dec = QuadratureDecoder::new(false, false);
        let bounce = [(true, false), (false, false), (true, false), (false, false)];
        assert_eq!(feed(&mut dec, &bounce), 0);
        // A full detent afterwards still registers.
        assert_eq!(feed(&mut dec, &CW), 1);
    }

    #[test]
    fn double_pin_jump_is_ignored() {
        let mut dec = QuadratureDecoder::new(false, false);
        assert_eq!(dec.update(true, true), 0);
        assert_eq!(dec.update(false, false), 0);
        assert_eq!(feed(&mut dec, &CCW), -1);
    }

    #[test]
    fn repeated_samples_are_no_ops() {
        let mut dec = QuadratureDecoder::new(true, true);
        for _ in 0..10 {
            assert_eq!(dec.update(true, true), 0);
        }
    }
}
