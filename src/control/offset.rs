use crate::input::{InputFrame, Key};

use super::hold::HoldAxis;

/// Left/Right control producing whole-pixel offset deltas.
///
/// Fractional movement from accelerated holds is carried over between ticks.
#[derive(Clone, Debug)]
pub struct OffsetControl {
    axis: HoldAxis,
    carry: f64,
}

impl OffsetControl {
    /// Left/Right offset control; holds accelerate after `threshold` seconds to `rate` steps/s.
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self {
            axis: HoldAxis::new(Key::Left, Key::Right, threshold, rate),
            carry: 0.0,
        }
    }

    /// Whole-pixel offset change for this tick.
    pub fn update(&mut self, input: &InputFrame) -> i64 {
        self.carry += self.axis.update(input).delta;
        let whole = self.carry.trunc();
        self.carry -= whole;
        whole as i64
    }
}
