use crate::input::{InputFrame, Key};

/// Result of one [`HoldAxis::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMotion {
    /// Signed movement for this tick.
    pub delta: f64,
    /// Either key had a press edge this tick.
    pub pressed: bool,
}

/// Two opposing keys with tap-then-accelerate behaviour.
///
/// A press moves one unit immediately. Once a key has been held for longer than `threshold`
/// seconds it keeps moving at `rate` units per second, scaled by the tick's frame time.
#[derive(Clone, Debug)]
pub struct HoldAxis {
    negative: Key,
    positive: Key,
    threshold: f64,
    rate: f64,
    negative_since: Option<f64>,
    positive_since: Option<f64>,
}

impl HoldAxis {
    /// Axis driven by a negative and a positive key.
    pub fn new(negative: Key, positive: Key, threshold: f64, rate: f64) -> Self {
        Self {
            negative,
            positive,
            threshold,
            rate,
            negative_since: None,
            positive_since: None,
        }
    }

    /// Forget any in-progress holds.
    pub fn reset(&mut self) {
        self.negative_since = None;
        self.positive_since = None;
    }

    /// Motion produced by this tick's input.
    pub fn update(&mut self, input: &InputFrame) -> AxisMotion {
        let neg = step_key(
            input,
            self.negative,
            &mut self.negative_since,
            self.threshold,
            self.rate,
        );
        let pos = step_key(
            input,
            self.positive,
            &mut self.positive_since,
            self.threshold,
            self.rate,
        );
        AxisMotion {
            delta: pos.delta - neg.delta,
            pressed: neg.pressed || pos.pressed,
        }
    }
}

fn step_key(
    input: &InputFrame,
    key: Key,
    since: &mut Option<f64>,
    threshold: f64,
    rate: f64,
) -> AxisMotion {
    let mut motion = AxisMotion::default();
    if input.is_pressed(key) {
        motion.pressed = true;
        motion.delta += 1.0;
        *since = Some(input.time);
    }
    if input.is_down(key)
        && let Some(start) = *since
        && input.time - start > threshold
    {
        motion.delta += rate * input.frame_time;
    }
    if input.is_released(key) {
        *since = None;
    }
    motion
}

#[cfg(test)]
#[path = "../../tests/unit/control/hold.rs"]
mod tests;
