use crate::foundation::core::Point;
use crate::input::{InputFrame, Key};
use crate::layout::Layout;

use super::hold::HoldAxis;

/// Horizontal scan bar over the displayed source image.
///
/// The bar follows the mouse until Up/Down take over ("manual" control); any mouse movement hands
/// control back to the mouse.
#[derive(Clone, Debug)]
pub struct ScanBar {
    y: f64,
    manual: bool,
    last_mouse: Option<Point>,
    axis: HoldAxis,
}

impl ScanBar {
    /// Mouse-driven bar; Up/Down accelerate after `threshold` seconds to `rate` pixels/s.
    pub fn new(threshold: f64, rate: f64) -> Self {
        Self {
            y: 0.0,
            manual: false,
            last_mouse: None,
            axis: HoldAxis::new(Key::Up, Key::Down, threshold, rate),
        }
    }

    /// Screen-space y of the bar.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Whether Up/Down currently own the bar.
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    /// Follow the mouse or the held keys, clamped to the displayed image rows.
    pub fn update(&mut self, input: &InputFrame, layout: &Layout) {
        if self.last_mouse != Some(input.mouse) {
            self.manual = false;
            self.axis.reset();
        }
        self.last_mouse = Some(input.mouse);

        let motion = self.axis.update(input);
        if motion.pressed {
            self.manual = true;
        }
        self.y += motion.delta;

        if !self.manual {
            self.y = input.mouse.y;
        }

        let top = f64::from(layout.pos_y);
        let bottom = top + f64::from(layout.final_height) - 1.0;
        if self.y < top {
            self.y = top;
        }
        if self.y > bottom {
            self.y = bottom;
        }
    }

    /// Whether the bar (and its plot) should be shown this tick.
    pub fn is_visible(&self, input: &InputFrame, layout: &Layout) -> bool {
        self.manual || layout.image_bounds().contains(input.mouse)
    }

    /// Source row under the bar; may fall outside the source when the layout is degenerate.
    pub fn source_row(&self, layout: &Layout, source_height: u32) -> i64 {
        if layout.final_height == 0 {
            return -1;
        }
        let y_scale = f64::from(source_height) / f64::from(layout.final_height);
        ((self.y - f64::from(layout.pos_y)) * y_scale) as i64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/bar.rs"]
mod tests;
