use crate::foundation::error::{ScanlineError, ScanlineResult};

pub use kurbo::{Point, Rect};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ScanlineResult<Self> {
        if den == 0 {
            return Err(ScanlineError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ScanlineError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }
}

/// Rectangle from its top-left corner and size, the way the layout describes screen areas.
pub fn rect_at(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::from_origin_size((x, y), (width, height))
}
