use crate::config::SessionConfig;
use crate::foundation::error::{ScanlineError, ScanlineResult};

/// Knobs that, together with the captured scanline, fully determine a recreation image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecreationParameters {
    /// Consecutive output rows sharing one orientation before it flips. Must be > 0.
    pub stripe_height: u32,
    /// Horizontal shift of the source index, wraps modulo the row width.
    pub z_offset: i64,
    /// Whether the time-based phase is applied.
    pub animating: bool,
    /// Accumulated animation phase.
    pub t: f64,
    /// Phase step applied per tick while animating.
    pub dt: f64,
}

impl Default for RecreationParameters {
    fn default() -> Self {
        Self {
            stripe_height: 400,
            z_offset: 0,
            animating: false,
            t: 0.0,
            dt: 1.0,
        }
    }
}

impl RecreationParameters {
    /// Session start: stripe height, mode and step from `cfg`; offset and phase at zero.
    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self {
            stripe_height: cfg.stripe_height,
            animating: cfg.animating,
            dt: cfg.dt,
            ..Self::default()
        }
    }

    /// Reject a zero stripe height and non-finite `t`/`dt`.
    pub fn validate(&self) -> ScanlineResult<()> {
        if self.stripe_height == 0 {
            return Err(ScanlineError::validation("stripe_height must be > 0"));
        }
        if !self.t.is_finite() || !self.dt.is_finite() {
            return Err(ScanlineError::validation("t and dt must be finite"));
        }
        Ok(())
    }

    /// Integer part of the accumulated time.
    pub fn phase(&self) -> i64 {
        self.t.floor() as i64
    }
}
