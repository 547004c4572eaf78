use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Fps;
use crate::foundation::error::{ScanlineError, ScanlineResult};

/// Pixel dimensions of a screen-like area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Session-wide settings for the interactive app and the recorder.
///
/// Every field has a default, so an empty JSON object (`{}`) is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Size of the presented surface.
    pub screen: Extent,
    /// Area the source image is fitted into before `display_scale` is applied.
    pub render_area: Extent,
    /// Shrink factor applied to the fitted image.
    pub display_scale: f32,
    /// Rows per stripe in the recreation image.
    pub stripe_height: u32,
    /// Whether a fresh recreation starts out animating.
    pub animating: bool,
    /// Phase advanced per tick while animating.
    pub dt: f64,
    /// Seconds a key must be held before continuous movement kicks in.
    pub hold_threshold_secs: f64,
    /// Continuous movement speed in units per second once a hold is accelerated.
    pub hold_rate: f64,
    /// Pixels with every RGB channel at or below this value count as border.
    pub crop_threshold: u8,
    /// TTF/OTF font for UI labels; labels are skipped when unset.
    pub font_path: Option<PathBuf>,
    /// Frame recorder settings.
    pub recorder: RecorderConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            screen: Extent {
                width: 1400,
                height: 800,
            },
            render_area: Extent {
                width: 1000,
                height: 800,
            },
            display_scale: 0.8,
            stripe_height: 400,
            animating: true,
            dt: 1.0,
            hold_threshold_secs: 0.5,
            hold_rate: 100.0,
            crop_threshold: 10,
            font_path: None,
            recorder: RecorderConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Read a JSON config from disk and validate it.
    pub fn from_path(path: &Path) -> ScanlineResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ScanlineError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges and finiteness of every field.
    pub fn validate(&self) -> ScanlineResult<()> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ScanlineError::validation("screen width/height must be > 0"));
        }
        if self.screen.width > u32::from(u16::MAX) || self.screen.height > u32::from(u16::MAX) {
            return Err(ScanlineError::validation(
                "screen width/height must fit in u16",
            ));
        }
        if self.render_area.width == 0 || self.render_area.height == 0 {
            return Err(ScanlineError::validation(
                "render_area width/height must be > 0",
            ));
        }
        if !(self.display_scale.is_finite() && self.display_scale > 0.0) {
            return Err(ScanlineError::validation(
                "display_scale must be finite and > 0",
            ));
        }
        if self.stripe_height == 0 {
            return Err(ScanlineError::validation("stripe_height must be > 0"));
        }
        if !self.dt.is_finite() {
            return Err(ScanlineError::validation("dt must be finite"));
        }
        if !(self.hold_threshold_secs.is_finite() && self.hold_threshold_secs >= 0.0) {
            return Err(ScanlineError::validation(
                "hold_threshold_secs must be finite and >= 0",
            ));
        }
        if !self.hold_rate.is_finite() {
            return Err(ScanlineError::validation("hold_rate must be finite"));
        }
        self.recorder.validate()
    }
}

/// Settings for [`crate::FrameRecorder`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// Output frame rate handed to the encoder.
    pub fps: u32,
    /// x264 constant rate factor (lower is better quality).
    pub crf: u8,
    /// Recording stops by itself once this many frames were captured.
    pub max_frames: u32,
    /// Directory the numbered PNG frames are written to.
    pub frames_dir: PathBuf,
    /// Encoded video path.
    pub out_path: PathBuf,
    /// Keep the PNG frames after a successful encode.
    pub keep_frames: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            crf: 18,
            max_frames: 600,
            frames_dir: PathBuf::from("frames"),
            out_path: PathBuf::from("recording.mp4"),
            keep_frames: false,
        }
    }
}

impl RecorderConfig {
    /// Reject a zero frame rate or frame limit and out-of-range CRF values.
    pub fn validate(&self) -> ScanlineResult<()> {
        if self.fps == 0 {
            return Err(ScanlineError::validation("recorder fps must be > 0"));
        }
        if self.max_frames == 0 {
            return Err(ScanlineError::validation("recorder max_frames must be > 0"));
        }
        if self.crf > 51 {
            return Err(ScanlineError::validation("recorder crf must be in 0..=51"));
        }
        Ok(())
    }

    /// Output frame rate as a validated [`Fps`].
    pub fn fps(&self) -> ScanlineResult<Fps> {
        Fps::new(self.fps, 1)
    }
}
