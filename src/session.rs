use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::{ScanlineError, ScanlineResult};
use crate::recreate::params::RecreationParameters;
use crate::recreate::recreator::ScanlineRecreator;
use crate::record::encoder::ensure_parent_dir;
use crate::record::recorder::{CaptureStatus, FrameRecorder, RecordOutcome};
use crate::source::decode::SourceImage;

/// Statistics of one [`RecreationSession::record`] run.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordStats {
    /// Frames requested by the caller.
    pub frames_requested: u32,
    /// Frames handed to the recorder (fewer when the recorder's frame limit stopped it early).
    pub frames_captured: u32,
    pub outcome: RecordOutcome,
}

/// Headless recreation of one keyframed source row.
///
/// Front-loads the capture; each rendered frame is a single regeneration.
#[derive(Clone, Debug)]
pub struct RecreationSession {
    recreator: ScanlineRecreator,
    row: i64,
}

impl RecreationSession {
    /// Keyframe source row `row` with `params`. Rows outside the source are rejected.
    #[tracing::instrument(skip(source, params))]
    pub fn from_row(
        source: &SourceImage,
        row: i64,
        params: RecreationParameters,
    ) -> ScanlineResult<Self> {
        let scanline = source.capture_row(row).ok_or_else(|| {
            ScanlineError::validation(format!(
                "row {row} is outside the source (height {})",
                source.height()
            ))
        })?;
        let mut recreator = ScanlineRecreator::new(source.width(), source.height(), params)?;
        recreator.capture(&scanline)?;
        tracing::info!(row, "keyframe captured");
        Ok(Self { recreator, row })
    }

    /// Source row that was keyframed.
    pub fn row(&self) -> i64 {
        self.row
    }

    pub fn recreator(&self) -> &ScanlineRecreator {
        &self.recreator
    }

    /// Edit parameters before the next [`Self::render_frame`].
    pub fn recreator_mut(&mut self) -> &mut ScanlineRecreator {
        &mut self.recreator
    }

    /// Regenerate with the current parameters.
    pub fn render_frame(&mut self) -> &RgbaImage {
        self.recreator.regenerate()
    }

    /// Render `frames` frames into `recorder`, advancing time between frames, then encode.
    ///
    /// The first frame is rendered at the current phase.
    pub fn record(
        &mut self,
        frames: u32,
        recorder: &mut FrameRecorder,
    ) -> ScanlineResult<RecordStats> {
        if frames == 0 {
            return Err(ScanlineError::validation("frame count must be > 0"));
        }
        recorder.start()?;
        for i in 0..frames {
            if i > 0 {
                self.recreator.tick();
            }
            let image = self.recreator.regenerate();
            if let CaptureStatus::Finished(outcome) = recorder.capture_frame(image)? {
                return Ok(RecordStats {
                    frames_requested: frames,
                    frames_captured: i + 1,
                    outcome,
                });
            }
        }
        let outcome = recorder.stop()?;
        Ok(RecordStats {
            frames_requested: frames,
            frames_captured: frames,
            outcome,
        })
    }

    /// Write the current recreation image as PNG.
    pub fn save_png(&self, path: &Path) -> ScanlineResult<()> {
        ensure_parent_dir(path)?;
        self.recreator
            .image()
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
