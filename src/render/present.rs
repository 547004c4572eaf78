use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::error::ScanlineResult;
use crate::render::surface::Surface;

/// Display seam: receives each finished frame.
pub trait Presenter {
    fn present(&mut self, surface: &Surface) -> ScanlineResult<()>;
}

/// Presenter that keeps only the most recent frame (headless runs and tests).
#[derive(Debug, Default)]
pub struct LastFramePresenter {
    last: Option<RgbaImage>,
    presented: u64,
}

impl LastFramePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently presented frame.
    pub fn last(&self) -> Option<&RgbaImage> {
        self.last.as_ref()
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Write the last frame as PNG. Returns `false` when nothing was presented yet.
    pub fn save_png(&self, path: &Path) -> ScanlineResult<bool> {
        let Some(frame) = self.last.as_ref() else {
            return Ok(false);
        };
        crate::record::encoder::ensure_parent_dir(path)?;
        frame
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(true)
    }
}

impl Presenter for LastFramePresenter {
    fn present(&mut self, surface: &Surface) -> ScanlineResult<()> {
        match self.last.as_mut() {
            Some(buf) => buf.clone_from(surface.pixels()),
            None => self.last = Some(surface.pixels().clone()),
        }
        self.presented += 1;
        Ok(())
    }
}
