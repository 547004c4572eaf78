use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::foundation::core::Rect;
use crate::foundation::error::ScanlineResult;
use crate::render::cpu;
use crate::render::scene::Scene;
use crate::render::text::LabelFont;

/// CPU draw target the views render into each tick.
///
/// Images are composited with `image::imageops`; vector shapes and labels go through
/// [`Surface::paint`].
#[derive(Debug)]
pub struct Surface {
    pixels: RgbaImage,
    font: Option<LabelFont>,
}

impl Surface {
    /// Opaque black surface without a label font.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            font: None,
        }
    }

    /// Draw text ops with `font` from now on.
    pub fn with_label_font(mut self, font: LabelFont) -> Self {
        self.font = Some(font);
        self
    }

    /// Whether text ops are drawn (they are skipped without a font).
    pub fn has_label_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Current contents, straight RGBA8.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = color;
        }
    }

    /// Alpha-blend `image` with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, image: &RgbaImage, x: i64, y: i64) {
        image::imageops::overlay(&mut self.pixels, image, x, y);
    }

    /// Blend `image` scaled into `dst` with nearest-neighbour sampling.
    pub fn blit_stretched(&mut self, image: &RgbaImage, dst: Rect) {
        let w = dst.width().round();
        let h = dst.height().round();
        if image.width() == 0 || image.height() == 0 || w < 1.0 || h < 1.0 {
            return;
        }
        let scaled = image::imageops::resize(image, w as u32, h as u32, FilterType::Nearest);
        self.blit(&scaled, dst.x0.round() as i64, dst.y0.round() as i64);
    }

    /// Rasterize `scene` and blend it over the current contents.
    pub fn paint(&mut self, scene: &Scene) -> ScanlineResult<()> {
        if scene.is_empty() {
            return Ok(());
        }
        let layer = cpu::rasterize(scene, self.width(), self.height(), self.font.as_mut())?;
        image::imageops::overlay(&mut self.pixels, &layer, 0, 0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
