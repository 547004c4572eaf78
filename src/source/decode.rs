use std::path::Path;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::foundation::error::ScanlineResult;
use crate::source::channel::{Channel, Component};

/// Pixel bounds kept by [`SourceImage::auto_crop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropBounds {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// The decoded source image (straight RGBA8).
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Decode an image file from disk.
    #[tracing::instrument]
    pub fn open(path: &Path) -> ScanlineResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("decode source image '{}'", path.display()))?;
        let rgba = img.to_rgba8();
        tracing::info!(
            width = rgba.width(),
            height = rgba.height(),
            "loaded source image"
        );
        Ok(Self::from_rgba(rgba))
    }

    /// Decode encoded image bytes.
    pub fn decode(bytes: &[u8]) -> ScanlineResult<Self> {
        let img = image::load_from_memory(bytes).context("decode source image from memory")?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Wrap already-decoded pixels.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Decoded (and possibly cropped) pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Bounding box of every pixel with an RGB component above `threshold`.
    ///
    /// Returns `None` when the box is degenerate (`left >= right` or `top >= bottom`).
    pub fn content_bounds(&self, threshold: u8) -> Option<CropBounds> {
        let (w, h) = self.pixels.dimensions();
        let (mut left, mut right, mut top, mut bottom) = (w, 0u32, h, 0u32);
        for (x, y, px) in self.pixels.enumerate_pixels() {
            if Component::RGB.iter().any(|c| c.of(*px) > threshold) {
                left = left.min(x);
                right = right.max(x);
                top = top.min(y);
                bottom = bottom.max(y);
            }
        }
        if left < right && top < bottom {
            Some(CropBounds {
                left,
                top,
                width: right - left + 1,
                height: bottom - top + 1,
            })
        } else {
            None
        }
    }

    /// Crop away a dark border. The image is left untouched when no usable bounds exist.
    pub fn auto_crop(&mut self, threshold: u8) -> Option<CropBounds> {
        let bounds = self.content_bounds(threshold)?;
        self.pixels = image::imageops::crop_imm(
            &self.pixels,
            bounds.left,
            bounds.top,
            bounds.width,
            bounds.height,
        )
        .to_image();
        tracing::debug!(?bounds, "cropped source border");
        Some(bounds)
    }

    /// Copy one source row. Rows outside `[0, height)` yield `None`.
    pub fn capture_row(&self, y: i64) -> Option<Vec<Rgba<u8>>> {
        let y = u32::try_from(y).ok().filter(|&y| y < self.height())?;
        Some(
            (0..self.width())
                .map(|x| *self.pixels.get_pixel(x, y))
                .collect(),
        )
    }

    /// Split into the three isolated channel images.
    pub fn split_channels(&self) -> ChannelImages {
        let isolate = |c: Component| {
            let mut out = RgbaImage::new(self.width(), self.height());
            for (dst, src) in out.pixels_mut().zip(self.pixels.pixels()) {
                *dst = c.isolate(*src);
            }
            out
        };
        ChannelImages {
            red: isolate(Component::Red),
            green: isolate(Component::Green),
            blue: isolate(Component::Blue),
        }
    }
}

/// Isolated R/G/B images of the source, each opaque.
#[derive(Clone, Debug)]
pub struct ChannelImages {
    pub red: RgbaImage,
    pub green: RgbaImage,
    pub blue: RgbaImage,
}

impl ChannelImages {
    /// Image displayed for `channel`; `Original` resolves to the unsplit source.
    pub fn image_for<'a>(&'a self, channel: Channel, original: &'a SourceImage) -> &'a RgbaImage {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Original => original.pixels(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
