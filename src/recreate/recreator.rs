use image::{Rgba, RgbaImage};

use crate::foundation::error::{ScanlineError, ScanlineResult};
use crate::foundation::math::{signed_len, wrap_index};
use crate::recreate::params::RecreationParameters;
use crate::source::channel::Component;

/// Owns one captured scanline and regenerates a `width x height` image from it.
///
/// Rows are grouped into stripes of `stripe_height`; odd stripes read the scanline reversed.
/// The output buffer is allocated once and rewritten in place by every [`Self::regenerate`].
#[derive(Clone, Debug)]
pub struct ScanlineRecreator {
    scanline: Vec<Rgba<u8>>,
    image: RgbaImage,
    params: RecreationParameters,
    revision: u64,
}

impl ScanlineRecreator {
    /// Allocate an all-black scanline and output image for a `width x height` source.
    pub fn new(width: u32, height: u32, params: RecreationParameters) -> ScanlineResult<Self> {
        params.validate()?;
        Ok(Self {
            scanline: vec![Rgba([0, 0, 0, 255]); width as usize],
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            params,
            revision: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The captured row (all black before the first capture).
    pub fn scanline(&self) -> &[Rgba<u8>] {
        &self.scanline
    }

    /// Image produced by the last regeneration.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Current parameters, including edits not yet regenerated.
    pub fn params(&self) -> &RecreationParameters {
        &self.params
    }

    /// Bumped by every regeneration; lets presenters skip redundant uploads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the stored scanline and regenerate immediately.
    ///
    /// The scanline must hold exactly `width` pixels; on mismatch nothing is modified.
    #[tracing::instrument(skip_all, fields(len = scanline.len(), width = self.scanline.len()))]
    pub fn capture(&mut self, scanline: &[Rgba<u8>]) -> ScanlineResult<&RgbaImage> {
        if scanline.len() != self.scanline.len() {
            return Err(ScanlineError::capture(format!(
                "scanline has {} pixels, expected {}",
                scanline.len(),
                self.scanline.len()
            )));
        }
        self.scanline.copy_from_slice(scanline);
        tracing::debug!("scanline captured");
        Ok(self.regenerate())
    }

    /// Rewrite every output pixel from the current scanline and parameters.
    pub fn regenerate(&mut self) -> &RgbaImage {
        let width = self.scanline.len();
        if width > 0 {
            let shift = Shift::new(width, &self.params);
            let stripe = self.params.stripe_height.max(1) as usize;
            let animating = self.params.animating;
            for (y, row) in self.image.rows_mut().enumerate() {
                let reversed = (y / stripe) % 2 != 0;
                for (x, px) in row.enumerate() {
                    let src = shift.source_x(x, reversed);
                    *px = if animating {
                        opaque_rgb(&self.scanline, src)
                    } else {
                        self.scanline[src]
                    };
                }
            }
        }
        self.revision = self.revision.wrapping_add(1);
        &self.image
    }

    /// Accumulate `dt` into the phase. No-op while not animating; does not regenerate.
    ///
    /// Steps that would leave `t` non-finite (NaN/infinite `dt`, or overflow) are ignored.
    pub fn advance_time(&mut self, dt: f64) {
        if !self.params.animating {
            return;
        }
        let t = self.params.t + dt;
        if t.is_finite() {
            self.params.t = t;
        } else {
            tracing::debug!(dt, t = self.params.t, "non-finite phase step ignored");
        }
    }

    /// [`Self::advance_time`] by the configured per-tick step.
    pub fn tick(&mut self) {
        self.advance_time(self.params.dt);
    }

    /// Add `delta` to the horizontal offset. Returns whether the offset changed.
    pub fn shift_offset(&mut self, delta: i64) -> bool {
        let before = self.params.z_offset;
        self.params.z_offset = before.saturating_add(delta);
        self.params.z_offset != before
    }

    /// Returns whether the stripe height changed; zero is rejected.
    pub fn set_stripe_height(&mut self, stripe_height: u32) -> ScanlineResult<bool> {
        if stripe_height == 0 {
            return Err(ScanlineError::validation("stripe_height must be > 0"));
        }
        let changed = self.params.stripe_height != stripe_height;
        self.params.stripe_height = stripe_height;
        Ok(changed)
    }

    /// Set the mode. Returns whether it changed, like the other parameter setters.
    pub fn set_animating(&mut self, animating: bool) -> bool {
        let changed = self.params.animating != animating;
        self.params.animating = animating;
        changed
    }

    /// Flip between static and animating mode; returns the new mode.
    pub fn toggle_animation(&mut self) -> bool {
        self.params.animating = !self.params.animating;
        tracing::info!(animating = self.params.animating, "animation toggled");
        self.params.animating
    }
}

/// Scanline index read by output column `x` of a row with the given orientation.
///
/// Static mode only shifts reversed stripes; straight stripes copy the scanline as is.
/// `width` must be non-zero.
pub fn source_index(
    x: usize,
    reversed: bool,
    width: usize,
    params: &RecreationParameters,
) -> usize {
    Shift::new(width, params).source_x(x, reversed)
}

/// Per-regeneration shifts, pre-reduced modulo the row width so index math cannot overflow.
#[derive(Clone, Copy, Debug)]
struct Shift {
    width: usize,
    z: i64,
    phase: Option<i64>,
}

impl Shift {
    fn new(width: usize, params: &RecreationParameters) -> Self {
        let phase = params
            .animating
            .then(|| wrap_index(params.phase(), width) as i64);
        Self {
            width,
            z: wrap_index(params.z_offset, width) as i64,
            phase,
        }
    }

    fn source_x(self, x: usize, reversed: bool) -> usize {
        let w = signed_len(self.width);
        let xi = x as i64;
        match (self.phase, reversed) {
            (None, false) => x,
            (None, true) => wrap_index(w - 1 - xi + self.z, self.width),
            (Some(phase), true) => wrap_index(xi + self.z - phase, self.width),
            (Some(phase), false) => wrap_index(xi + self.z + phase, self.width),
        }
    }
}

fn sample(scanline: &[Rgba<u8>], src: usize, component: Component) -> u8 {
    component.of(scanline[src])
}

fn opaque_rgb(scanline: &[Rgba<u8>], src: usize) -> Rgba<u8> {
    let mut px = Rgba([0, 0, 0, 255]);
    for c in Component::RGB {
        px.0[c.index()] = sample(scanline, src, c);
    }
    px
}

#[cfg(test)]
#[path = "../../tests/unit/recreate/recreator.rs"]
mod tests;
