use image::Rgba;

use crate::app::AppState;
use crate::control::offset::OffsetControl;
use crate::foundation::core::{Point, rect_at};
use crate::foundation::error::ScanlineResult;
use crate::input::{InputFrame, Key};
use crate::recreate::recreator::ScanlineRecreator;
use crate::render::scene::Scene;
use crate::render::surface::Surface;
use crate::render::texture::Texture;

use super::{AnalyzerView, Screen, View};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BUTTON_ON: Rgba<u8> = Rgba([0, 228, 48, 255]);
const BUTTON_OFF: Rgba<u8> = Rgba([80, 80, 80, 255]);
const LABEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LABEL_SIZE: f32 = 20.0;

/// Full-screen view of the image regenerated from one keyframed scanline.
///
/// Holds the analyzer it was entered from; `A` resumes that analyzer unchanged.
#[derive(Clone, Debug)]
pub struct RecreateView {
    recreator: ScanlineRecreator,
    texture: Texture,
    offset: OffsetControl,
    row: i64,
    analyzer: AnalyzerView,
}

impl RecreateView {
    /// Build a recreator sized like the source, seeded with the persisted parameters, and capture
    /// `scanline` (taken from source row `row`).
    pub fn from_keyframe(
        state: &AppState,
        scanline: &[Rgba<u8>],
        row: i64,
    ) -> ScanlineResult<Self> {
        let mut recreator = ScanlineRecreator::new(
            state.source.width(),
            state.source.height(),
            state.params,
        )?;
        recreator.capture(scanline)?;
        let mut texture = Texture::native();
        texture.sync(recreator.image(), recreator.revision());
        Ok(Self {
            recreator,
            texture,
            offset: OffsetControl::new(state.config.hold_threshold_secs, state.config.hold_rate),
            row,
            analyzer: AnalyzerView::new(&state.config),
        })
    }

    /// Resume `analyzer` (instead of a fresh one) when leaving this view.
    pub fn returning_to(mut self, analyzer: AnalyzerView) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Recreator owned by this view.
    pub fn recreator(&self) -> &ScanlineRecreator {
        &self.recreator
    }

    /// Display copy of the recreation image.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Analyzer restored on `A`.
    pub fn analyzer(&self) -> &AnalyzerView {
        &self.analyzer
    }

    /// Source row the scanline was captured from.
    pub fn row(&self) -> i64 {
        self.row
    }
}

impl Screen for RecreateView {
    fn update(
        &mut self,
        state: &mut AppState,
        input: &InputFrame,
    ) -> ScanlineResult<Option<View>> {
        if input.is_pressed(Key::A) {
            state.params = *self.recreator.params();
            return Ok(Some(View::Analyzer(self.analyzer.clone())));
        }

        let mut dirty = false;
        let delta = self.offset.update(input);
        if delta != 0 {
            dirty |= self.recreator.shift_offset(delta);
        }

        let clicked_toggle = input
            .click()
            .is_some_and(|p| state.layout.animate_button.contains(p));
        if input.is_pressed(Key::Space) || clicked_toggle {
            self.recreator.toggle_animation();
            dirty = true;
        }

        if self.recreator.params().animating {
            self.recreator.tick();
            dirty = true;
        }

        if dirty {
            self.recreator.regenerate();
            self.texture.sync(self.recreator.image(), self.recreator.revision());
        }
        Ok(None)
    }

    fn draw(&self, state: &AppState, surface: &mut Surface) -> ScanlineResult<()> {
        surface.clear(BACKGROUND);
        let screen = rect_at(
            0.0,
            0.0,
            f64::from(state.layout.screen_width),
            f64::from(state.layout.screen_height),
        );
        surface.blit_stretched(self.texture.image(), screen);

        let fill = if self.recreator.params().animating {
            BUTTON_ON
        } else {
            BUTTON_OFF
        };
        let mut scene = Scene::new();
        scene
            .text("RECREATION VIEW", Point::new(10.0, 10.0), LABEL_SIZE, LABEL)
            .text(
                "Press [A] to return to Analyzer",
                Point::new(10.0, 40.0),
                LABEL_SIZE,
                LABEL,
            )
            .fill_rect(state.layout.animate_button, fill);
        surface.paint(&scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/recreate.rs"]
mod tests;
