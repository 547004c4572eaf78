use image::Rgba;

use crate::app::AppState;
use crate::config::SessionConfig;
use crate::control::bar::ScanBar;
use crate::foundation::core::{Point, rect_at};
use crate::foundation::error::ScanlineResult;
use crate::input::{InputFrame, Key};
use crate::render::scene::Scene;
use crate::render::surface::Surface;
use crate::source::channel::Channel;
use crate::source::profile::ChannelProfile;

use super::{RecreateView, Screen, View};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FRAME: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BAR: Rgba<u8> = Rgba([0, 228, 48, 255]);
const IDLE_BUTTON: Rgba<u8> = Rgba([80, 80, 80, 255]);
const LABEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LABEL_SIZE: f32 = 20.0;

/// Shows one channel of the source with a scan bar and a plot of the row under it.
#[derive(Clone, Debug)]
pub struct AnalyzerView {
    channel: Channel,
    bar: ScanBar,
    bar_visible: bool,
    profile: Option<ChannelProfile>,
}

impl AnalyzerView {
    /// Fresh analyzer on the red channel with the bar following the mouse.
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            channel: Channel::default(),
            bar: ScanBar::new(cfg.hold_threshold_secs, cfg.hold_rate),
            bar_visible: false,
            profile: None,
        }
    }

    /// Channel shown and plotted.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Scan bar position and control mode.
    pub fn bar(&self) -> &ScanBar {
        &self.bar
    }

    /// Plot of the row under the bar, when the bar is visible and over the source.
    pub fn profile(&self) -> Option<&ChannelProfile> {
        self.profile.as_ref()
    }
}

impl Screen for AnalyzerView {
    fn update(
        &mut self,
        state: &mut AppState,
        input: &InputFrame,
    ) -> ScanlineResult<Option<View>> {
        let layout = state.layout;
        self.bar.update(input, &layout);

        if let Some(p) = input.click()
            && let Some((channel, _)) = layout
                .channel_buttons()
                .into_iter()
                .find(|(_, rect)| rect.contains(p))
        {
            tracing::debug!(channel = channel.label(), "channel selected");
            self.channel = channel;
        }

        let row = self.bar.source_row(&layout, state.source.height());
        self.bar_visible = self.bar.is_visible(input, &layout);
        self.profile = if self.bar_visible {
            state
                .source
                .capture_row(row)
                .map(|r| ChannelProfile::for_row(&r, self.channel, layout.plot_area))
        } else {
            None
        };

        if input.is_pressed(Key::K) {
            match state.source.capture_row(row) {
                Some(scanline) => {
                    tracing::info!(row, "keyframe captured");
                    let view = RecreateView::from_keyframe(state, &scanline, row)?
                        .returning_to(self.clone());
                    return Ok(Some(View::Recreate(view)));
                }
                None => tracing::debug!(row, "keyframe row outside source; ignored"),
            }
        }
        Ok(None)
    }

    fn draw(&self, state: &AppState, surface: &mut Surface) -> ScanlineResult<()> {
        let layout = &state.layout;
        surface.clear(BACKGROUND);
        surface.blit(
            state.textures.for_channel(self.channel).image(),
            i64::from(layout.pos_x),
            i64::from(layout.pos_y),
        );

        let mut scene = Scene::new();
        let plot = layout.plot_area;
        scene
            .stroke_rect(plot, 1.0, FRAME)
            .text(
                "X-Coordinate",
                Point::new(plot.x0 + plot.width() / 2.0 - 50.0, plot.y1 + 10.0),
                LABEL_SIZE,
                LABEL,
            )
            .text(
                "Value",
                Point::new(plot.x0 - 60.0, plot.y0 + plot.height() / 2.0 - 10.0),
                LABEL_SIZE,
                LABEL,
            );

        if self.bar_visible {
            scene.fill_rect(
                rect_at(
                    f64::from(layout.pos_x),
                    self.bar.y().trunc() - 1.0,
                    f64::from(layout.final_width),
                    1.0,
                ),
                BAR,
            );
        }
        if let Some(profile) = &self.profile {
            for trace in &profile.traces {
                scene.polyline(trace.points.clone(), 1.0, trace.component.plot_color());
            }
        }

        for (channel, rect) in layout.channel_buttons() {
            let fill = if channel == self.channel {
                channel.active_color()
            } else {
                IDLE_BUTTON
            };
            scene.fill_rect(rect, fill).text(
                channel.label(),
                Point::new(rect.x0 + 15.0, rect.y0 + 5.0),
                LABEL_SIZE,
                LABEL,
            );
        }
        scene.text(
            "Press [K] to Keyframe",
            Point::new(260.0, 15.0),
            LABEL_SIZE,
            LABEL,
        );

        surface.paint(&scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/analyzer.rs"]
mod tests;
