use crate::config::SessionConfig;
use crate::foundation::core::{Rect, rect_at};
use crate::source::channel::Channel;

/// Fixed analyzer layout derived from the source aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Displayed (scaled) source size.
    pub final_width: u32,
    pub final_height: u32,
    /// Top-left corner of the displayed source.
    pub pos_x: i32,
    pub pos_y: i32,
    /// Framed area the row profile is plotted into, right of the image.
    pub plot_area: Rect,
    pub red_button: Rect,
    pub green_button: Rect,
    pub blue_button: Rect,
    pub original_button: Rect,
    pub animate_button: Rect,
}

impl Layout {
    /// Fit a `source_width x source_height` image into the configured render area.
    pub fn fit(source_width: u32, source_height: u32, cfg: &SessionConfig) -> Self {
        let area_w = f64::from(cfg.render_area.width);
        let area_h = f64::from(cfg.render_area.height);
        let aspect = if source_height == 0 {
            1.0
        } else {
            f64::from(source_width.max(1)) / f64::from(source_height)
        };

        let (fit_w, fit_h) = if area_w / aspect <= area_h {
            (area_w, (area_w / aspect).trunc())
        } else {
            ((area_h * aspect).trunc(), area_h)
        };
        let scale = f64::from(cfg.display_scale);
        let final_width = (fit_w * scale) as u32;
        let final_height = (fit_h * scale) as u32;
        let screen_w = f64::from(cfg.screen.width);
        let pos_y = (cfg.screen.height as i32 - final_height as i32) / 2;

        let plot_x = f64::from(final_width) + 50.0;
        Self {
            screen_width: cfg.screen.width,
            screen_height: cfg.screen.height,
            final_width,
            final_height,
            pos_x: 0,
            pos_y,
            plot_area: rect_at(
                plot_x,
                f64::from(pos_y),
                (screen_w - plot_x).max(0.0),
                f64::from(final_height),
            ),
            red_button: rect_at(10.0, 10.0, 40.0, 30.0),
            green_button: rect_at(60.0, 10.0, 40.0, 30.0),
            blue_button: rect_at(110.0, 10.0, 40.0, 30.0),
            original_button: rect_at(160.0, 10.0, 80.0, 30.0),
            animate_button: rect_at(250.0, 10.0, 100.0, 30.0),
        }
    }

    /// Screen rectangle the scaled source occupies.
    pub fn image_bounds(&self) -> Rect {
        rect_at(
            f64::from(self.pos_x),
            f64::from(self.pos_y),
            f64::from(self.final_width),
            f64::from(self.final_height),
        )
    }

    /// Channel selector buttons, left to right.
    pub fn channel_buttons(&self) -> [(Channel, Rect); 4] {
        [
            (Channel::Red, self.red_button),
            (Channel::Green, self.green_button),
            (Channel::Blue, self.blue_button),
            (Channel::Original, self.original_button),
        ]
    }
}
