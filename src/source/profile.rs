use image::Rgba;

use crate::foundation::core::{Point, Rect};
use crate::source::channel::{Channel, Component};

/// One plotted component of a row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trace {
    pub component: Component,
    /// Raw component values, left to right.
    pub values: Vec<u8>,
    /// Values mapped into the plot rectangle (screen space, y grows downwards).
    pub points: Vec<Point>,
}

/// Per-pixel channel values of a single source row, laid out for plotting.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChannelProfile {
    pub channel: Channel,
    pub traces: Vec<Trace>,
}

impl ChannelProfile {
    /// Build the traces for `row` as seen through `channel`, mapped into `plot`.
    pub fn for_row(row: &[Rgba<u8>], channel: Channel, plot: Rect) -> Self {
        let traces = channel
            .components()
            .iter()
            .map(|&component| {
                let values: Vec<u8> = row.iter().map(|px| component.of(*px)).collect();
                let points = values
                    .iter()
                    .enumerate()
                    .map(|(x, &v)| plot_point(plot, x, row.len(), v))
                    .collect();
                Trace {
                    component,
                    values,
                    points,
                }
            })
            .collect();
        Self { channel, traces }
    }
}

fn plot_point(plot: Rect, x: usize, len: usize, value: u8) -> Point {
    let fx = if len > 1 {
        x as f64 / (len - 1) as f64
    } else {
        0.0
    };
    Point::new(
        plot.x0 + fx * plot.width(),
        plot.y1 - (f64::from(value) / 255.0) * plot.height(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/source/profile.rs"]
mod tests;
