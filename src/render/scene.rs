use image::Rgba;

use crate::foundation::core::{Point, Rect};

/// One vector drawing operation, in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba<u8>,
    },
    /// Outline kept inside `rect`.
    StrokeRect {
        rect: Rect,
        width: f64,
        color: Rgba<u8>,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Rgba<u8>,
    },
    /// Single-line label; `origin` is the top-left corner of its layout box.
    Text {
        text: String,
        origin: Point,
        size_px: f32,
        color: Rgba<u8>,
    },
}

/// Ordered list of [`DrawOp`]s painted over a surface in one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Solid rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) -> &mut Self {
        self.ops.push(DrawOp::FillRect { rect, color });
        self
    }

    /// Rectangle outline `width` pixels wide, drawn inwards.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba<u8>) -> &mut Self {
        self.ops.push(DrawOp::StrokeRect { rect, width, color });
        self
    }

    /// Connected line segments through `points`. Fewer than two points draw nothing.
    pub fn polyline(&mut self, points: Vec<Point>, width: f64, color: Rgba<u8>) -> &mut Self {
        if points.len() >= 2 {
            self.ops.push(DrawOp::Polyline {
                points,
                width,
                color,
            });
        }
        self
    }

    /// Label at `origin`; skipped when the surface has no label font.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        origin: Point,
        size_px: f32,
        color: Rgba<u8>,
    ) -> &mut Self {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            origin,
            size_px,
            color,
        });
        self
    }
}
