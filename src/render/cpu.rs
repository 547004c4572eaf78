use image::{Rgba, RgbaImage};
use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ScanlineError, ScanlineResult};
use crate::render::scene::{DrawOp, Scene};
use crate::render::text::LabelFont;

/// Rasterize `scene` with vello_cpu into a transparent, straight-alpha layer.
///
/// Text ops are skipped when no `font` is given.
pub(crate) fn rasterize(
    scene: &Scene,
    width: u32,
    height: u32,
    mut font: Option<&mut LabelFont>,
) -> ScanlineResult<RgbaImage> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScanlineError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScanlineError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for op in scene.ops() {
        draw_op(&mut ctx, op, font.as_deref_mut())?;
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(unpremultiplied(&pixmap, width, height))
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    font: Option<&mut LabelFont>,
) -> ScanlineResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
        }
        DrawOp::StrokeRect { rect, width, color } => {
            // Centre the stroke on a rect inset by half its width so it stays inside `rect`.
            let inner = rect.inset(-width / 2.0);
            if inner.width() <= 0.0 || inner.height() <= 0.0 {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
                return Ok(());
            }
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(*width).with_join(vello_cpu::kurbo::Join::Miter),
            );
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_path(&rect_to_cpu(inner).to_path(0.1));
        }
        DrawOp::Polyline {
            points,
            width,
            color,
        } => {
            let mut path = vello_cpu::kurbo::BezPath::new();
            let mut iter = points.iter();
            if let Some(first) = iter.next() {
                path.move_to(point_to_cpu(*first));
            }
            for p in iter {
                path.line_to(point_to_cpu(*p));
            }
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.set_paint(color_to_cpu(*color));
            ctx.stroke_path(&path);
        }
        DrawOp::Text {
            text,
            origin,
            size_px,
            color,
        } => {
            let Some(font) = font else {
                return Ok(());
            };
            let layout = font.layout(text, *size_px, *color)?;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));

                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font.font_data())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
    }
    Ok(())
}

fn color_to_cpu(c: Rgba<u8>) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.0;
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn unpremultiplied(pixmap: &vello_cpu::Pixmap, width: u32, height: u32) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out
        .pixels_mut()
        .zip(pixmap.data_as_u8_slice().chunks_exact(4))
    {
        let a = src[3];
        let straight = |c: u8| -> u8 {
            if a == 0 {
                0
            } else {
                ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
            }
        };
        *dst = Rgba([straight(src[0]), straight(src[1]), straight(src[2]), a]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
