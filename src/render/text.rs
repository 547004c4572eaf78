use std::path::Path;

use anyhow::Context as _;
use image::Rgba;

use crate::foundation::error::{ScanlineError, ScanlineResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

impl From<Rgba<u8>> for TextBrushRgba8 {
    fn from(c: Rgba<u8>) -> Self {
        let [r, g, b, a] = c.0;
        Self { r, g, b, a }
    }
}

/// Font used for UI labels: shaped with Parley, drawn as vello_cpu glyph runs.
///
/// The font bytes are registered once; every label is laid out against that single family.
pub struct LabelFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl LabelFont {
    /// Register TTF/OTF `bytes` and keep the first family they contain.
    pub fn from_bytes(bytes: Vec<u8>) -> ScanlineResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ScanlineError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ScanlineError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        })
    }

    /// Read and register a font file.
    pub fn from_path(path: &Path) -> ScanlineResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let font = Self::from_bytes(bytes)?;
        tracing::debug!(family = %font.family, path = %path.display(), "label font loaded");
        Ok(font)
    }

    /// Family name of the registered font.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba<u8>,
    ) -> ScanlineResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ScanlineError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
