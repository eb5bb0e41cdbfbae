use serde::Serialize;
use vartrack_core::{GenomicPos, ReferenceSource};

use super::{Frame, FrameStatus, Track};
use crate::display_mode::DisplayMode;
use crate::error::RenderError;
use crate::style::TrackStyle;
use crate::surface::Rect;
use crate::tagged::DataCanvas;

/// A reference base as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseCall {
    pub position: GenomicPos,
    pub base: char,
}

/// Reference bases for the window: glyphs in text modes, coloured cells in
/// block mode, nothing when bases are narrower than a pixel.
pub struct ReferenceTrack<'a, R: ReferenceSource + ?Sized> {
    source: &'a R,
    style: &'a TrackStyle,
}

impl<'a, R: ReferenceSource + ?Sized> ReferenceTrack<'a, R> {
    pub fn new(source: &'a R, style: &'a TrackStyle) -> Self {
        Self { source, style }
    }
}

impl<R: ReferenceSource + ?Sized> Track for ReferenceTrack<'_, R> {
    type Object = BaseCall;

    fn name(&self) -> &str {
        "reference"
    }

    fn render_scene(
        &self,
        ctx: &mut dyn DataCanvas<BaseCall>,
        frame: &Frame,
    ) -> Result<FrameStatus, RenderError> {
        let Some(scale) = frame.scale() else {
            return Ok(FrameStatus::Skipped);
        };
        let style = self.style;
        let mode = DisplayMode::for_scale(&scale);

        ctx.clear_rect(frame.bounds());
        if mode == DisplayMode::Hidden {
            return Ok(FrameStatus::Drawn);
        }

        let sequence = self.source.range_as_string(&frame.range);
        ctx.save();
        ctx.set_font_size(style.reference_font_size);
        let ascent = ctx.text_ascent();
        let baseline = (frame.height + ascent) * 0.5;

        for (position, base) in (frame.range.start..=frame.range.stop).zip(sequence.chars()) {
            let left = scale.px(position);
            let right = scale.px(position + 1);
            let mut buf = [0u8; 4];
            let glyph: &str = base.encode_utf8(&mut buf);

            ctx.push_object(BaseCall { position, base });
            ctx.set_fill_style(style.base_colors.color_for(glyph));
            if mode.is_text() {
                let text_width = ctx.text_width(glyph);
                let x = (left + right) * 0.5 - text_width * 0.5;
                ctx.fill_text(glyph, x, baseline);
            } else {
                ctx.fill_rect(Rect::new(left, 0.0, (right - left).max(1.0), frame.height));
            }
            ctx.pop_object()?;
        }

        ctx.restore();
        Ok(FrameStatus::Drawn)
    }
}
