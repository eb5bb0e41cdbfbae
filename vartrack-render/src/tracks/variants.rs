use vartrack_core::{GenomicPos, Scale, Variant, VariantSource};

use super::{Frame, FrameStatus, Track};
use crate::display_mode::DisplayMode;
use crate::error::RenderError;
use crate::layout::LabelCandidate;
use crate::style::TrackStyle;
use crate::surface::Rect;
use crate::tagged::DataCanvas;

/// One marker per variant, with stacked labels when zoomed in far enough to
/// read them.
pub struct VariantTrack<'a, S: VariantSource + ?Sized> {
    source: &'a S,
    style: &'a TrackStyle,
}

impl<'a, S: VariantSource + ?Sized> VariantTrack<'a, S> {
    pub fn new(source: &'a S, style: &'a TrackStyle) -> Self {
        Self { source, style }
    }
}

impl<S: VariantSource + ?Sized> Track for VariantTrack<'_, S> {
    type Object = Variant;

    fn name(&self) -> &str {
        "variants"
    }

    fn render_scene(
        &self,
        ctx: &mut dyn DataCanvas<Variant>,
        frame: &Frame,
    ) -> Result<FrameStatus, RenderError> {
        let Some(scale) = frame.scale() else {
            return Ok(FrameStatus::Skipped);
        };
        let Ok(window) = frame.range.to_contig_interval() else {
            return Ok(FrameStatus::Skipped);
        };
        let style = self.style;
        let mode = DisplayMode::for_scale(&scale);
        let variants = self.source.features_in_range(&window);
        log::trace!(
            "Drawing {} variant(s) in {} ({:?})",
            variants.len(),
            frame.range,
            mode
        );

        ctx.clear_rect(frame.bounds());
        ctx.save();
        ctx.set_font_size(style.label_font_size);

        let labels = style.label_layout();
        let label_base_y = style.variant_top + style.variant_height + style.label_offset;
        let placements = if mode.is_text() {
            labels.layout(variants.iter().filter_map(|variant| {
                let text = variant.label()?;
                let (x, width) = marker_span(&scale, variant.position);
                Some(LabelCandidate {
                    text: text.to_string(),
                    x: x + width * 0.5,
                    width: ctx.text_width(text),
                })
            }))
        } else {
            Vec::new()
        };
        let mut placements = placements.into_iter();

        for variant in variants {
            let (x, width) = marker_span(&scale, variant.position);

            ctx.push_object(variant.clone());
            ctx.set_fill_style(&style.variant_fill);
            ctx.fill_rect(Rect::new(x, style.variant_top, width, style.variant_height));

            // Placements follow the labelled variants in order.
            if let Some(label) = variant.label().and_then(|_| placements.next()) {
                let baseline = labels.y_for_level(label_base_y, label.level);
                let ascent = ctx.text_ascent();

                ctx.set_fill_style(&style.label_background);
                ctx.fill_rect(Rect::new(label.left(), baseline - ascent, label.width, ascent));
                ctx.set_fill_style(&style.label_color);
                ctx.fill_text(&label.text, label.left(), baseline);
            }
            ctx.pop_object()?;
        }

        ctx.restore();
        Ok(FrameStatus::Drawn)
    }
}

/// Left edge and width of the marker for `position`, at least one pixel wide.
fn marker_span(scale: &Scale, position: GenomicPos) -> (f64, f64) {
    let x = scale.px(position).round();
    let right = scale.px(position + 1).round();
    (x, (right - 1.0 - x).max(1.0))
}
