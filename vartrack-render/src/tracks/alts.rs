use std::collections::BTreeMap;

use serde::Serialize;
use vartrack_core::{Alt, GenomicPos, VariantSource};

use super::{Frame, FrameStatus, Track};
use crate::error::RenderError;
use crate::layout::sort_by_depth;
use crate::style::TrackStyle;
use crate::surface::Rect;
use crate::tagged::DataCanvas;

/// What an allele-frequency column reports under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AltHit {
    /// Every alt called at one position, in stacking order.
    Position { position: GenomicPos, alts: Vec<Alt> },
    Allele { alt: Alt },
}

/// One column per variant position, split into a sub-bar per alt allele
/// sized by its allele frequency. The unfilled top of the column is the
/// reference share.
pub struct AltsTrack<'a, S: VariantSource + ?Sized> {
    source: &'a S,
    style: &'a TrackStyle,
}

impl<'a, S: VariantSource + ?Sized> AltsTrack<'a, S> {
    pub fn new(source: &'a S, style: &'a TrackStyle) -> Self {
        Self { source, style }
    }

    fn allele_color(&self, alt: &Alt) -> &str {
        if alt.is_indel() {
            &self.style.indel_color
        } else {
            self.style.base_colors.color_for(alt.alt())
        }
    }
}

/// Alts grouped by position, each group sorted ascending by reference depth.
pub fn group_by_position<I: IntoIterator<Item = Alt>>(alts: I) -> BTreeMap<GenomicPos, Vec<Alt>> {
    let mut groups: BTreeMap<GenomicPos, Vec<Alt>> = BTreeMap::new();
    for alt in alts {
        groups.entry(alt.position()).or_default().push(alt);
    }
    for group in groups.values_mut() {
        sort_by_depth(group, Alt::ref_depth);
    }
    groups
}

impl<S: VariantSource + ?Sized> Track for AltsTrack<'_, S> {
    type Object = AltHit;

    fn name(&self) -> &str {
        "alts"
    }

    fn render_scene(
        &self,
        ctx: &mut dyn DataCanvas<AltHit>,
        frame: &Frame,
    ) -> Result<FrameStatus, RenderError> {
        let Some(scale) = frame.scale() else {
            return Ok(FrameStatus::Skipped);
        };
        let Ok(window) = frame.range.to_contig_interval() else {
            return Ok(FrameStatus::Skipped);
        };
        let style = self.style;
        let groups = group_by_position(
            self.source
                .features_in_range(&window)
                .into_iter()
                .map(Alt::new),
        );

        let bars = style.frequency_layout(frame.height);
        let column_height = bars.column_height.round();
        let top = frame.height - column_height - 1.0;

        ctx.clear_rect(frame.bounds());
        ctx.save();
        ctx.set_stroke_style(&style.column_stroke);

        for (position, group) in groups {
            let x = scale.px(position).round();
            let right = scale.px(position + 1).round();
            let width = (right - 1.0 - x).max(1.0);
            let column = Rect::new(x, top, width, column_height);

            ctx.push_object(AltHit::Position {
                position,
                alts: group.clone(),
            });
            ctx.set_fill_style(&style.variant_fill);
            ctx.fill_rect(column);
            ctx.stroke_rect(column);

            let fractions: Vec<f64> = group.iter().map(Alt::alt_frequency).collect();
            let layout = bars.layout(top, &fractions);
            if layout.clamped {
                log::trace!("Clamped sub-bars at {}:{}", frame.range.contig, position);
            }
            for bar in layout.bars.iter().filter(|b| b.height > 0.0) {
                let alt = &group[bar.index];
                let rect = Rect::new(x, bar.y, width, bar.height);
                ctx.push_object(AltHit::Allele { alt: alt.clone() });
                ctx.set_fill_style(self.allele_color(alt));
                ctx.fill_rect(rect);
                ctx.stroke_rect(rect);
                ctx.pop_object()?;
            }

            ctx.pop_object()?;
        }

        ctx.restore();
        Ok(FrameStatus::Drawn)
    }
}
