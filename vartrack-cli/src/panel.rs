//! The stacked track view: reference, variants and allele frequencies sharing
//! one window, rendered to a single SVG and picked by document coordinate.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;
use svg::node::element::Group;
use svg::Document;
use vartrack_core::{
    reconcile_contig, GenomeRange, InMemoryReferenceSource, InMemoryVariantSource,
    ReferenceSource, Variant, VariantSource,
};
use vartrack_render::{
    AltsTrack, ChangeGate, Frame, FrameStatus, ReferenceTrack, SvgCanvas, Track, VariantTrack,
};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Reference,
    Variants,
    Alts,
}

/// Track placement within the stacked document.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub kind: TrackKind,
    pub top: f64,
    pub frame: Frame,
}

#[derive(Debug, Serialize)]
pub struct PickReport {
    pub track: TrackKind,
    pub objects: Vec<serde_json::Value>,
}

pub struct TrackPanel {
    variants: InMemoryVariantSource,
    reference: Option<InMemoryReferenceSource>,
    config: Config,
    dirty: Rc<Cell<bool>>,
    gate: ChangeGate,
}

impl TrackPanel {
    pub fn new(
        mut variants: InMemoryVariantSource,
        mut reference: Option<InMemoryReferenceSource>,
        config: Config,
    ) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        variants.on_new_data(Box::new(move || flag.set(true)));
        if let Some(reference) = reference.as_mut() {
            let flag = Rc::clone(&dirty);
            reference.on_new_data(Box::new(move || flag.set(true)));
        }
        Self {
            variants,
            reference,
            config,
            dirty,
            gate: ChangeGate::new(),
        }
    }

    #[cfg(test)]
    pub fn add_variants<I: IntoIterator<Item = Variant>>(&mut self, variants: I) {
        self.variants.add_variants(variants);
    }

    /// Every contig either source knows, for locus completion.
    pub fn contigs(&self) -> Vec<String> {
        let mut contigs = self.variants.contigs();
        if let Some(reference) = &self.reference {
            for name in reference.contigs() {
                if !contigs.contains(&name) {
                    contigs.push(name);
                }
            }
        }
        contigs
    }

    fn reconciled(range: &GenomeRange, known: &[String]) -> GenomeRange {
        GenomeRange::new(reconcile_contig(&range.contig, known), range.start, range.stop)
    }

    fn generation(&self) -> u64 {
        self.variants.generation() + self.reference.as_ref().map_or(0, |r| r.generation())
    }

    /// Tracks top to bottom. The reference track is left out without a reference.
    ///
    /// Each slot's window names the contig the way its source does, so the
    /// sources themselves only ever see names they know.
    pub fn layout(&self, range: &GenomeRange, width: f64) -> Vec<Slot> {
        let render = &self.config.render;
        let variant_range = Self::reconciled(range, &self.variants.contigs());
        let mut tracks = Vec::with_capacity(3);
        if let Some(reference) = &self.reference {
            tracks.push((
                TrackKind::Reference,
                render.reference_track_height,
                Self::reconciled(range, &reference.contigs()),
            ));
        }
        tracks.push((TrackKind::Variants, render.variant_track_height, variant_range.clone()));
        tracks.push((TrackKind::Alts, render.alt_track_height, variant_range));

        let mut top = 0.0;
        tracks
            .into_iter()
            .map(|(kind, height, range)| {
                let slot = Slot {
                    kind,
                    top,
                    frame: Frame::new(range, width, height),
                };
                top += height;
                slot
            })
            .collect()
    }

    /// Render all tracks into one document, or `None` when neither the window,
    /// the size nor the data changed since the last call.
    pub fn render_svg(&mut self, range: &GenomeRange, width: f64) -> Result<Option<Document>> {
        let slots = self.layout(range, width);
        let total_height: f64 = slots.iter().map(|s| s.frame.height).sum();

        if self.dirty.replace(false) {
            self.gate.invalidate();
        }
        let whole = Frame::new(range.clone(), width, total_height);
        if !self.gate.should_render(&whole, self.generation()) {
            log::debug!("Nothing changed for {}, skipping render", range);
            return Ok(None);
        }

        let style = &self.config.style;
        let mut document = Document::new()
            .set("viewBox", (0, 0, width, total_height))
            .set("width", width)
            .set("height", total_height);

        for slot in &slots {
            let mut canvas = SvgCanvas::new(width, slot.frame.height, &style.background);
            let status = match slot.kind {
                TrackKind::Reference => match &self.reference {
                    Some(reference) => {
                        ReferenceTrack::new(reference, style).render(&mut canvas, &slot.frame)?
                    }
                    None => FrameStatus::Skipped,
                },
                TrackKind::Variants => {
                    VariantTrack::new(&self.variants, style).render(&mut canvas, &slot.frame)?
                }
                TrackKind::Alts => {
                    AltsTrack::new(&self.variants, style).render(&mut canvas, &slot.frame)?
                }
            };
            if status == FrameStatus::Skipped {
                log::warn!("{:?} track skipped for {} at width {}", slot.kind, range, width);
            }
            document = document.add(
                Group::new()
                    .set("transform", format!("translate(0,{})", slot.top))
                    .add(canvas.into_group()),
            );
        }

        log::info!("Rendered {} track(s) for {}", slots.len(), range);
        Ok(Some(document))
    }

    /// Features under a document coordinate, topmost first.
    pub fn pick(&self, range: &GenomeRange, width: f64, x: f64, y: f64) -> Result<Option<PickReport>> {
        let style = &self.config.style;
        let Some(slot) = self
            .layout(range, width)
            .into_iter()
            .find(|s| y >= s.top && y < s.top + s.frame.height)
        else {
            return Ok(None);
        };
        let local_y = y - slot.top;

        let objects = match slot.kind {
            TrackKind::Reference => match &self.reference {
                Some(reference) => ReferenceTrack::new(reference, style)
                    .pick(&slot.frame, x, local_y)?
                    .into_iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            },
            TrackKind::Variants => VariantTrack::new(&self.variants, style)
                .pick(&slot.frame, x, local_y)?
                .into_iter()
                .map(|variant| {
                    let cosmic_url = variant.cosmic_url();
                    serde_json::json!({ "variant": variant, "cosmic_url": cosmic_url })
                })
                .collect(),
            TrackKind::Alts => AltsTrack::new(&self.variants, style)
                .pick(&slot.frame, x, local_y)?
                .into_iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Some(PickReport {
            track: slot.kind,
            objects,
        }))
    }
}
