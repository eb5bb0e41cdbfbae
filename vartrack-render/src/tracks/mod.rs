//! Track renderers: one type per feature kind behind a shared [`Track`] contract.
//!
//! A track's whole frame is a single draw routine, [`Track::render_scene`],
//! run against a [`DataCanvas`]. Real rendering runs it through a
//! [`DataContext`]; picking re-runs it through a [`ClickTrackingContext`] at
//! the pick point. Drawing is a pure function of the features, window and
//! size, so both passes see the same geometry.

pub mod alts;
pub mod reference;
pub mod variants;

pub use alts::{AltHit, AltsTrack};
pub use reference::{BaseCall, ReferenceTrack};
pub use variants::VariantTrack;

use vartrack_core::{GenomeRange, Scale};

use crate::error::RenderError;
use crate::surface::{Canvas, Rect};
use crate::tagged::{ClickTrackingContext, DataCanvas, DataContext};

/// Window and pixel size of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub range: GenomeRange,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(range: GenomeRange, width: f64, height: f64) -> Self {
        Self {
            range,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Scale for the frame, or `None` when the geometry is degenerate.
    pub fn scale(&self) -> Option<Scale> {
        match Scale::for_range(&self.range, self.width) {
            Ok(scale) if self.height > 0.0 => Some(scale),
            Ok(_) => {
                log::debug!("Skipping frame {}: height {}", self.range, self.height);
                None
            }
            Err(e) => {
                log::debug!("Skipping frame {}: {}", self.range, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Drawn,
    /// Degenerate geometry; nothing was drawn.
    Skipped,
}

pub trait Track {
    /// Logical object tagged on drawn primitives and returned by picking.
    type Object: Clone + PartialEq;

    fn name(&self) -> &str;

    /// Draw the frame through a tagging surface.
    fn render_scene(
        &self,
        ctx: &mut dyn DataCanvas<Self::Object>,
        frame: &Frame,
    ) -> Result<FrameStatus, RenderError>;

    /// Draw the frame onto a plain canvas.
    fn render(&self, canvas: &mut dyn Canvas, frame: &Frame) -> Result<FrameStatus, RenderError> {
        let mut ctx = DataContext::new(canvas);
        let status = self.render_scene(&mut ctx, frame)?;
        ctx.finish()?;
        Ok(status)
    }

    /// Objects drawn under `(x, y)`, topmost first.
    ///
    /// Each hit contributes its most specific object, so a click on a nested
    /// primitive yields the inner object ahead of its enclosing group. An
    /// object drawn with several primitives is reported once. Text is measured
    /// with whatever font the scene sets, as in the real pass.
    fn pick(&self, frame: &Frame, x: f64, y: f64) -> Result<Vec<Self::Object>, RenderError> {
        let mut ctx = ClickTrackingContext::new(x, y);
        if self.render_scene(&mut ctx, frame)? == FrameStatus::Skipped {
            return Ok(Vec::new());
        }
        let mut picked: Vec<Self::Object> = Vec::new();
        for object in ctx
            .into_hits()?
            .into_iter()
            .filter_map(|hit| hit.objects.into_iter().next())
        {
            if !picked.contains(&object) {
                picked.push(object);
            }
        }
        Ok(picked)
    }
}

/// Skips re-rendering when neither the frame nor the source data changed.
#[derive(Debug, Clone, Default)]
pub struct ChangeGate {
    last: Option<(Frame, u64)>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `frame` or `generation` differs from the last accepted call.
    pub fn should_render(&mut self, frame: &Frame, generation: u64) -> bool {
        if let Some((last_frame, last_generation)) = &self.last {
            if last_frame == frame && *last_generation == generation {
                return false;
            }
        }
        self.last = Some((frame.clone(), generation));
        true
    }

    /// Force the next [`should_render`](Self::should_render) to return true.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
