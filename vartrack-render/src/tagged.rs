/*!
# Tagged Drawing Surface

A [`Canvas`] extended with a stack of "active" logical objects. Every
primitive drawn while objects are pushed is associated with them, which is
what makes pixel picking possible without a spatial index:

- [`DataContext`] draws for real. The object stack is bookkeeping only and
  never changes what reaches the wrapped canvas.
- [`ClickTrackingContext`] draws nothing. It replays the same draw calls
  against one pick point and records the object stack of every primitive
  that covers it.

The stack is explicit state owned by the context, not the call stack, so a
renderer can be exercised against either context in tests. Contexts are
per-frame and not reentrant.
*/

use crate::error::RenderError;
use crate::surface::{Canvas, MonospaceMetrics, Rect, TextMetrics};

/// A [`Canvas`] that also tracks which logical objects are being drawn.
pub trait DataCanvas<T>: Canvas {
    fn push_object(&mut self, object: T);

    /// Fails when nothing is pushed; renderers propagate this to abort the frame.
    fn pop_object(&mut self) -> Result<(), RenderError>;

    /// Number of currently pushed objects.
    fn depth(&self) -> usize;
}

/// Real-drawing context: forwards every primitive to the wrapped canvas.
pub struct DataContext<'a, T> {
    canvas: &'a mut dyn Canvas,
    stack: Vec<T>,
}

impl<'a, T> DataContext<'a, T> {
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        Self {
            canvas,
            stack: Vec::new(),
        }
    }

    /// End the frame, failing if any pushed object was never popped.
    pub fn finish(self) -> Result<(), RenderError> {
        check_balanced(self.stack.len())
    }
}

impl<T> TextMetrics for DataContext<'_, T> {
    fn text_width(&self, text: &str) -> f64 {
        self.canvas.text_width(text)
    }

    fn text_ascent(&self) -> f64 {
        self.canvas.text_ascent()
    }
}

impl<T> Canvas for DataContext<'_, T> {
    fn clear_rect(&mut self, rect: Rect) {
        self.canvas.clear_rect(rect);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.canvas.set_fill_style(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.canvas.set_stroke_style(color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.canvas.fill_rect(rect);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.canvas.stroke_rect(rect);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.canvas.fill_text(text, x, y);
    }

    fn set_font_size(&mut self, size: f64) {
        self.canvas.set_font_size(size);
    }

    fn save(&mut self) {
        self.canvas.save();
    }

    fn restore(&mut self) {
        self.canvas.restore();
    }
}

impl<T> DataCanvas<T> for DataContext<'_, T> {
    fn push_object(&mut self, object: T) {
        self.stack.push(object);
    }

    fn pop_object(&mut self) -> Result<(), RenderError> {
        self.stack.pop().map(|_| ()).ok_or(RenderError::UnbalancedPop)
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// One primitive under the pick point: the objects active when it was drawn,
/// most specific first, and the primitive's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<T> {
    pub objects: Vec<T>,
    pub bounds: Rect,
}

/// Picking context for a single point.
///
/// Font changes are followed through `save`/`restore` the way a real canvas
/// follows them, so text is measured exactly as it was drawn. Hits come back
/// topmost first: the primitive drawn last is reported first.
pub struct ClickTrackingContext<T> {
    metrics: MonospaceMetrics,
    saved: Vec<MonospaceMetrics>,
    x: f64,
    y: f64,
    stack: Vec<T>,
    hits: Vec<Hit<T>>,
}

impl<T: Clone> ClickTrackingContext<T> {
    /// Starts with the same default font as the real canvases.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            metrics: MonospaceMetrics::default(),
            saved: Vec::new(),
            x,
            y,
            stack: Vec::new(),
            hits: Vec::new(),
        }
    }

    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Hits so far, topmost first.
    pub fn hits(&self) -> Vec<Hit<T>> {
        self.hits.iter().rev().cloned().collect()
    }

    /// End the pick pass and return its hits, topmost first.
    pub fn into_hits(self) -> Result<Vec<Hit<T>>, RenderError> {
        check_balanced(self.stack.len())?;
        let mut hits = self.hits;
        hits.reverse();
        Ok(hits)
    }

    fn record_if_hit(&mut self, bounds: Rect) {
        if !bounds.contains(self.x, self.y) {
            return;
        }
        if self.stack.is_empty() {
            return;
        }
        log::trace!(
            "Hit at ({}, {}) with {} active object(s)",
            self.x,
            self.y,
            self.stack.len()
        );
        self.hits.push(Hit {
            objects: self.stack.iter().rev().cloned().collect(),
            bounds,
        });
    }
}

impl<T> TextMetrics for ClickTrackingContext<T> {
    fn text_width(&self, text: &str) -> f64 {
        self.metrics.text_width(text)
    }

    fn text_ascent(&self) -> f64 {
        self.metrics.text_ascent()
    }
}

impl<T: Clone> Canvas for ClickTrackingContext<T> {
    fn clear_rect(&mut self, _rect: Rect) {}

    fn set_fill_style(&mut self, _color: &str) {}

    fn set_stroke_style(&mut self, _color: &str) {}

    fn fill_rect(&mut self, rect: Rect) {
        self.record_if_hit(rect);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.record_if_hit(rect);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let bounds = self.metrics.text_bounds(text, x, y);
        self.record_if_hit(bounds);
    }

    fn set_font_size(&mut self, size: f64) {
        self.metrics = MonospaceMetrics::for_font_size(size);
    }

    fn save(&mut self) {
        self.saved.push(self.metrics);
    }

    fn restore(&mut self) {
        if let Some(metrics) = self.saved.pop() {
            self.metrics = metrics;
        }
    }
}

impl<T: Clone> DataCanvas<T> for ClickTrackingContext<T> {
    fn push_object(&mut self, object: T) {
        self.stack.push(object);
    }

    fn pop_object(&mut self) -> Result<(), RenderError> {
        self.stack.pop().map(|_| ()).ok_or(RenderError::UnbalancedPop)
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}

fn check_balanced(depth: usize) -> Result<(), RenderError> {
    if depth == 0 {
        Ok(())
    } else {
        Err(RenderError::UnclosedObjects { depth })
    }
}
