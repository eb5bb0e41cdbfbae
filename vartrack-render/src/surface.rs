/*!
# Drawing Surface

The plain 2D drawing contract every backend implements, plus a headless
[`RecordingCanvas`] that keeps the primitives it was asked to draw.
*/

use serde::Serialize;

/// Axis-aligned pixel rectangle. Negative extents are allowed and normalised
/// when testing containment, as a canvas would draw them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x0, x1) = ordered(self.x, self.x + self.width);
        let (y0, y1) = ordered(self.y, self.y + self.height);
        px >= x0 && px < x1 && py >= y0 && py < y1
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Text measurement, shared by real canvases and the picking context.
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f64;

    /// Height of glyphs above the baseline.
    fn text_ascent(&self) -> f64;

    /// Box covered by `text` drawn with its baseline-left corner at `(x, y)`.
    fn text_bounds(&self, text: &str, x: f64, y: f64) -> Rect {
        let ascent = self.text_ascent();
        Rect::new(x, y - ascent, self.text_width(text), ascent)
    }
}

/// Fixed-advance font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonospaceMetrics {
    pub font_size: f64,
    pub char_width: f64,
    pub ascent: f64,
}

impl MonospaceMetrics {
    /// Metrics for a typical monospace face at `font_size` pixels.
    pub fn for_font_size(font_size: f64) -> Self {
        Self {
            font_size,
            char_width: font_size * 0.6,
            ascent: font_size * 0.9,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::for_font_size(10.0)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn text_ascent(&self) -> f64 {
        self.ascent
    }
}

/// Immediate-mode 2D drawing, in the shape of an HTML canvas context.
pub trait Canvas: TextMetrics {
    fn clear_rect(&mut self, rect: Rect);
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Font size for subsequent text; also changes what [`TextMetrics`] reports.
    fn set_font_size(&mut self, size: f64);
    /// Push the current fill/stroke/font state.
    fn save(&mut self);
    /// Pop the state pushed by the matching [`save`](Self::save).
    fn restore(&mut self);
}

/// A primitive as drawn, with the colour in effect at the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Clear(Rect),
    FillRect { rect: Rect, color: String },
    StrokeRect { rect: Rect, color: String },
    FillText { text: String, x: f64, y: f64, color: String },
}

/// Fill, stroke and font in effect, as pushed by [`Canvas::save`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PaintState {
    pub fill: String,
    pub stroke: String,
    pub metrics: MonospaceMetrics,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            metrics: MonospaceMetrics::default(),
        }
    }
}

/// Headless canvas that records every primitive in draw order.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    state: PaintState,
    saved: Vec<PaintState>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(metrics: MonospaceMetrics) -> Self {
        let mut canvas = Self::default();
        canvas.state.metrics = metrics;
        canvas
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl TextMetrics for RecordingCanvas {
    fn text_width(&self, text: &str) -> f64 {
        self.state.metrics.text_width(text)
    }

    fn text_ascent(&self) -> f64 {
        self.state.metrics.text_ascent()
    }
}

impl Canvas for RecordingCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke = color.to_string();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: self.state.fill.clone(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: self.state.stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            color: self.state.fill.clone(),
        });
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.metrics = MonospaceMetrics::for_font_size(size);
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}
