/*!
# SVG Canvas

[`Canvas`] backend that builds an SVG element tree with the `svg` crate.
Text is set in a monospace face so the widths reported through
[`TextMetrics`] match what a viewer lays out closely enough for picking.
*/

use std::path::Path;

use anyhow::{Context, Result};
use svg::node::element::{Group, Rectangle, Text};
use svg::{Document, Node};

use crate::surface::{Canvas, MonospaceMetrics, PaintState, Rect, TextMetrics};

const FONT_FAMILY: &str = "monospace";

pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: String,
    state: PaintState,
    saved: Vec<PaintState>,
    group: Group,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64, background: &str) -> Self {
        Self {
            width,
            height,
            background: background.to_string(),
            state: PaintState::default(),
            saved: Vec::new(),
            group: Group::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Everything drawn so far, as one group for embedding in a larger document.
    pub fn into_group(self) -> Group {
        self.group
    }

    /// Standalone document sized to the canvas.
    pub fn document(&self) -> Document {
        Document::new()
            .set("viewBox", (0, 0, self.width, self.height))
            .set("width", self.width)
            .set("height", self.height)
            .add(self.group.clone())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.document())
            .with_context(|| format!("Failed to write SVG to {}", path.display()))
    }

    fn rectangle(rect: Rect) -> Rectangle {
        // SVG rejects negative extents.
        let (x, width) = if rect.width < 0.0 {
            (rect.x + rect.width, -rect.width)
        } else {
            (rect.x, rect.width)
        };
        let (y, height) = if rect.height < 0.0 {
            (rect.y + rect.height, -rect.height)
        } else {
            (rect.y, rect.height)
        };
        Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", height)
    }

    fn covers_canvas(&self, rect: Rect) -> bool {
        rect.x <= 0.0
            && rect.y <= 0.0
            && rect.x + rect.width >= self.width
            && rect.y + rect.height >= self.height
    }
}

impl TextMetrics for SvgCanvas {
    fn text_width(&self, text: &str) -> f64 {
        self.state.metrics.text_width(text)
    }

    fn text_ascent(&self) -> f64 {
        self.state.metrics.text_ascent()
    }
}

impl Canvas for SvgCanvas {
    fn clear_rect(&mut self, rect: Rect) {
        if self.covers_canvas(rect) {
            self.group = Group::new();
        }
        self.group
            .append(Self::rectangle(rect).set("fill", self.background.as_str()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.stroke = color.to_string();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.group
            .append(Self::rectangle(rect).set("fill", self.state.fill.as_str()));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.group.append(
            Self::rectangle(rect)
                .set("fill", "none")
                .set("stroke", self.state.stroke.as_str())
                .set("stroke-width", 1),
        );
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.group.append(
            Text::new(text)
                .set("x", x)
                .set("y", y)
                .set("fill", self.state.fill.as_str())
                .set("font-family", FONT_FAMILY)
                .set("font-size", self.state.metrics.font_size),
        );
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
