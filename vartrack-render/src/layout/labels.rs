//! Greedy vertical stacking of labels along one horizontal axis.
//!
//! Labels arrive sorted by genome position. Each one is compared only with
//! the label placed just before it: if its left edge overlaps that label's
//! right edge (plus a gap) it goes one level down, otherwise back to level 0.
//! Levels wrap to 0 past `max_level`, which bounds the vertical space used
//! at the cost of possible overlap in very dense windows.

use serde::Serialize;

/// A label to place, anchored at its horizontal centre.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub text: String,
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub text: String,
    pub x: f64,
    pub width: f64,
    pub level: usize,
}

impl LabelPlacement {
    pub fn left(&self) -> f64 {
        self.x - self.width * 0.5
    }

    pub fn right(&self) -> f64 {
        self.x + self.width * 0.5
    }
}

/// Running state of one stacking pass.
#[derive(Debug, Clone)]
pub struct LabelStacker {
    max_level: usize,
    gap: f64,
    previous_right_edge: f64,
    current_level: usize,
}

impl LabelStacker {
    pub fn new(max_level: usize, gap: f64) -> Self {
        Self {
            max_level,
            gap,
            previous_right_edge: f64::NEG_INFINITY,
            current_level: 0,
        }
    }

    /// Level for the next label centred at `x` with the given width.
    pub fn place(&mut self, x: f64, width: f64) -> usize {
        let left = x - width * 0.5;
        if left < self.previous_right_edge {
            self.current_level = if self.current_level >= self.max_level {
                0
            } else {
                self.current_level + 1
            };
        } else {
            self.current_level = 0;
        }
        self.previous_right_edge = x + width * 0.5 + self.gap;
        self.current_level
    }
}

/// Label stacking parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStackLayout {
    pub max_level: usize,
    pub gap: f64,
    pub line_height: f64,
}

impl LabelStackLayout {
    pub fn new(max_level: usize, gap: f64, line_height: f64) -> Self {
        Self {
            max_level,
            gap,
            line_height,
        }
    }

    pub fn stacker(&self) -> LabelStacker {
        LabelStacker::new(self.max_level, self.gap)
    }

    /// Place every label in order.
    pub fn layout<I>(&self, labels: I) -> Vec<LabelPlacement>
    where
        I: IntoIterator<Item = LabelCandidate>,
    {
        let mut stacker = self.stacker();
        labels
            .into_iter()
            .map(|label| {
                let level = stacker.place(label.x, label.width);
                LabelPlacement {
                    text: label.text,
                    x: label.x,
                    width: label.width,
                    level,
                }
            })
            .collect()
    }

    /// Vertical position of a level below `base_y`.
    pub fn y_for_level(&self, base_y: f64, level: usize) -> f64 {
        base_y + level as f64 * self.line_height
    }
}
