//! Stacking proportional sub-bars into one fixed-height column.
//!
//! Sub-bars stack from the bottom of the column upwards in the order given.
//! Each is `round(fraction * column_height)` pixels tall, raised to a minimum
//! so rare alleles stay visible and clickable, and cut to whatever space is
//! left so the column never overflows. The space left at the top is the
//! reference share of the column.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubBar {
    /// Index of the entry in the input slice.
    pub index: usize,
    pub y: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub top: f64,
    pub height: f64,
    /// Bottom-most bar first.
    pub bars: Vec<SubBar>,
    /// Column space not taken by any bar.
    pub reference_height: f64,
    /// True when any bar was raised to the minimum or cut to fit.
    pub clamped: bool,
}

impl ColumnLayout {
    pub fn bar_total(&self) -> f64 {
        self.bars.iter().map(|b| b.height).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBarLayout {
    pub column_height: f64,
    pub min_bar_height: f64,
}

impl FrequencyBarLayout {
    pub fn new(column_height: f64, min_bar_height: f64) -> Self {
        Self {
            column_height,
            min_bar_height,
        }
    }

    /// Lay out bars for `fractions` in a column whose top edge is at `top`.
    ///
    /// Fractions outside `[0, 1]` are clamped; NaN counts as zero.
    pub fn layout(&self, top: f64, fractions: &[f64]) -> ColumnLayout {
        let column = self.column_height.max(0.0).round();
        let mut remaining = column;
        let mut clamped = false;
        let mut bars = Vec::with_capacity(fractions.len());

        for (index, &fraction) in fractions.iter().enumerate() {
            let fraction = if fraction.is_nan() {
                0.0
            } else {
                fraction.clamp(0.0, 1.0)
            };
            let mut height = (fraction * column).round();
            if height < self.min_bar_height {
                height = self.min_bar_height;
                clamped = true;
            }
            if height > remaining {
                height = remaining;
                clamped = true;
            }
            remaining -= height;
            bars.push(SubBar {
                index,
                y: top + remaining,
                height,
            });
        }

        ColumnLayout {
            top,
            height: column,
            bars,
            reference_height: remaining,
            clamped,
        }
    }
}

/// Stable sort ascending by a depth key, giving a deterministic stacking order
/// for entries at one position.
pub fn sort_by_depth<T, F>(items: &mut [T], depth: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        depth(a)
            .partial_cmp(&depth(b))
            .unwrap_or(Ordering::Equal)
    });
}
