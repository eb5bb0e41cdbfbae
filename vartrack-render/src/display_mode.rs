/*!
# Display Mode Selection

Picks the rendering granularity from the current zoom, measured as pixels
per base pair:
- Loose / Tight: one glyph per base, with more or less padding
- Blocks: coloured cells, no glyphs
- Hidden: bases are narrower than a pixel; nothing per-base is drawn
*/

use vartrack_core::Scale;

/// Pixels per base at and above which glyphs get generous spacing.
pub const LOOSE_THRESHOLD: f64 = 25.0;
/// Pixels per base at and above which glyphs are drawn at all.
pub const TEXT_THRESHOLD: f64 = 10.0;
/// Pixels per base at and above which per-base blocks are drawn.
pub const BLOCK_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayMode {
    Hidden,
    Blocks,
    Tight,
    Loose,
}

impl DisplayMode {
    /// Mode for a zoom level. Monotonic: more pixels per base never yields a
    /// coarser mode.
    pub fn for_px_per_bp(px_per_bp: f64) -> Self {
        if px_per_bp >= LOOSE_THRESHOLD {
            DisplayMode::Loose
        } else if px_per_bp >= TEXT_THRESHOLD {
            DisplayMode::Tight
        } else if px_per_bp >= BLOCK_THRESHOLD {
            DisplayMode::Blocks
        } else {
            DisplayMode::Hidden
        }
    }

    pub fn for_scale(scale: &Scale) -> Self {
        Self::for_px_per_bp(scale.px_per_bp())
    }

    pub fn is_text(self) -> bool {
        matches!(self, DisplayMode::Loose | DisplayMode::Tight)
    }
}
