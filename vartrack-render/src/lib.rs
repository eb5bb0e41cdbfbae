/*!
# vartrack Track Rendering

Draws genomic tracks onto a 2D surface and answers "what is under this
pixel" without keeping a spatial index.

## Architecture

Every track is a single draw routine run through a tagged surface:
1. **Real pass**: [`DataContext`] forwards primitives to a [`Canvas`]
   (headless [`RecordingCanvas`], or [`SvgCanvas`] for vector output)
2. **Pick pass**: [`ClickTrackingContext`] replays the same routine against a
   point and collects the logical objects active under it, topmost first

Layout helpers keep the routine deterministic: the display mode follows the
zoom level, labels stack greedily into bounded levels, and allele
frequencies stack into fixed-height columns.
*/

pub mod display_mode;
pub mod error;
pub mod layout;
pub mod style;
pub mod surface;
#[cfg(feature = "svg-canvas")]
pub mod svg_canvas;
pub mod tagged;
pub mod tracks;

pub use display_mode::DisplayMode;
pub use error::RenderError;
pub use layout::{
    ColumnLayout, FrequencyBarLayout, LabelCandidate, LabelPlacement, LabelStackLayout,
    LabelStacker, SubBar,
};
pub use style::{BaseColors, TrackStyle};
pub use surface::{Canvas, DrawOp, MonospaceMetrics, Rect, RecordingCanvas, TextMetrics};
#[cfg(feature = "svg-canvas")]
pub use svg_canvas::SvgCanvas;
pub use tagged::{ClickTrackingContext, DataCanvas, DataContext, Hit};
pub use tracks::{
    AltHit, AltsTrack, BaseCall, ChangeGate, Frame, FrameStatus, ReferenceTrack, Track,
    VariantTrack,
};
