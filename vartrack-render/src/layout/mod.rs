//! Pure layout computations shared by the track renderers.

pub mod frequency;
pub mod labels;

pub use frequency::{sort_by_depth, ColumnLayout, FrequencyBarLayout, SubBar};
pub use labels::{LabelCandidate, LabelPlacement, LabelStackLayout, LabelStacker};
