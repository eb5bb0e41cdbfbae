//! Error handling for track rendering

use thiserror::Error;

/// Fatal rendering errors. These abort the frame being drawn.
///
/// Recoverable conditions (degenerate window, empty feature list, zero depth)
/// never surface here; they degrade to drawing less.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("pop_object called with no active object")]
    UnbalancedPop,

    #[error("frame ended with {depth} object(s) still pushed")]
    UnclosedObjects { depth: usize },
}
