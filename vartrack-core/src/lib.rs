//! vartrack core library
//!
//! Genomic intervals, the genome-to-pixel scale, variant features, and the
//! data-source contracts that feed the track renderers.

pub mod types;
pub mod coords;
pub mod source;
pub mod io;

// Re-export commonly used types and functions
pub use types::{Alt, ContigInterval, GenomeRange, GenomicPos, Interval, IntervalError, Variant};
pub use coords::{chr_match, reconcile_contig, Scale, ScaleError};
pub use source::{
    InMemoryReferenceSource, InMemoryVariantSource, ReferenceSource, Subscribers, SubscriptionId,
    VariantSource,
};

/// Version information for the vartrack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
