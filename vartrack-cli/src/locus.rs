//! Locus text (`17:7,577,100-7,577,150`, `chr17:7577120`) to a viewport window.

use std::str::FromStr;

use thiserror::Error;
use vartrack_core::{reconcile_contig, GenomeRange, GenomicPos};

/// Bases shown either side of a locus given as a single position.
pub const POSITION_FLANK: GenomicPos = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocusError {
    #[error("Empty locus")]
    Empty,

    #[error("Locus '{0}' has no position; expected contig:start[-stop]")]
    MissingPosition(String),

    #[error("Invalid position '{0}' in locus")]
    InvalidPosition(String),

    #[error("Locus end ({stop}) is before its start ({start})")]
    Inverted { start: GenomicPos, stop: GenomicPos },
}

/// A locus as typed: the stop may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialRange {
    pub contig: String,
    pub start: GenomicPos,
    pub stop: Option<GenomicPos>,
}

fn parse_position(text: &str) -> Result<GenomicPos, LocusError> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<GenomicPos>()
        .map_err(|_| LocusError::InvalidPosition(text.to_string()))
}

impl FromStr for PartialRange {
    type Err = LocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LocusError::Empty);
        }
        let Some((contig, span)) = s.rsplit_once(':') else {
            return Err(LocusError::MissingPosition(s.to_string()));
        };
        if contig.is_empty() {
            return Err(LocusError::Empty);
        }

        let (start, stop) = match span.split_once('-') {
            Some((start, stop)) => (parse_position(start)?, Some(parse_position(stop)?)),
            None => (parse_position(span)?, None),
        };
        if let Some(stop) = stop {
            if stop < start {
                return Err(LocusError::Inverted { start, stop });
            }
        }

        Ok(Self {
            contig: contig.to_string(),
            start,
            stop,
        })
    }
}

impl PartialRange {
    /// Fill in a missing stop and settle the contig name against `known`.
    ///
    /// A lone position becomes a window of [`POSITION_FLANK`] bases either
    /// side, kept at position 1 or later.
    pub fn complete<S: AsRef<str>>(&self, known: &[S]) -> GenomeRange {
        let contig = reconcile_contig(&self.contig, known);
        match self.stop {
            Some(stop) => GenomeRange::new(contig, self.start, stop),
            None => GenomeRange::new(
                contig,
                self.start.saturating_sub(POSITION_FLANK).max(1),
                self.start.saturating_add(POSITION_FLANK),
            ),
        }
    }
}

/// Rescale `range` about its centre. Factors above 1 zoom out.
///
/// The result spans at least one base, starts no earlier than position 1 and
/// ends no later than the last representable position. Non-positive or
/// non-finite factors leave the range unchanged.
pub fn zoom_by_factor(range: &GenomeRange, factor: f64) -> GenomeRange {
    if !(factor > 0.0) || !factor.is_finite() || range.stop < range.start {
        return range.clone();
    }
    let length = (range.stop - range.start) as f64 + 1.0;
    let new_length = (length * factor).round().clamp(1.0, GenomicPos::MAX as f64);
    let centre = range.start as f64 / 2.0 + range.stop as f64 / 2.0;
    let start = (centre - (new_length - 1.0) / 2.0).round().max(1.0) as GenomicPos;
    let stop = start.saturating_add(new_length as GenomicPos - 1);
    GenomeRange::new(range.contig.clone(), start, stop)
}
