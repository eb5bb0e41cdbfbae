use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// 1-based genome position, as written in the POS column of a VCF.
pub type GenomicPos = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    #[error("interval stop ({stop}) is before start ({start})")]
    Inverted { start: GenomicPos, stop: GenomicPos },
}

/// Inclusive span of genome positions. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: GenomicPos,
    stop: GenomicPos,
}

impl Interval {
    pub fn new(start: GenomicPos, stop: GenomicPos) -> Result<Self, IntervalError> {
        if stop < start {
            return Err(IntervalError::Inverted { start, stop });
        }
        Ok(Self { start, stop })
    }

    pub fn start(&self) -> GenomicPos {
        self.start
    }

    pub fn stop(&self) -> GenomicPos {
        self.stop
    }

    /// Number of bases covered; never zero.
    pub fn length(&self) -> GenomicPos {
        self.stop - self.start + 1
    }

    pub fn contains(&self, pos: GenomicPos) -> bool {
        self.start <= pos && pos <= self.stop
    }

    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        if !self.intersects(other) {
            return None;
        }
        Some(Interval {
            start: self.start.max(other.start),
            stop: self.stop.min(other.stop),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.stop)
    }
}

/// An [`Interval`] on a named contig.
///
/// Contig names are compared exactly. Reconciling a `chr`-prefixed name with a
/// source's own naming is done once, via [`crate::coords::reconcile_contig`],
/// before the interval reaches a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContigInterval {
    contig: String,
    interval: Interval,
}

impl ContigInterval {
    pub fn new(
        contig: impl Into<String>,
        start: GenomicPos,
        stop: GenomicPos,
    ) -> Result<Self, IntervalError> {
        Ok(Self {
            contig: contig.into(),
            interval: Interval::new(start, stop)?,
        })
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn start(&self) -> GenomicPos {
        self.interval.start
    }

    pub fn stop(&self) -> GenomicPos {
        self.interval.stop
    }

    pub fn contains(&self, contig: &str, pos: GenomicPos) -> bool {
        self.contig == contig && self.interval.contains(pos)
    }

    pub fn intersects(&self, other: &ContigInterval) -> bool {
        self.contig == other.contig && self.interval.intersects(&other.interval)
    }

    /// Same interval on a different contig name.
    pub fn with_contig(&self, contig: impl Into<String>) -> Self {
        Self {
            contig: contig.into(),
            interval: self.interval,
        }
    }
}

impl fmt::Display for ContigInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.contig, self.interval)
    }
}

/// The visible window. Owned by whoever drives the viewport; the renderers
/// only read it, and must cope with it being inverted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomeRange {
    pub contig: String,
    pub start: GenomicPos,
    pub stop: GenomicPos,
}

impl GenomeRange {
    pub fn new(contig: impl Into<String>, start: GenomicPos, stop: GenomicPos) -> Self {
        Self {
            contig: contig.into(),
            start,
            stop,
        }
    }

    pub fn interval(&self) -> Result<Interval, IntervalError> {
        Interval::new(self.start, self.stop)
    }

    pub fn to_contig_interval(&self) -> Result<ContigInterval, IntervalError> {
        ContigInterval::new(self.contig.clone(), self.start, self.stop)
    }
}

impl fmt::Display for GenomeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.stop)
    }
}

/// A single called allele at a position, with its INFO attributes.
///
/// Multi-allelic records are expanded by the readers into one `Variant` per
/// ALT allele, with per-allele INFO values already selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub contig: String,
    pub position: GenomicPos,
    pub id: Option<String>,
    pub ref_allele: String,
    pub alt: String,
    pub quality: Option<f64>,
    pub info: BTreeMap<String, String>,
}

impl Variant {
    pub fn new(
        contig: impl Into<String>,
        position: GenomicPos,
        ref_allele: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            contig: contig.into(),
            position,
            id: None,
            ref_allele: ref_allele.into(),
            alt: alt.into(),
            quality: None,
            info: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    /// Reference span of the record.
    pub fn interval(&self) -> Interval {
        let len = self.ref_allele.len().max(1) as GenomicPos;
        Interval {
            start: self.position,
            stop: self.position + len - 1,
        }
    }

    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Numeric INFO attribute; absent or unparsable values yield `None`.
    pub fn info_number(&self, key: &str) -> Option<f64> {
        self.info_value(key).and_then(|v| v.trim().parse::<f64>().ok())
    }

    /// Text drawn under the variant marker: the `AA` annotation, else the id.
    pub fn label(&self) -> Option<&str> {
        self.info_value("AA")
            .filter(|s| !s.is_empty())
            .or(self.id.as_deref())
    }

    /// COSMIC mutation page for `COSM`-prefixed ids.
    pub fn cosmic_url(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        let number = id.strip_prefix("COSM")?;
        Some(format!(
            "http://cancer.sanger.ac.uk/cosmic/mutation/overview?id={}",
            number
        ))
    }
}

/// Allele-frequency view of a [`Variant`], backed by the `AO`/`RO` depth
/// attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alt {
    pub variant: Variant,
}

impl Alt {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub fn alt_depth(&self) -> f64 {
        self.variant.info_number("AO").unwrap_or(0.0)
    }

    pub fn ref_depth(&self) -> f64 {
        self.variant.info_number("RO").unwrap_or(0.0)
    }

    /// `AO / (RO + AO)`, or zero when there is no read support at all.
    pub fn alt_frequency(&self) -> f64 {
        let total = self.ref_depth() + self.alt_depth();
        if total <= 0.0 {
            0.0
        } else {
            self.alt_depth() / total
        }
    }

    pub fn alt(&self) -> &str {
        &self.variant.alt
    }

    pub fn position(&self) -> GenomicPos {
        self.variant.position
    }

    pub fn is_indel(&self) -> bool {
        self.variant.ref_allele.len() > 1 || self.variant.alt.len() > 1
    }

    /// Number of bases the indel modifies; 1 for SNVs.
    pub fn mod_length(&self) -> usize {
        let longest = self.variant.ref_allele.len().max(self.variant.alt.len());
        longest.saturating_sub(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_rejects_inverted() {
        assert_eq!(
            Interval::new(10, 9),
            Err(IntervalError::Inverted { start: 10, stop: 9 })
        );
        assert!(Interval::new(10, 10).is_ok());
    }

    #[test]
    fn test_interval_contains_and_intersects() {
        let iv = Interval::new(100, 199).unwrap();
        assert_eq!(iv.length(), 100);
        assert!(iv.contains(100));
        assert!(iv.contains(199));
        assert!(!iv.contains(200));
        assert!(!iv.contains(99));

        let other = Interval::new(199, 250).unwrap();
        assert!(iv.intersects(&other));
        assert_eq!(iv.intersection(&other), Some(Interval::new(199, 199).unwrap()));

        let disjoint = Interval::new(200, 250).unwrap();
        assert!(!iv.intersects(&disjoint));
        assert_eq!(iv.intersection(&disjoint), None);

        assert!(iv.contains_interval(&Interval::new(120, 130).unwrap()));
        assert!(!iv.contains_interval(&other));
    }

    #[test]
    fn test_contig_interval_compares_names_exactly() {
        let a = ContigInterval::new("chr1", 10, 20).unwrap();
        let b = ContigInterval::new("1", 10, 20).unwrap();
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.with_contig("chr1")));
        assert!(a.contains("chr1", 15));
        assert!(!a.contains("1", 15));
        assert_eq!(a.to_string(), "chr1:10-20");
    }

    #[test]
    fn test_genome_range_conversion() {
        let range = GenomeRange::new("17", 7512444, 7512484);
        let ci = range.to_contig_interval().unwrap();
        assert_eq!(ci.contig(), "17");
        assert_eq!(ci.interval().length(), 41);

        let inverted = GenomeRange::new("17", 20, 10);
        assert!(inverted.to_contig_interval().is_err());
    }

    #[test]
    fn test_variant_label_and_links() {
        let v = Variant::new("17", 100, "A", "T").with_id("COSM12345");
        assert_eq!(v.label(), Some("COSM12345"));
        assert_eq!(
            v.cosmic_url().as_deref(),
            Some("http://cancer.sanger.ac.uk/cosmic/mutation/overview?id=12345")
        );

        let v = v.with_info("AA", "p.R175H");
        assert_eq!(v.label(), Some("p.R175H"));

        let plain = Variant::new("17", 100, "A", "T").with_id("rs1");
        assert_eq!(plain.cosmic_url(), None);
        assert_eq!(Variant::new("17", 1, "A", "T").label(), None);
    }

    #[test]
    fn test_variant_interval_spans_reference_allele() {
        let v = Variant::new("1", 50, "ACGT", "A");
        assert_eq!(v.interval(), Interval::new(50, 53).unwrap());
    }

    #[test]
    fn test_alt_frequency() {
        let alt = Alt::new(
            Variant::new("1", 10, "A", "G")
                .with_info("AO", "30")
                .with_info("RO", "70"),
        );
        assert!((alt.alt_frequency() - 0.3).abs() < 1e-12);
        assert_eq!(alt.alt_depth(), 30.0);
        assert_eq!(alt.ref_depth(), 70.0);
        assert!(!alt.is_indel());
        assert_eq!(alt.mod_length(), 1);
    }

    #[test]
    fn test_alt_frequency_without_depth_is_zero() {
        let zero = Alt::new(
            Variant::new("1", 10, "A", "G")
                .with_info("AO", "0")
                .with_info("RO", "0"),
        );
        assert_eq!(zero.alt_frequency(), 0.0);

        let missing = Alt::new(Variant::new("1", 10, "A", "G"));
        assert_eq!(missing.alt_frequency(), 0.0);
    }

    #[test]
    fn test_alt_indel_length() {
        let deletion = Alt::new(Variant::new("1", 10, "ACGT", "A"));
        assert!(deletion.is_indel());
        assert_eq!(deletion.mod_length(), 3);

        let insertion = Alt::new(Variant::new("1", 10, "A", "AT"));
        assert!(insertion.is_indel());
        assert_eq!(insertion.mod_length(), 1);
    }
}
