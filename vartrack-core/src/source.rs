//! Data-source contracts consumed by the track renderers.
//!
//! Sources own resident feature data and tell listeners when more of it has
//! arrived. Notification is a plain subscription list invoked synchronously;
//! listeners are expected to schedule a re-render, never to render inline.

use crate::io::{fasta::FastaParser, vcf::VcfParser};
use crate::types::*;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type NewDataCallback = Box<dyn FnMut()>;

/// Ordered list of "new data available" callbacks.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    generation: u64,
    callbacks: Vec<(SubscriptionId, NewDataCallback)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: NewDataCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    /// Bump the data generation and invoke every callback in subscription order.
    pub fn notify(&mut self) {
        self.generation += 1;
        log::debug!(
            "New data (generation {}), notifying {} subscriber(s)",
            self.generation,
            self.callbacks.len()
        );
        for (_, callback) in self.callbacks.iter_mut() {
            callback();
        }
    }

    /// Incremented on every [`notify`](Self::notify).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Supplier of variant calls for a window.
///
/// Contig names are matched exactly; callers reconcile user-supplied names
/// against [`contigs`](Self::contigs) once, before querying.
pub trait VariantSource {
    /// Variants overlapping `interval`, ordered by ascending position.
    fn features_in_range(&self, interval: &ContigInterval) -> Vec<Variant>;

    /// Contig names as this source spells them.
    fn contigs(&self) -> Vec<String>;

    fn on_new_data(&mut self, callback: NewDataCallback) -> SubscriptionId;

    /// Changes whenever new data has arrived.
    fn generation(&self) -> u64;
}

/// Supplier of reference bases for a window. Contig names are matched exactly.
pub trait ReferenceSource {
    /// One character per position in `range`; `N` where the base is unknown.
    fn range_as_string(&self, range: &GenomeRange) -> String;

    fn contigs(&self) -> Vec<String>;

    fn on_new_data(&mut self, callback: NewDataCallback) -> SubscriptionId;

    fn generation(&self) -> u64;
}

/// Variants on one contig, sorted by position.
#[derive(Debug, Default)]
struct ContigVariants {
    variants: Vec<Variant>,
    /// Longest span of any variant here, bounding how far left of a window
    /// an overlapping variant can start.
    longest: GenomicPos,
}

impl ContigVariants {
    fn overlapping(&self, window: Interval) -> impl Iterator<Item = &Variant> + '_ {
        let reach = self.longest.saturating_sub(1);
        let begin = self
            .variants
            .partition_point(|v| v.position.saturating_add(reach) < window.start());
        let end = self.variants.partition_point(|v| v.position <= window.stop());
        self.variants[begin..end.max(begin)]
            .iter()
            .filter(move |v| v.interval().intersects(&window))
    }
}

/// Variants held in memory, indexed by contig and sorted by position.
#[derive(Default)]
pub struct InMemoryVariantSource {
    by_contig: BTreeMap<String, ContigVariants>,
    subscribers: Subscribers,
}

impl InMemoryVariantSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vcf<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut source = Self::new();
        source.add_variants(VcfParser::parse_file(path)?);
        Ok(source)
    }

    /// Add a batch of variants and notify subscribers once.
    pub fn add_variants<I: IntoIterator<Item = Variant>>(&mut self, variants: I) {
        let mut added = 0usize;
        for variant in variants {
            let entry = self.by_contig.entry(variant.contig.clone()).or_default();
            entry.longest = entry.longest.max(variant.interval().length());
            entry.variants.push(variant);
            added += 1;
        }
        for entry in self.by_contig.values_mut() {
            entry.variants.sort_by_key(|v| v.position);
        }
        log::debug!("Added {} variant(s)", added);
        self.subscribers.notify();
    }

    pub fn len(&self) -> usize {
        self.by_contig.values().map(|entry| entry.variants.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VariantSource for InMemoryVariantSource {
    fn features_in_range(&self, interval: &ContigInterval) -> Vec<Variant> {
        let Some(entry) = self.by_contig.get(interval.contig()) else {
            log::debug!("No variants on contig '{}'", interval.contig());
            return Vec::new();
        };
        entry.overlapping(interval.interval()).cloned().collect()
    }

    fn contigs(&self) -> Vec<String> {
        self.by_contig.keys().cloned().collect()
    }

    fn on_new_data(&mut self, callback: NewDataCallback) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    fn generation(&self) -> u64 {
        self.subscribers.generation()
    }
}

/// Reference sequences held in memory.
#[derive(Default)]
pub struct InMemoryReferenceSource {
    sequences: BTreeMap<String, Vec<u8>>,
    subscribers: Subscribers,
}

impl InMemoryReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut source = Self::new();
        for (name, seq) in FastaParser::parse_file(path)? {
            source.sequences.insert(name, seq);
        }
        source.subscribers.notify();
        Ok(source)
    }

    pub fn add_sequence(&mut self, name: impl Into<String>, sequence: impl Into<Vec<u8>>) {
        self.sequences.insert(name.into(), sequence.into());
        self.subscribers.notify();
    }
}

impl ReferenceSource for InMemoryReferenceSource {
    fn range_as_string(&self, range: &GenomeRange) -> String {
        if range.stop < range.start {
            return String::new();
        }
        let seq = self.sequences.get(&range.contig);
        (range.start..=range.stop)
            .map(|pos| {
                pos.checked_sub(1)
                    .and_then(|idx| seq.and_then(|s| s.get(idx as usize)))
                    .map(|b| b.to_ascii_uppercase() as char)
                    .unwrap_or('N')
            })
            .collect()
    }

    fn contigs(&self) -> Vec<String> {
        self.sequences.keys().cloned().collect()
    }

    fn on_new_data(&mut self, callback: NewDataCallback) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    fn generation(&self) -> u64 {
        self.subscribers.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::reconcile_contig;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_notify_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();

        let l1 = Rc::clone(&log);
        let first = subs.subscribe(Box::new(move || l1.borrow_mut().push("first")));
        let l2 = Rc::clone(&log);
        subs.subscribe(Box::new(move || l2.borrow_mut().push("second")));

        subs.notify();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(subs.generation(), 1);

        assert!(subs.unsubscribe(first));
        assert!(!subs.unsubscribe(first));
        subs.notify();
        assert_eq!(*log.borrow(), vec!["first", "second", "second"]);
        assert_eq!(subs.generation(), 2);
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_adding_variants_notifies() {
        let count = Rc::new(RefCell::new(0));
        let mut source = InMemoryVariantSource::new();
        let c = Rc::clone(&count);
        source.on_new_data(Box::new(move || *c.borrow_mut() += 1));

        source.add_variants(vec![Variant::new("17", 10, "A", "T")]);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(source.generation(), 1);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_features_in_range_is_sorted_and_filtered() {
        let mut source = InMemoryVariantSource::new();
        source.add_variants(vec![
            Variant::new("17", 300, "A", "T"),
            Variant::new("17", 100, "A", "T"),
            Variant::new("17", 95, "ACGTAC", "A"),
            Variant::new("17", 90, "A", "C"),
            Variant::new("2", 150, "G", "C"),
        ]);

        let window = ContigInterval::new("17", 100, 200).unwrap();
        let found: Vec<GenomicPos> = source
            .features_in_range(&window)
            .iter()
            .map(|v| v.position)
            .collect();
        assert_eq!(found, vec![95, 100]);
    }

    #[test]
    fn test_features_in_range_matches_contig_exactly() {
        let mut source = InMemoryVariantSource::new();
        source.add_variants(vec![Variant::new("17", 100, "A", "T")]);

        let window = ContigInterval::new("17", 50, 150).unwrap();
        assert_eq!(source.features_in_range(&window).len(), 1);

        let prefixed = ContigInterval::new("chr17", 50, 150).unwrap();
        assert!(source.features_in_range(&prefixed).is_empty());

        let contig = reconcile_contig("chr17", &source.contigs());
        let reconciled = ContigInterval::new(contig, 50, 150).unwrap();
        assert_eq!(source.features_in_range(&reconciled).len(), 1);
    }

    #[test]
    fn test_long_variants_reach_into_later_windows() {
        let mut source = InMemoryVariantSource::new();
        let deleted = "A".repeat(500);
        let mut variants: Vec<Variant> = (1..=1_000)
            .map(|pos| Variant::new("1", pos * 10, "C", "T"))
            .collect();
        variants.push(Variant::new("1", 4_000, &deleted, "A"));
        source.add_variants(variants);

        // The deletion covers 4000..4499; SNVs at 4450 and 4460 fall inside too.
        let window = ContigInterval::new("1", 4_450, 4_460).unwrap();
        let found: Vec<GenomicPos> = source
            .features_in_range(&window)
            .iter()
            .map(|v| v.position)
            .collect();
        assert_eq!(found, vec![4_000, 4_450, 4_460]);

        let past = ContigInterval::new("1", 4_501, 4_505).unwrap();
        assert!(source.features_in_range(&past).is_empty());
    }

    #[test]
    fn test_reference_range_as_string() {
        let mut reference = InMemoryReferenceSource::new();
        reference.add_sequence("chr1", b"acgtACGT".to_vec());
        assert_eq!(reference.generation(), 1);

        assert_eq!(reference.range_as_string(&GenomeRange::new("chr1", 1, 4)), "ACGT");
        assert_eq!(reference.range_as_string(&GenomeRange::new("1", 1, 4)), "NNNN");
        assert_eq!(reference.range_as_string(&GenomeRange::new("chr1", 7, 10)), "GTNN");
        assert_eq!(reference.range_as_string(&GenomeRange::new("chr2", 1, 2)), "NN");
        assert_eq!(reference.range_as_string(&GenomeRange::new("chr1", 5, 4)), "");
    }
}
