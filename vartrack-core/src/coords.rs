use crate::types::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("degenerate pixel width: {0}")]
    DegenerateWidth(f64),
    #[error("inverted genome range: stop ({stop}) < start ({start})")]
    InvertedRange { start: GenomicPos, stop: GenomicPos },
}

/// Affine map from genome coordinates to pixels.
///
/// The domain is `[start, stop + 1]` and the range `[0, width]`, so every base
/// owns a cell of `width / (stop - start + 1)` pixels and `stop + 1` lands on
/// the right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    domain_start: f64,
    px_per_bp: f64,
}

impl Scale {
    pub fn new(interval: &Interval, width: f64) -> Result<Self, ScaleError> {
        if !(width > 0.0) || !width.is_finite() {
            return Err(ScaleError::DegenerateWidth(width));
        }
        Ok(Self {
            domain_start: interval.start() as f64,
            px_per_bp: width / interval.length() as f64,
        })
    }

    /// Scale for a viewport window, rejecting inverted windows.
    pub fn for_range(range: &GenomeRange, width: f64) -> Result<Self, ScaleError> {
        let interval = range.interval().map_err(|_| ScaleError::InvertedRange {
            start: range.start,
            stop: range.stop,
        })?;
        Self::new(&interval, width)
    }

    /// Pixel x of a (possibly fractional) genome coordinate.
    pub fn to_px(&self, pos: f64) -> f64 {
        (pos - self.domain_start) * self.px_per_bp
    }

    pub fn px(&self, pos: GenomicPos) -> f64 {
        self.to_px(pos as f64)
    }

    /// Genome coordinate under a pixel x.
    pub fn invert(&self, px: f64) -> f64 {
        self.domain_start + px / self.px_per_bp
    }

    /// `scale(1) - scale(0)`: the width of one base in pixels.
    pub fn px_per_bp(&self) -> f64 {
        self.px_per_bp
    }
}

fn strip_chr(name: &str) -> &str {
    match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &name[3..],
        _ => name,
    }
}

/// True when two contig names agree once a leading `chr` (any case) is dropped.
pub fn chr_match(a: &str, b: &str) -> bool {
    strip_chr(a) == strip_chr(b)
}

/// Pick the one known contig name matching `name`.
///
/// Exact matches win, then the first `chr`-insensitive match in list order.
/// With no match the supplied name is returned unchanged.
pub fn reconcile_contig<S: AsRef<str>>(name: &str, known: &[S]) -> String {
    if let Some(exact) = known.iter().find(|k| k.as_ref() == name) {
        return exact.as_ref().to_string();
    }
    match known.iter().find(|k| chr_match(name, k.as_ref())) {
        Some(found) => found.as_ref().to_string(),
        None => {
            log::debug!("No known contig matches '{}', keeping it as given", name);
            name.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_window_to_pixels() {
        let range = GenomeRange::new("1", 100, 199);
        let scale = Scale::for_range(&range, 100.0).unwrap();
        assert_eq!(scale.px(100), 0.0);
        assert_eq!(scale.px(150), 50.0);
        assert_eq!(scale.px(200), 100.0);
        assert_eq!(scale.px_per_bp(), 1.0);
        assert_eq!(scale.invert(50.0), 150.0);
    }

    #[test]
    fn test_scale_is_pure() {
        let iv = Interval::new(1_000, 1_040).unwrap();
        let a = Scale::new(&iv, 800.0).unwrap();
        let b = Scale::new(&iv, 800.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_px(1_020.5), b.to_px(1_020.5));
    }

    #[test]
    fn test_scale_rejects_degenerate_geometry() {
        let iv = Interval::new(1, 10).unwrap();
        assert_eq!(Scale::new(&iv, 0.0), Err(ScaleError::DegenerateWidth(0.0)));
        assert!(Scale::new(&iv, -5.0).is_err());
        assert!(Scale::new(&iv, f64::NAN).is_err());

        let inverted = GenomeRange::new("1", 10, 5);
        assert_eq!(
            Scale::for_range(&inverted, 100.0),
            Err(ScaleError::InvertedRange { start: 10, stop: 5 })
        );
    }

    #[test]
    fn test_chr_match() {
        assert!(chr_match("chr7", "7"));
        assert!(chr_match("7", "chr7"));
        assert!(chr_match("CHR7", "chr7"));
        assert!(chr_match("chrX", "X"));
        assert!(!chr_match("chr7", "chr8"));
        assert!(!chr_match("7", "17"));
        assert!(!chr_match("ch", "chr"));
    }

    #[test]
    fn test_chr_match_handles_multibyte_names() {
        assert!(!chr_match("é1", "1"));
        assert!(chr_match("é1", "é1"));
    }

    #[test]
    fn test_reconcile_contig() {
        let known = vec!["chr1".to_string(), "chr17".to_string(), "1".to_string()];
        assert_eq!(reconcile_contig("17", &known), "chr17");
        assert_eq!(reconcile_contig("1", &known), "1");
        assert_eq!(reconcile_contig("chrM", &known), "chrM");
    }
}
