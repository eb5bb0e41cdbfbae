use proptest::prelude::*;
use vartrack_core::{chr_match, GenomeRange, Scale};

proptest! {
    #[test]
    fn scale_is_strictly_increasing(
        start in 1u64..1_000_000_000,
        len in 1u64..10_000_000,
        width in 1.0f64..10_000.0,
        offset in 0u64..10_000,
    ) {
        let range = GenomeRange::new("1", start, start + len - 1);
        let scale = Scale::for_range(&range, width).unwrap();
        let p = start + offset % len;
        prop_assert!(scale.px(p + 1) > scale.px(p));
    }

    #[test]
    fn scale_endpoints_land_on_edges(
        start in 1u64..1_000_000_000,
        len in 1u64..10_000_000,
        width in 1.0f64..10_000.0,
    ) {
        let range = GenomeRange::new("1", start, start + len - 1);
        let scale = Scale::for_range(&range, width).unwrap();
        prop_assert!(scale.px(start).abs() < 1.0);
        prop_assert!((scale.px(range.stop + 1) - width).abs() < 1.0);
    }

    #[test]
    fn scale_invert_round_trips(
        start in 1u64..1_000_000,
        len in 1u64..100_000,
        width in 1.0f64..4_000.0,
        px in 0.0f64..1.0,
    ) {
        let range = GenomeRange::new("1", start, start + len - 1);
        let scale = Scale::for_range(&range, width).unwrap();
        let x = px * width;
        prop_assert!((scale.to_px(scale.invert(x)) - x).abs() < 1e-6);
    }

    #[test]
    fn chr_prefix_is_ignored(name in "[0-9XYM]{1,3}") {
        let prefixed = format!("chr{}", name);
        prop_assert!(chr_match(&prefixed, &name));
        prop_assert!(chr_match(&name, &prefixed));
    }
}
