use proptest::prelude::*;
use vartrack_render::{LabelCandidate, LabelStackLayout};

fn sorted_labels(gaps: Vec<f64>, widths: Vec<f64>) -> Vec<LabelCandidate> {
    let mut x = 0.0;
    gaps.into_iter()
        .zip(widths)
        .map(|(gap, width)| {
            x += gap;
            LabelCandidate {
                text: "x".to_string(),
                x,
                width,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn neighbours_on_one_level_never_overlap(
        gaps in prop::collection::vec(0.0f64..60.0, 1..40),
        widths in prop::collection::vec(1.0f64..80.0, 40),
    ) {
        let labels = sorted_labels(gaps, widths);
        let layout = LabelStackLayout::new(labels.len(), 2.0, 10.0);
        let placed = layout.layout(labels);
        for pair in placed.windows(2) {
            if pair[0].level == pair[1].level {
                prop_assert!(pair[1].left() >= pair[0].right() + layout.gap);
            }
        }
    }

    #[test]
    fn equal_width_labels_never_overlap_on_one_level(
        gaps in prop::collection::vec(0.0f64..60.0, 1..40),
        width in 1.0f64..80.0,
    ) {
        let n = gaps.len();
        let labels = sorted_labels(gaps, vec![width; n]);
        let layout = LabelStackLayout::new(n, 2.0, 10.0);
        let placed = layout.layout(labels);
        for (i, a) in placed.iter().enumerate() {
            for b in placed.iter().skip(i + 1) {
                if a.level == b.level {
                    prop_assert!(b.left() >= a.right() + layout.gap);
                }
            }
        }
    }

    #[test]
    fn levels_stay_within_maximum(
        gaps in prop::collection::vec(0.0f64..5.0, 1..60),
        max_level in 0usize..8,
    ) {
        let n = gaps.len();
        let labels = sorted_labels(gaps, vec![20.0; n]);
        let layout = LabelStackLayout::new(max_level, 2.0, 10.0);
        prop_assert!(layout.layout(labels).iter().all(|p| p.level <= max_level));
    }
}
