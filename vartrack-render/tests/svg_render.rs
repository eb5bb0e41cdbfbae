use vartrack_core::{GenomeRange, InMemoryReferenceSource, InMemoryVariantSource, Variant};
use vartrack_render::{
    AltsTrack, Frame, ReferenceTrack, SvgCanvas, Track, TrackStyle, VariantTrack,
};

fn demo_sources() -> (InMemoryVariantSource, InMemoryReferenceSource) {
    let mut variants = InMemoryVariantSource::new();
    variants.add_variants(vec![
        Variant::new("17", 12, "C", "T")
            .with_info("AA", "p.R273H")
            .with_info("AO", "12")
            .with_info("RO", "30"),
        Variant::new("17", 12, "C", "A")
            .with_info("AO", "3")
            .with_info("RO", "30"),
        Variant::new("17", 15, "GTA", "G")
            .with_id("COSM10662")
            .with_info("AO", "0")
            .with_info("RO", "0"),
    ]);
    let mut reference = InMemoryReferenceSource::new();
    reference.add_sequence("17", b"ACGTACGTACGTACGTACGT".to_vec());
    (variants, reference)
}

fn render_all(path: &std::path::Path) {
    let (variants, reference) = demo_sources();
    let style = TrackStyle::default();
    let range = GenomeRange::new("17", 1, 20);

    let mut canvas = SvgCanvas::new(500.0, 60.0, &style.background);
    VariantTrack::new(&variants, &style)
        .render(&mut canvas, &Frame::new(range.clone(), 500.0, 60.0))
        .unwrap();
    canvas.save_to_file(path.with_extension("variants.svg")).unwrap();

    let mut canvas = SvgCanvas::new(500.0, 200.0, &style.background);
    AltsTrack::new(&variants, &style)
        .render(&mut canvas, &Frame::new(range.clone(), 500.0, 200.0))
        .unwrap();
    canvas.save_to_file(path.with_extension("alts.svg")).unwrap();

    let mut canvas = SvgCanvas::new(500.0, 20.0, &style.background);
    ReferenceTrack::new(&reference, &style)
        .render(&mut canvas, &Frame::new(range, 500.0, 20.0))
        .unwrap();
    canvas.save_to_file(path.with_extension("reference.svg")).unwrap();
}

#[test]
fn svg_render_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    render_all(&a);
    render_all(&b);

    for ext in ["variants.svg", "alts.svg", "reference.svg"] {
        let b1 = std::fs::read(a.with_extension(ext)).unwrap();
        let b2 = std::fs::read(b.with_extension(ext)).unwrap();
        assert!(!b1.is_empty());
        assert_eq!(b1, b2, "{} differs between identical renders", ext);
    }
}

#[test]
fn svg_output_contains_track_content() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("out");
    render_all(&base);

    let variants = std::fs::read_to_string(base.with_extension("variants.svg")).unwrap();
    assert!(variants.contains("p.R273H"));
    assert!(variants.contains("COSM10662"));

    let style = TrackStyle::default();
    let alts = std::fs::read_to_string(base.with_extension("alts.svg")).unwrap();
    assert!(alts.contains(&style.base_colors.t));
    assert!(alts.contains(&style.indel_color));

    let reference = std::fs::read_to_string(base.with_extension("reference.svg")).unwrap();
    assert!(reference.contains(&style.base_colors.g));
}
