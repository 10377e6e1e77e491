use super::*;

#[test]
fn ordinals_match_table_positions() {
    for (i, mode) in LayerMode::ALL.iter().enumerate() {
        assert_eq!(mode.ordinal(), i as i32);
        assert_eq!(LayerMode::from_ordinal(i as i32), Some(*mode));
    }
    assert_eq!(LayerMode::from_ordinal(-1), None);
    assert_eq!(LayerMode::from_ordinal(64), None);
}

#[test]
fn modes_serialize_as_kebab_case() {
    let json = serde_json::to_string(&LayerMode::NormalLegacy).unwrap();
    assert_eq!(json, "\"normal-legacy\"");
    let mode: LayerMode = serde_json::from_str("\"lch-hue\"").unwrap();
    assert_eq!(mode, LayerMode::LchHue);
    let cm: CompositeMode = serde_json::from_str("\"clip-to-backdrop\"").unwrap();
    assert_eq!(cm, CompositeMode::ClipToBackdrop);
}

#[test]
fn region_flags_compose() {
    assert_eq!(
        CompositeRegion::SOURCE | CompositeRegion::DESTINATION,
        CompositeRegion::UNION
    );
    assert!(CompositeRegion::INTERSECTION.is_empty());
    assert!(CompositeRegion::UNION.contains(CompositeRegion::SOURCE));
    assert!(!CompositeRegion::DESTINATION.contains(CompositeRegion::SOURCE));
    assert_eq!(!CompositeRegion::SOURCE, CompositeRegion::DESTINATION);
    assert_eq!(
        CompositeRegion::UNION.difference(CompositeRegion::SOURCE),
        CompositeRegion::DESTINATION
    );
}

#[test]
fn context_all_covers_each_context() {
    for c in [
        LayerModeContext::LAYER,
        LayerModeContext::GROUP,
        LayerModeContext::PAINT,
        LayerModeContext::FILTER,
    ] {
        assert!(LayerModeContext::ALL.contains(c));
    }
}

#[test]
fn formats_and_spaces_convert() {
    assert_eq!(ColorSpace::Auto.format(), None);
    assert_eq!(ColorSpace::Lab.format(), Some(PixelFormat::LabAlpha));
    assert_eq!(PixelFormat::RgbaPerceptual.color_space(), ColorSpace::RgbPerceptual);
    assert!(PixelFormat::RgbaLinear.is_rgba());
    assert!(!PixelFormat::LabAlpha.is_rgba());
}
