use super::*;
use crate::modes::types::CompositeMode;

fn op(mode: LayerMode, composite_mode: CompositeMode, opacity: f32) -> LayerModeOp {
    LayerModeOp::new(
        LayerModeSettings::for_mode(mode)
            .with_composite_mode(composite_mode)
            .with_opacity(opacity),
    )
    .unwrap()
}

fn is_borrowed_from(out: &Cow<'_, [f32]>, buf: &[f32]) -> bool {
    matches!(out, Cow::Borrowed(b) if std::ptr::eq(b.as_ptr(), buf.as_ptr()))
}

static BACKDROP: [f32; 8] = [1.0, 0.0, 0.0, 1.0, 0.2, 0.4, 0.6, 0.5];
static SOURCE: [f32; 8] = [0.0, 0.0, 1.0, 0.5, 0.9, 0.8, 0.7, 1.0];
const ROI: Roi = Roi::new(0, 0, 2, 1);

#[test]
fn auto_settings_resolve_through_registry() {
    let multiply = op(LayerMode::Multiply, CompositeMode::Auto, 1.0);
    assert_eq!(multiply.params().composite_mode, CompositeMode::ClipToBackdrop);
    assert_eq!(multiply.params().composite_space, ColorSpace::RgbLinear);
    assert_eq!(multiply.region(), CompositeRegion::DESTINATION);
    assert_eq!(multiply.format(), PixelFormat::RgbaLinear);

    let lch = op(LayerMode::LchHue, CompositeMode::Auto, 1.0);
    assert_eq!(lch.params().blend_space, ColorSpace::Lab);
    assert_eq!(lch.kernel(), Kernel::LayerMode);
}

#[test]
fn agnostic_modes_adopt_preferred_format() {
    let dissolve = LayerModeOp::with_preferred_format(
        LayerModeSettings::for_mode(LayerMode::Dissolve),
        PixelFormat::RgbaPerceptual,
    )
    .unwrap();
    assert_eq!(dissolve.format(), PixelFormat::RgbaPerceptual);
    assert_eq!(dissolve.params().composite_space, ColorSpace::RgbPerceptual);
    assert_eq!(dissolve.params().blend_space, ColorSpace::RgbPerceptual);

    let erase = LayerModeOp::with_preferred_format(
        LayerModeSettings::for_mode(LayerMode::Erase),
        PixelFormat::RgbaPerceptual,
    )
    .unwrap();
    assert_eq!(erase.format(), PixelFormat::RgbaPerceptual);
}

#[test]
fn invalid_settings_fail_construction() {
    assert!(LayerModeOp::new(LayerModeSettings::default().with_opacity(2.0)).is_err());
}

#[test]
fn zero_opacity_borrows_backdrop() {
    let normal = op(LayerMode::Normal, CompositeMode::Auto, 0.0);
    let out = normal.composite(&BACKDROP, &SOURCE, None, ROI).unwrap();
    assert!(is_borrowed_from(&out, &BACKDROP));

    let mut processed = [0.0; 8];
    normal.process(&BACKDROP, &SOURCE, None, &mut processed, ROI).unwrap();
    assert_eq!(&processed, out.as_ref());
}

#[test]
fn zero_opacity_subtractive_mode_still_runs_kernel() {
    let erase = op(LayerMode::Erase, CompositeMode::Auto, 0.0);
    let out = erase.composite(&BACKDROP, &SOURCE, None, ROI).unwrap();
    assert!(matches!(out, Cow::Owned(_)));
    assert_eq!(out.as_ref(), &BACKDROP);
}

#[test]
fn opaque_replace_clipped_to_layer_borrows_source() {
    let replace = op(LayerMode::Replace, CompositeMode::ClipToLayer, 1.0);
    let out = replace.composite(&BACKDROP, &SOURCE, None, ROI).unwrap();
    assert!(is_borrowed_from(&out, &SOURCE));

    let mut processed = [0.0; 8];
    replace.process(&BACKDROP, &SOURCE, None, &mut processed, ROI).unwrap();
    assert_eq!(&processed, out.as_ref());

    let masked = replace.composite(&BACKDROP, &SOURCE, Some(&[1.0, 0.5]), ROI).unwrap();
    assert!(matches!(masked, Cow::Owned(_)));
}

#[test]
fn replace_union_of_buffer_with_itself_borrows_it() {
    let replace = op(LayerMode::Replace, CompositeMode::Union, 0.7);
    let out = replace.composite(&SOURCE, &SOURCE, Some(&[0.3, 1.0]), ROI).unwrap();
    assert!(is_borrowed_from(&out, &SOURCE));

    let mut processed = [0.0; 8];
    replace
        .process(&SOURCE, &SOURCE, Some(&[0.3, 1.0]), &mut processed, ROI)
        .unwrap();
    assert_eq!(&processed, out.as_ref());

    let copy = SOURCE;
    let owned = replace.composite(&copy, &SOURCE, None, ROI).unwrap();
    assert!(matches!(owned, Cow::Owned(_)));
}

#[test]
fn composite_checks_spans_before_shortcuts() {
    let normal = op(LayerMode::Normal, CompositeMode::Auto, 0.0);
    assert!(normal.composite(&BACKDROP[..4], &SOURCE, None, ROI).is_err());
    assert!(normal.composite(&BACKDROP, &SOURCE, Some(&[1.0]), ROI).is_err());
}

#[test]
fn bounding_box_drops_source_when_transparent() {
    let source = Roi::new(10, 10, 10, 10);
    let destination = Roi::new(0, 0, 12, 12);

    let opaque = op(LayerMode::Normal, CompositeMode::Union, 1.0);
    assert_eq!(opaque.bounding_box(source, destination, None), Roi::new(0, 0, 20, 20));

    let clear = op(LayerMode::Normal, CompositeMode::Union, 0.0);
    assert_eq!(clear.bounding_box(source, destination, None), destination);

    let clip = op(LayerMode::Normal, CompositeMode::ClipToLayer, 1.0);
    assert_eq!(
        clip.bounding_box(source, destination, Some(Roi::new(0, 0, 15, 15))),
        Roi::new(10, 10, 5, 5)
    );
}

#[test]
fn injected_seed_table_matches_global_one() {
    let settings = LayerModeSettings::for_mode(LayerMode::Dissolve).with_opacity(0.5);
    let global = LayerModeOp::new(settings).unwrap();
    let injected = LayerModeOp::new(settings)
        .unwrap()
        .with_seed_table(Arc::new(DissolveSeedTable::new()));

    let a = global.composite(&BACKDROP, &SOURCE, None, ROI).unwrap();
    let b = injected.composite(&BACKDROP, &SOURCE, None, ROI).unwrap();
    assert_eq!(a, b);
}
