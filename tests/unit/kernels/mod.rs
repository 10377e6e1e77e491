use super::*;

#[test]
fn kernel_names_are_stable() {
    assert_eq!(Kernel::LayerMode.name(), "layer-mode");
    assert_eq!(Kernel::AntiErase.name(), "anti-erase");
    assert_eq!(LayerMode::Dissolve.kernel(), Kernel::Dissolve);
}

#[test]
fn resolved_params_have_no_auto_fields() {
    for mode in LayerMode::ALL {
        let p = KernelParams::resolved(mode, 1.0);
        assert_ne!(p.composite_mode, CompositeMode::Auto, "{mode}");
    }
}

#[test]
fn auto_composite_mode_follows_the_mode_default() {
    let roi = Roi::new(0, 0, 1, 1);
    let seeds = DissolveSeedTable::global();
    let backdrop = [1.0, 0.0, 0.0, 0.5];
    let source = [0.0, 0.0, 1.0, 1.0];
    let run = |composite_mode| {
        let params = KernelParams {
            composite_mode,
            ..KernelParams::resolved(LayerMode::Multiply, 1.0)
        };
        let mut out = [0.0; 4];
        process_pixels(&params, seeds, &backdrop, &source, None, &mut out, roi).unwrap();
        out
    };

    assert_eq!(LayerMode::Multiply.composite_mode(), CompositeMode::ClipToBackdrop);
    assert_eq!(run(CompositeMode::Auto), run(CompositeMode::ClipToBackdrop));
    assert_ne!(run(CompositeMode::Auto), run(CompositeMode::Union));
}

#[test]
fn mismatched_spans_are_rejected() {
    let roi = Roi::new(0, 0, 2, 1);
    let params = KernelParams::resolved(LayerMode::Normal, 1.0);
    let seeds = DissolveSeedTable::global();
    let good = [0.0; 8];
    let mut out = [0.0; 8];
    let short = [0.0; 4];

    let err = process_pixels(&params, seeds, &short, &good, None, &mut out, roi).unwrap_err();
    assert!(matches!(err, LayerModeError::Buffer(_)));
    assert!(err.to_string().contains("backdrop"));

    let err =
        process_pixels(&params, seeds, &good, &good, Some(&[1.0]), &mut out, roi).unwrap_err();
    assert!(err.to_string().contains("mask"));

    let mut short_out = [0.0; 4];
    assert!(process_pixels(&params, seeds, &good, &good, None, &mut short_out, roi).is_err());
}

#[test]
fn empty_region_is_a_no_op() {
    let params = KernelParams::resolved(LayerMode::Multiply, 1.0);
    let mut out: [f32; 0] = [];
    let seeds = DissolveSeedTable::global();
    process_pixels(&params, seeds, &[], &[], None, &mut out, Roi::default()).unwrap();
}

#[test]
fn dispatch_reaches_dedicated_kernels() {
    let roi = Roi::new(0, 0, 1, 1);
    let seeds = DissolveSeedTable::global();
    let backdrop = [1.0, 0.0, 0.0, 1.0];
    let source = [0.0, 0.0, 1.0, 1.0];
    let mut out = [0.0; 4];

    let params = KernelParams::resolved(LayerMode::Normal, 1.0);
    process_pixels(&params, seeds, &backdrop, &source, None, &mut out, roi).unwrap();
    assert_eq!(out, source);

    let params = KernelParams::resolved(LayerMode::Erase, 1.0);
    process_pixels(&params, seeds, &backdrop, &source, None, &mut out, roi).unwrap();
    assert_eq!(out, [1.0, 0.0, 0.0, 0.0]);

    let params = KernelParams::resolved(LayerMode::Behind, 1.0);
    process_pixels(&params, seeds, &backdrop, &source, None, &mut out, roi).unwrap();
    assert_eq!(out, backdrop);
}
