use super::*;
use crate::modes::types::{CompositeMode, LayerMode};

fn approx(a: Pixel, b: Pixel) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
    }
}

#[test]
fn clip_to_backdrop_removes_coverage() {
    let b = [0.2, 0.4, 0.6, 1.0];
    approx(clip_to_backdrop(&b, &[0.0, 0.0, 0.0, 1.0], 0.25), [0.2, 0.4, 0.6, 0.75]);
    approx(clip_to_backdrop(&b, &[0.0, 0.0, 0.0, 1.0], 1.0), [0.2, 0.4, 0.6, 0.0]);
}

#[test]
fn union_is_symmetric_difference_of_coverage() {
    let b = [1.0, 0.0, 0.0, 1.0];
    let s = [0.0, 0.0, 1.0, 1.0];
    assert_eq!(union(&b, &s, 1.0)[ALPHA], 0.0);
    let transparent = [0.0, 0.0, 0.0, 0.0];
    approx(union(&transparent, &s, 1.0), [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(union(&b, &[0.5, 0.5, 0.5, 0.0], 1.0), b);
}

#[test]
fn clip_to_layer_and_intersection() {
    let b = [1.0, 0.0, 0.0, 0.5];
    let s = [0.0, 0.0, 1.0, 1.0];
    approx(clip_to_layer(&b, &s, 1.0), [0.0, 0.0, 1.0, 0.5]);
    assert_eq!(intersection(&b, &s, 1.0), [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn process_defaults_to_clip_to_backdrop_for_auto() {
    let params = KernelParams {
        composite_mode: CompositeMode::Auto,
        ..KernelParams::resolved(LayerMode::Erase, 1.0)
    };
    let backdrop = [0.2, 0.4, 0.6, 1.0];
    let source = [0.0, 0.0, 0.0, 0.5];
    let mut out = [0.0; 4];
    process(&params, &backdrop, &source, None, &mut out);
    approx(out, [0.2, 0.4, 0.6, 0.5]);
}
