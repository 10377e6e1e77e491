use super::*;

const RED: Pixel = [1.0, 0.0, 0.0, 1.0];
const HALF_BLUE: Pixel = [0.0, 0.0, 1.0, 0.5];

fn approx(a: Pixel, b: Pixel) {
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-6, "{a:?} != {b:?}");
    }
}

#[test]
fn union_is_source_over() {
    approx(union(&RED, &HALF_BLUE, 1.0), [0.5, 0.0, 0.5, 1.0]);
    approx(union(&[0.0; 4], &HALF_BLUE, 1.0), [0.0, 0.0, 1.0, 0.5]);
}

#[test]
fn union_with_transparent_source_keeps_backdrop() {
    let b = [0.2, 0.4, 0.6, 0.3];
    assert_eq!(union(&b, &[1.0, 1.0, 1.0, 0.0], 1.0), b);
    assert_eq!(union(&b, &HALF_BLUE, 0.0), b);
}

#[test]
fn clip_to_backdrop_keeps_backdrop_alpha() {
    let b = [1.0, 0.0, 0.0, 0.25];
    approx(clip_to_backdrop(&b, &HALF_BLUE, 1.0), [0.5, 0.0, 0.5, 0.25]);
}

#[test]
fn clip_to_layer_and_intersection_alpha() {
    approx(clip_to_layer(&RED, &HALF_BLUE, 0.5), [0.0, 0.0, 1.0, 0.25]);
    assert_eq!(clip_to_layer(&RED, &HALF_BLUE, 0.0), [1.0, 0.0, 0.0, 0.0]);
    let b = [1.0, 0.0, 0.0, 0.5];
    approx(intersection(&b, &HALF_BLUE, 1.0), [0.0, 0.0, 1.0, 0.25]);
}

#[test]
fn process_applies_mask_and_opacity() {
    let params = KernelParams::resolved(crate::modes::types::LayerMode::Normal, 0.5);
    let backdrop = [1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
    let source = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0];
    let mask = [1.0, 0.0];
    let mut out = [0.0; 8];
    process(&params, &backdrop, &source, Some(&mask), &mut out);
    approx([out[0], out[1], out[2], out[3]], [0.5, 0.0, 0.5, 1.0]);
    assert_eq!(&out[4..], &backdrop[4..]);
}
