use super::*;

#[test]
fn color_is_always_backdrop() {
    let b = [0.1, 0.2, 0.3, 0.5];
    let s = [0.9, 0.8, 0.7, 1.0];
    let laws: [PixelLaw; 4] = [union, clip_to_backdrop, clip_to_layer, intersection];
    for law in laws {
        let out = law(&b, &s, 1.0);
        assert_eq!(&out[..3], &b[..3]);
    }
}

#[test]
fn alpha_per_law() {
    let b = [0.1, 0.2, 0.3, 0.5];
    let s = [0.9, 0.8, 0.7, 1.0];
    assert_eq!(union(&b, &s, 0.5)[ALPHA], 0.75);
    assert_eq!(clip_to_backdrop(&b, &s, 0.5)[ALPHA], 0.5);
    assert_eq!(clip_to_layer(&b, &s, 0.5)[ALPHA], 0.5);
    assert_eq!(intersection(&b, &s, 0.5)[ALPHA], 0.25);
}
