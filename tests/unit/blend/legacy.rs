use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5
}

#[test]
fn additive_modes_clamp() {
    let b = [0.75, 0.25, 0.5, 1.0];
    let s = [0.5, 0.5, 0.5, 1.0];
    assert_eq!(addition(&b, &s), [1.0, 0.75, 1.0, 1.0]);
    assert_eq!(subtract(&b, &s), [0.25, 0.0, 0.0, 1.0]);
    assert_eq!(grain_extract(&[0.0, 1.0, 0.5, 1.0], &[1.0, 0.0, 0.5, 1.0]), [0.0, 1.0, 0.5, 1.0]);
}

#[test]
fn divide_uses_eight_bit_bias() {
    let out = divide(&[0.5, 1.0, 0.0, 1.0], &[1.0, 0.0, 0.5, 1.0]);
    assert!(close(out[0], (0.5 * 256.0 / 255.0) / (1.0 / 255.0 + 1.0)));
    assert_eq!(out[1], 1.0);
    assert_eq!(out[2], 0.0);
}

#[test]
fn dodge_and_burn_stay_in_range() {
    let b = [0.5, 0.0, 1.0, 1.0];
    let s = [1.0, 0.0, 0.25, 1.0];
    for out in [dodge(&b, &s), burn(&b, &s), hardlight(&b, &s), softlight(&b, &s)] {
        assert!(out[..3].iter().all(|v| (0.0..=1.0).contains(v)), "{out:?}");
    }
}

#[test]
fn hue_from_gray_source_is_ignored() {
    let b = [0.8, 0.2, 0.2, 1.0];
    let out = hsv_hue(&b, &[0.5, 0.5, 0.5, 1.0]);
    for c in 0..3 {
        assert!(close(out[c], b[c]));
    }
    let out = hsl_color(&b, &[0.3, 0.3, 0.3, 1.0]);
    for c in 0..3 {
        assert!(close(out[c], b[c]));
    }
}

#[test]
fn hsv_value_replaces_brightness() {
    let out = hsv_value(&[0.8, 0.4, 0.0, 1.0], &[0.2, 0.1, 0.1, 1.0]);
    assert!(close(out[0], 0.2));
    assert!(close(out[1], 0.1));
    assert!(close(out[2], 0.0));
}

#[test]
fn hsv_saturation_of_gray_source_desaturates() {
    let out = hsv_saturation(&[0.8, 0.4, 0.0, 1.0], &[0.5, 0.5, 0.5, 1.0]);
    assert!(close(out[0], 0.8) && close(out[1], 0.8) && close(out[2], 0.8));
}
