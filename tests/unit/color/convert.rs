use super::*;

fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn srgb_transfer_roundtrips_and_mirrors_sign() {
    for v in [0.0f32, 0.001, 0.02, 0.2, 0.5, 0.9, 1.0] {
        assert!(close(perceptual_to_linear(linear_to_perceptual(v)), v, 1e-5));
    }
    assert!(close(linear_to_perceptual(0.5), 0.735_356_9, 1e-4));
    assert_eq!(linear_to_perceptual(-0.5), -linear_to_perceptual(0.5));
}

#[test]
fn white_maps_to_lab_l100() {
    let lab = rgb_linear_to_lab([1.0, 1.0, 1.0]);
    assert!(close(lab[0], 100.0, 0.05));
    assert!(close(lab[1], 0.0, 0.05));
    assert!(close(lab[2], 0.0, 0.05));

    let black = rgb_linear_to_lab([0.0, 0.0, 0.0]);
    assert!(close(black[0], 0.0, 1e-3));
}

#[test]
fn lab_roundtrip_is_close() {
    for rgb in [[0.2f32, 0.5, 0.8], [1.0, 0.0, 0.0], [0.01, 0.9, 0.3]] {
        let back = lab_to_rgb_linear(rgb_linear_to_lab(rgb));
        for c in 0..3 {
            assert!(close(back[c], rgb[c], 1e-3), "{rgb:?} -> {back:?}");
        }
    }
}

#[test]
fn convert_pixel_preserves_alpha_and_identity() {
    let px = [0.25, 0.5, 0.75, 0.4];
    assert_eq!(convert_pixel(px, ColorSpace::Lab, ColorSpace::Lab), px);
    assert_eq!(convert_pixel(px, ColorSpace::Auto, ColorSpace::Lab), px);
    let lab = convert_pixel(px, ColorSpace::RgbLinear, ColorSpace::Lab);
    assert_eq!(lab[ALPHA], 0.4);
    let back = convert_pixel(lab, ColorSpace::Lab, ColorSpace::RgbPerceptual);
    assert!(close(back[0], linear_to_perceptual(0.25), 1e-3));
}

#[test]
fn luminance_weights_sum_to_one() {
    let sum: f32 = LUMINANCE_WEIGHTS.iter().sum();
    assert!(close(sum, 1.0, 1e-6));
    assert!(close(rgb_luminance(&[1.0, 1.0, 1.0]), 1.0, 1e-6));
}

#[test]
fn hsv_and_hsl_roundtrip() {
    for rgb in [[1.0f32, 0.0, 0.0], [0.2, 0.6, 0.4], [0.9, 0.9, 0.1], [0.3, 0.3, 0.3]] {
        let hsv = hsv_to_rgb(rgb_to_hsv(rgb));
        let hsl = hsl_to_rgb(rgb_to_hsl(rgb));
        for c in 0..3 {
            assert!(close(hsv[c], rgb[c], 1e-5), "hsv {rgb:?} -> {hsv:?}");
            assert!(close(hsl[c], rgb[c], 1e-5), "hsl {rgb:?} -> {hsl:?}");
        }
    }
    assert_eq!(rgb_to_hsv([0.0, 1.0, 0.0])[0], 1.0 / 3.0);
}
