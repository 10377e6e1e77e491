//! Per-pixel color conversions used by the blend stage.
//!
//! Everything here is allocation-free and total: out-of-gamut and negative values pass
//! through without clamping.

use crate::foundation::core::{ALPHA, BLUE, GREEN, Pixel, RED};
use crate::modes::types::ColorSpace;

/// Luminance weights of linear sRGB under a D50 white point.
pub const LUMINANCE_WEIGHTS: [f32; 3] = [0.222_504_5, 0.716_878_6, 0.060_616_9];

const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.436_074_7, 0.385_064_9, 0.143_080_4],
    [0.222_504_5, 0.716_878_6, 0.060_616_9],
    [0.013_932_2, 0.097_104_5, 0.714_173_3],
];

const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.133_856_1, -1.616_866_7, -0.490_614_6],
    [-0.978_768_4, 1.916_141_5, 0.033_454_0],
    [0.071_945_3, -0.228_991_4, 1.405_242_7],
];

const D50_WHITE: [f32; 3] = [0.964_2, 1.0, 0.824_9];

const LAB_DELTA: f32 = 6.0 / 29.0;

/// Linear-light channel value to its sRGB encoding.
pub fn linear_to_perceptual(v: f32) -> f32 {
    let a = v.abs();
    let e = if a <= 0.003_130_8 {
        a * 12.92
    } else {
        1.055 * a.powf(1.0 / 2.4) - 0.055
    };
    e.copysign(v)
}

/// sRGB-encoded channel value to linear light.
pub fn perceptual_to_linear(v: f32) -> f32 {
    let a = v.abs();
    let l = if a <= 0.040_45 {
        a / 12.92
    } else {
        ((a + 0.055) / 1.055).powf(2.4)
    };
    l.copysign(v)
}

/// Relative luminance of a linear RGB triple.
pub fn rgb_luminance(rgb: &[f32]) -> f32 {
    rgb[RED] * LUMINANCE_WEIGHTS[0]
        + rgb[GREEN] * LUMINANCE_WEIGHTS[1]
        + rgb[BLUE] * LUMINANCE_WEIGHTS[2]
}

fn mat3(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    if t > LAB_DELTA {
        t * t * t
    } else {
        3.0 * LAB_DELTA * LAB_DELTA * (t - 4.0 / 29.0)
    }
}

/// Linear RGB (sRGB primaries) to CIE L*a*b* relative to D50.
pub fn rgb_linear_to_lab(rgb: [f32; 3]) -> [f32; 3] {
    let xyz = mat3(&RGB_TO_XYZ, rgb);
    let fx = lab_f(xyz[0] / D50_WHITE[0]);
    let fy = lab_f(xyz[1] / D50_WHITE[1]);
    let fz = lab_f(xyz[2] / D50_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// CIE L*a*b* (D50) to linear RGB.
pub fn lab_to_rgb_linear(lab: [f32; 3]) -> [f32; 3] {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = fy + lab[1] / 500.0;
    let fz = fy - lab[2] / 200.0;
    let xyz = [
        D50_WHITE[0] * lab_f_inv(fx),
        D50_WHITE[1] * lab_f_inv(fy),
        D50_WHITE[2] * lab_f_inv(fz),
    ];
    mat3(&XYZ_TO_RGB, xyz)
}

fn to_linear(px: Pixel, from: ColorSpace) -> [f32; 3] {
    let rgb = [px[RED], px[GREEN], px[BLUE]];
    match from {
        ColorSpace::Auto | ColorSpace::RgbLinear => rgb,
        ColorSpace::RgbPerceptual => rgb.map(perceptual_to_linear),
        ColorSpace::Lab => lab_to_rgb_linear(rgb),
    }
}

fn from_linear(rgb: [f32; 3], to: ColorSpace) -> [f32; 3] {
    match to {
        ColorSpace::Auto | ColorSpace::RgbLinear => rgb,
        ColorSpace::RgbPerceptual => rgb.map(linear_to_perceptual),
        ColorSpace::Lab => rgb_linear_to_lab(rgb),
    }
}

/// Convert the color channels of `px` between two spaces; alpha passes through.
///
/// `Auto` on either side, or equal spaces, leaves the pixel untouched.
pub fn convert_pixel(px: Pixel, from: ColorSpace, to: ColorSpace) -> Pixel {
    if from == to || from == ColorSpace::Auto || to == ColorSpace::Auto {
        return px;
    }
    let c = from_linear(to_linear(px, from), to);
    [c[0], c[1], c[2], px[ALPHA]]
}

/// RGB to HSV, every component in `[0, 1]` for in-gamut input.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    [hue(rgb, max, delta), s, max]
}

/// HSV to RGB.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    if s == 0.0 {
        return [v, v, v];
    }
    let h6 = if h >= 1.0 { 0.0 } else { h * 6.0 };
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as i32 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// RGB to HSL, every component in `[0, 1]` for in-gamut input.
pub fn rgb_to_hsl(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return [0.0, 0.0, l];
    }
    let delta = max - min;
    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    [hue(rgb, max, delta), s, l]
}

/// HSL to RGB.
pub fn hsl_to_rgb(hsl: [f32; 3]) -> [f32; 3] {
    let [h, s, l] = hsl;
    if s == 0.0 {
        return [l, l, l];
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    let h6 = h * 6.0;
    [
        hsl_component(m1, m2, h6 + 2.0),
        hsl_component(m1, m2, h6),
        hsl_component(m1, m2, h6 - 2.0),
    ]
}

fn hue([r, g, b]: [f32; 3], max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let h = sector / 6.0;
    if h < 0.0 { h + 1.0 } else { h }
}

fn hsl_component(n1: f32, n2: f32, hue: f32) -> f32 {
    let hue = hue.rem_euclid(6.0);
    if hue < 1.0 {
        n1 + (n2 - n1) * hue
    } else if hue < 3.0 {
        n2
    } else if hue < 4.0 {
        n1 + (n2 - n1) * (4.0 - hue)
    } else {
        n1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/convert.rs"]
mod tests;
