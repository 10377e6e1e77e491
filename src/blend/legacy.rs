//! Blend functions of the legacy mode family.
//!
//! These reproduce the clamped arithmetic of the pre-linear-light modes. They share
//! the [`BlendFunction`](super::functions::BlendFunction) signature but are only
//! ever driven by the legacy kernel, which ignores the returned alpha.

use crate::color::convert::{hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv};
use crate::foundation::core::{ALPHA, BLUE, GREEN, Pixel, RED};
use crate::foundation::math::{clamp01, safe_div};

fn per_channel(b: &Pixel, s: &Pixel, f: impl Fn(f32, f32) -> f32) -> Pixel {
    [f(b[RED], s[RED]), f(b[GREEN], s[GREEN]), f(b[BLUE], s[BLUE]), s[ALPHA]]
}

fn rgb(p: &Pixel) -> [f32; 3] {
    [p[RED], p[GREEN], p[BLUE]]
}

fn with_alpha(c: [f32; 3], s: &Pixel) -> Pixel {
    [c[0], c[1], c[2], s[ALPHA]]
}

/// `b * s`, clamped.
pub fn multiply(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(i * l))
}

/// `1 - (1 - b)(1 - s)`, clamped.
pub fn screen(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(1.0 - (1.0 - i) * (1.0 - l)))
}

/// Also used by the legacy overlay mode, which never had a distinct formula.
pub fn softlight(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| {
        let multiply = i * l;
        let screen = 1.0 - (1.0 - i) * (1.0 - l);
        clamp01((1.0 - i) * multiply + i * screen)
    })
}

/// `|b - s|`.
pub fn difference(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01((i - l).abs()))
}

/// `min(b + s, 1)`.
pub fn addition(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(i + l))
}

/// `max(b - s, 0)`.
pub fn subtract(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(i - l))
}

/// `min(b, s)`.
pub fn darken_only(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, f32::min)
}

/// `max(b, s)`.
pub fn lighten_only(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, f32::max)
}

/// Source hue; a gray source leaves the backdrop untouched.
pub fn hsv_hue(b: &Pixel, s: &Pixel) -> Pixel {
    let src = rgb_to_hsv(rgb(s));
    let mut dst = rgb_to_hsv(rgb(b));
    if src[1] != 0.0 {
        dst[0] = src[0];
    }
    with_alpha(hsv_to_rgb(dst), s)
}

/// Source saturation with backdrop hue and value.
pub fn hsv_saturation(b: &Pixel, s: &Pixel) -> Pixel {
    let src = rgb_to_hsv(rgb(s));
    let mut dst = rgb_to_hsv(rgb(b));
    dst[1] = src[1];
    with_alpha(hsv_to_rgb(dst), s)
}

/// Source hue and saturation; a gray source leaves the backdrop untouched.
pub fn hsl_color(b: &Pixel, s: &Pixel) -> Pixel {
    let src = rgb_to_hsl(rgb(s));
    let mut dst = rgb_to_hsl(rgb(b));
    if src[1] != 0.0 {
        dst[0] = src[0];
        dst[1] = src[1];
    }
    with_alpha(hsl_to_rgb(dst), s)
}

/// Source value with backdrop hue and saturation.
pub fn hsv_value(b: &Pixel, s: &Pixel) -> Pixel {
    let src = rgb_to_hsv(rgb(s));
    let mut dst = rgb_to_hsv(rgb(b));
    dst[2] = src[2];
    with_alpha(hsv_to_rgb(dst), s)
}

/// `b * 256/255 / (s + 1/255)`, capped at `1`.
pub fn divide(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| {
        let comp = (i * 256.0 / 255.0) / (1.0 / 255.0 + l);
        comp.min(1.0)
    })
}

/// `b / (1 - s)`, capped at `1`.
pub fn dodge(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| safe_div(i, 1.0 - l).min(1.0))
}

/// `1 - (1 - b) / s`, clamped.
pub fn burn(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(1.0 - safe_div(1.0 - i, l)))
}

/// Multiply for `s <= 0.5`, screen above, clamped.
pub fn hardlight(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| {
        if l > 0.5 {
            clamp01(1.0 - (1.0 - i) * (1.0 - (l - 0.5) * 2.0))
        } else {
            clamp01(i * l * 2.0)
        }
    })
}

/// `b - s + 0.5`, clamped.
pub fn grain_extract(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(i - l + 0.5))
}

/// `b + s - 0.5`, clamped.
pub fn grain_merge(b: &Pixel, s: &Pixel) -> Pixel {
    per_channel(b, s, |i, l| clamp01(i + l - 0.5))
}

#[cfg(test)]
#[path = "../../tests/unit/blend/legacy.rs"]
mod tests;
