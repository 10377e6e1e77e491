//! Pure per-pixel blend functions of the current mode family.
//!
//! Each function takes the backdrop pixel `b` and the source pixel `s` (both in the
//! mode's blend space) and returns the blended pixel. The blended alpha is the source
//! alpha, except for subtractive functions, which report how much content remains.
//! Color is only computed when both alphas are non-zero; otherwise the backdrop color
//! is passed through.

use crate::color::convert::rgb_luminance;
use crate::foundation::core::{ALPHA, BLUE, GREEN, Pixel, RED};
use crate::foundation::math::{EPSILON, safe_div};

/// A pure blend: `(backdrop, source) -> blended`.
pub type BlendFunction = fn(&Pixel, &Pixel) -> Pixel;

fn both_present(b: &Pixel, s: &Pixel) -> bool {
    b[ALPHA] != 0.0 && s[ALPHA] != 0.0
}

#[inline]
fn separable(b: &Pixel, s: &Pixel, f: impl Fn(f32, f32) -> f32) -> Pixel {
    if !both_present(b, s) {
        return [b[RED], b[GREEN], b[BLUE], s[ALPHA]];
    }
    [f(b[RED], s[RED]), f(b[GREEN], s[GREEN]), f(b[BLUE], s[BLUE]), s[ALPHA]]
}

fn with_color(b: &Pixel, s: &Pixel, f: impl Fn() -> [f32; 3]) -> Pixel {
    if !both_present(b, s) {
        return [b[RED], b[GREEN], b[BLUE], s[ALPHA]];
    }
    let c = f();
    [c[0], c[1], c[2], s[ALPHA]]
}

fn min3(p: &Pixel) -> f32 {
    p[RED].min(p[GREEN]).min(p[BLUE])
}

fn max3(p: &Pixel) -> f32 {
    p[RED].max(p[GREEN]).max(p[BLUE])
}

fn affine(p: &Pixel, ratio: f32, offset: f32) -> [f32; 3] {
    [
        p[RED] * ratio + offset,
        p[GREEN] * ratio + offset,
        p[BLUE] * ratio + offset,
    ]
}

/// `b + s`.
pub fn addition(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i + l)
}

/// `1 - (1 - b) / s`.
pub fn burn(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| 1.0 - safe_div(1.0 - i, l))
}

/// `min(b, s)`.
pub fn darken_only(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, f32::min)
}

/// `|b - s|`.
pub fn difference(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| (i - l).abs())
}

/// `b / s`.
pub fn divide(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, safe_div)
}

/// `b / (1 - s)`.
pub fn dodge(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| safe_div(i, 1.0 - l))
}

/// `0.5 - 2 (b - 0.5)(s - 0.5)`.
pub fn exclusion(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| 0.5 - 2.0 * (i - 0.5) * (l - 0.5))
}

/// `b - s + 0.5`.
pub fn grain_extract(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i - l + 0.5)
}

/// `b + s - 0.5`.
pub fn grain_merge(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i + l - 0.5)
}

/// `0` when `b + s < 1`, else `1`.
pub fn hard_mix(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| if i + l < 1.0 { 0.0 } else { 1.0 })
}

/// Multiply for `s <= 0.5`, screen above, capped at `1`.
pub fn hardlight(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        if l > 0.5 {
            let val = (1.0 - i) * (1.0 - (l - 0.5) * 2.0);
            (1.0 - val).min(1.0)
        } else {
            (i * l * 2.0).min(1.0)
        }
    })
}

/// Source hue and saturation with backdrop lightness.
pub fn hsl_color(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let mut dest_l = (min3(b) + max3(b)) / 2.0;
        let mut src_l = (min3(s) + max3(s)) / 2.0;
        if src_l.abs() > EPSILON && (1.0 - src_l).abs() > EPSILON {
            let dest_high = dest_l > 0.5;
            let src_high = src_l > 0.5;
            dest_l = dest_l.min(1.0 - dest_l);
            src_l = src_l.min(1.0 - src_l);

            let ratio = dest_l / src_l;
            let mut offset = 0.0;
            if dest_high {
                offset += 1.0 - 2.0 * dest_l;
            }
            if src_high {
                offset += 2.0 * dest_l - ratio;
            }
            affine(s, ratio, offset)
        } else {
            [dest_l; 3]
        }
    })
}

/// Source hue with backdrop saturation and value.
pub fn hsv_hue(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let src_max = max3(s);
        let src_delta = src_max - min3(s);
        if src_delta > EPSILON {
            let dest_max = max3(b);
            let dest_delta = dest_max - min3(b);
            let dest_s = if dest_max != 0.0 {
                dest_delta / dest_max
            } else {
                0.0
            };
            let ratio = dest_s * dest_max / src_delta;
            let offset = dest_max - src_max * ratio;
            affine(s, ratio, offset)
        } else {
            [b[RED], b[GREEN], b[BLUE]]
        }
    })
}

/// Source saturation with backdrop hue and value.
pub fn hsv_saturation(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let dest_max = max3(b);
        let dest_delta = dest_max - min3(b);
        if dest_delta > EPSILON {
            let src_max = max3(s);
            let src_delta = src_max - min3(s);
            let src_s = if src_max != 0.0 {
                src_delta / src_max
            } else {
                0.0
            };
            let ratio = src_s * dest_max / dest_delta;
            let offset = (1.0 - ratio) * dest_max;
            affine(b, ratio, offset)
        } else {
            [dest_max; 3]
        }
    })
}

/// Source value with backdrop hue and saturation.
pub fn hsv_value(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let dest_v = max3(b);
        let src_v = max3(s);
        if dest_v.abs() > EPSILON {
            affine(b, src_v / dest_v, 0.0)
        } else {
            [src_v; 3]
        }
    })
}

/// Lab: backdrop lightness and hue, source chroma.
pub fn lch_chroma(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let c1 = b[GREEN].hypot(b[BLUE]);
        if c1 > EPSILON {
            let c2 = s[GREEN].hypot(s[BLUE]);
            [b[RED], c2 * b[GREEN] / c1, c2 * b[BLUE] / c1]
        } else {
            [b[RED], b[GREEN], b[BLUE]]
        }
    })
}

/// Lab: backdrop lightness, source chroma and hue.
pub fn lch_color(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || [b[RED], s[GREEN], s[BLUE]])
}

/// Lab: backdrop lightness and chroma, source hue.
pub fn lch_hue(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        let c2 = s[GREEN].hypot(s[BLUE]);
        if c2 > EPSILON {
            let c1 = b[GREEN].hypot(b[BLUE]);
            [b[RED], c1 * s[GREEN] / c2, c1 * s[BLUE] / c2]
        } else {
            [b[RED], b[GREEN], b[BLUE]]
        }
    })
}

/// Lab: source lightness, backdrop chroma and hue.
pub fn lch_lightness(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || [s[RED], b[GREEN], b[BLUE]])
}

/// `max(b, s)`.
pub fn lighten_only(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, f32::max)
}

/// `b + s - 1`.
pub fn linear_burn(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i + l - 1.0)
}

/// `b + 2s - 1` for `s <= 0.5`, `b + 2(s - 0.5)` above.
pub fn linear_light(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        if l <= 0.5 {
            i + 2.0 * l - 1.0
        } else {
            i + 2.0 * (l - 0.5)
        }
    })
}

/// Whole pixel with the lower luminance; ties keep the backdrop.
pub fn luma_darken_only(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        if rgb_luminance(b) <= rgb_luminance(s) {
            [b[RED], b[GREEN], b[BLUE]]
        } else {
            [s[RED], s[GREEN], s[BLUE]]
        }
    })
}

/// Whole pixel with the higher luminance; ties keep the backdrop.
pub fn luma_lighten_only(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || {
        if rgb_luminance(b) >= rgb_luminance(s) {
            [b[RED], b[GREEN], b[BLUE]]
        } else {
            [s[RED], s[GREEN], s[BLUE]]
        }
    })
}

/// Backdrop color rescaled to the source luminance.
pub fn luminance(b: &Pixel, s: &Pixel) -> Pixel {
    with_color(b, s, || affine(b, safe_div(rgb_luminance(s), rgb_luminance(b)), 0.0))
}

/// `b * s`.
pub fn multiply(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i * l)
}

/// `2bs` for `b < 0.5`, `1 - 2(1 - s)(1 - b)` above.
pub fn overlay(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        if i < 0.5 {
            2.0 * i * l
        } else {
            1.0 - 2.0 * (1.0 - l) * (1.0 - i)
        }
    })
}

/// `max(b, 2(s - 0.5))` for `s > 0.5`, `min(b, 2s)` otherwise.
pub fn pin_light(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        if l > 0.5 {
            i.max(2.0 * (l - 0.5))
        } else {
            i.min(2.0 * l)
        }
    })
}

/// `1 - (1 - b)(1 - s)`.
pub fn screen(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| 1.0 - (1.0 - i) * (1.0 - l))
}

/// `(1 - b) * multiply + b * screen`.
pub fn softlight(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        let multiply = i * l;
        let screen = 1.0 - (1.0 - i) * (1.0 - l);
        (1.0 - i) * multiply + i * screen
    })
}

/// `b - s`.
pub fn subtract(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| i - l)
}

/// Color burn with `2s` for `s <= 0.5`, color dodge with `2(s - 0.5)` above.
pub fn vivid_light(b: &Pixel, s: &Pixel) -> Pixel {
    separable(b, s, |i, l| {
        if l <= 0.5 {
            (1.0 - safe_div(1.0 - i, 2.0 * l)).max(0.0)
        } else {
            safe_div(i, 2.0 * (1.0 - l)).min(1.0)
        }
    })
}

/// Removes the source color from the backdrop, turning it into transparency.
///
/// Subtractive: the blended alpha is the fraction of the backdrop color that cannot be
/// explained by the source color, and is `0` whenever either input is transparent.
pub fn color_erase(b: &Pixel, s: &Pixel) -> Pixel {
    if !both_present(b, s) {
        return [b[RED], b[GREEN], b[BLUE], 0.0];
    }
    let mut alpha = 0.0f32;
    for c in [RED, GREEN, BLUE] {
        let col = b[c].clamp(0.0, 1.0);
        let bgcol = s[c].clamp(0.0, 1.0);
        if (col - bgcol).abs() > EPSILON {
            let a = if col > bgcol {
                (col - bgcol) / (1.0 - bgcol)
            } else {
                (bgcol - col) / bgcol
            };
            alpha = alpha.max(a);
        }
    }
    if alpha > EPSILON {
        let inv = 1.0 / alpha;
        [
            (b[RED] - s[RED]) * inv + s[RED],
            (b[GREEN] - s[GREEN]) * inv + s[GREEN],
            (b[BLUE] - s[BLUE]) * inv + s[BLUE],
            alpha,
        ]
    } else {
        [0.0, 0.0, 0.0, alpha]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/functions.rs"]
mod tests;
