//! Compositing laws shared by the generic kernel.
//!
//! Every law takes the backdrop `b`, the source `s`, the blended pixel `comp` (all in
//! the composite space) and `v = opacity * mask`, and returns the output pixel. A
//! source whose effective alpha is zero always yields the backdrop color.

use crate::foundation::core::{ALPHA, BLUE, GREEN, Pixel, RED};
use crate::kernels::CompositeLaw;

/// Signature shared by all compositing laws.
pub type CompositeFn = fn(&Pixel, &Pixel, &Pixel, f32) -> Pixel;

#[inline]
fn rgb_with(c: &Pixel, alpha: f32) -> Pixel {
    [c[RED], c[GREEN], c[BLUE], alpha]
}

#[inline]
fn map_rgb(alpha: f32, f: impl Fn(usize) -> f32) -> Pixel {
    [f(RED), f(GREEN), f(BLUE), alpha]
}

/// Source over backdrop, the blend weighted by backdrop alpha.
pub fn union(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let new_alpha = layer_alpha + (1.0 - layer_alpha) * in_alpha;

    if layer_alpha == 0.0 || new_alpha == 0.0 {
        rgb_with(b, new_alpha)
    } else if in_alpha == 0.0 {
        rgb_with(s, new_alpha)
    } else {
        let ratio = layer_alpha / new_alpha;
        map_rgb(new_alpha, |c| {
            ratio * (in_alpha * (comp[c] - s[c]) + s[c] - b[c]) + b[c]
        })
    }
}

/// Blend mixed into the backdrop, keeping backdrop alpha.
pub fn clip_to_backdrop(b: &Pixel, _s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let layer_alpha = comp[ALPHA] * v;
    if b[ALPHA] == 0.0 || layer_alpha == 0.0 {
        rgb_with(b, b[ALPHA])
    } else {
        map_rgb(b[ALPHA], |c| comp[c] * layer_alpha + b[c] * (1.0 - layer_alpha))
    }
}

/// Blend mixed into the source, keeping effective source alpha.
pub fn clip_to_layer(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    if layer_alpha == 0.0 {
        rgb_with(b, layer_alpha)
    } else if in_alpha == 0.0 {
        rgb_with(s, layer_alpha)
    } else {
        map_rgb(layer_alpha, |c| comp[c] * in_alpha + s[c] * (1.0 - in_alpha))
    }
}

/// Blend where both inputs overlap.
pub fn intersection(b: &Pixel, _s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let new_alpha = b[ALPHA] * comp[ALPHA] * v;
    if new_alpha == 0.0 {
        rgb_with(b, new_alpha)
    } else {
        rgb_with(comp, new_alpha)
    }
}

/// Union where the blend can remove coverage.
pub fn union_sub(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let comp_alpha = comp[ALPHA];
    let new_alpha = in_alpha + layer_alpha - (2.0 - comp_alpha) * in_alpha * layer_alpha;

    if layer_alpha == 0.0 || new_alpha == 0.0 {
        return rgb_with(b, new_alpha);
    }
    let in_coeff = in_alpha - in_alpha * layer_alpha;
    let layer_coeff = layer_alpha - in_alpha * layer_alpha;
    let comp_coeff = comp_alpha * in_alpha * layer_alpha;
    let inv = 1.0 / new_alpha;
    map_rgb(new_alpha, |c| {
        (in_coeff * b[c] + layer_coeff * s[c] + comp_coeff * comp[c]) * inv
    })
}

/// Clip-to-backdrop where the blend can remove coverage.
pub fn clip_to_backdrop_sub(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let layer_alpha = s[ALPHA] * v;
    let comp_alpha = comp[ALPHA] * layer_alpha;
    let new_alpha = 1.0 - layer_alpha + comp_alpha;

    if layer_alpha == 0.0 || b[ALPHA] == 0.0 || new_alpha == 0.0 {
        return rgb_with(b, b[ALPHA] * new_alpha);
    }
    let ratio = comp_alpha / new_alpha;
    map_rgb(b[ALPHA] * new_alpha, |c| comp[c] * ratio + b[c] * (1.0 - ratio))
}

/// Clip-to-layer where the blend can remove coverage.
pub fn clip_to_layer_sub(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let comp_alpha = comp[ALPHA] * in_alpha;
    let new_alpha = 1.0 - in_alpha + comp_alpha;

    if layer_alpha == 0.0 || new_alpha == 0.0 {
        return rgb_with(b, layer_alpha * new_alpha);
    }
    let ratio = comp_alpha / new_alpha;
    map_rgb(layer_alpha * new_alpha, |c| comp[c] * ratio + s[c] * (1.0 - ratio))
}

/// Intersection where the blend can remove coverage.
pub fn intersection_sub(b: &Pixel, s: &Pixel, comp: &Pixel, v: f32) -> Pixel {
    let new_alpha = b[ALPHA] * comp[ALPHA] * s[ALPHA] * v;
    if new_alpha == 0.0 {
        rgb_with(b, new_alpha)
    } else {
        rgb_with(comp, new_alpha)
    }
}

/// Law for `law`, in its subtractive variant when `subtractive` is set.
pub(crate) fn composite_fn(law: CompositeLaw, subtractive: bool) -> CompositeFn {
    match (law, subtractive) {
        (CompositeLaw::Union, false) => union,
        (CompositeLaw::ClipToBackdrop, false) => clip_to_backdrop,
        (CompositeLaw::ClipToLayer, false) => clip_to_layer,
        (CompositeLaw::Intersection, false) => intersection,
        (CompositeLaw::Union, true) => union_sub,
        (CompositeLaw::ClipToBackdrop, true) => clip_to_backdrop_sub,
        (CompositeLaw::ClipToLayer, true) => clip_to_layer_sub,
        (CompositeLaw::Intersection, true) => intersection_sub,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/composite.rs"]
mod tests;
