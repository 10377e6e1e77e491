//! Replace: the source substitutes the backdrop, with `opacity * mask` acting as an
//! interpolation weight on alpha rather than as a gate on source coverage.

use crate::foundation::core::{ALPHA, Pixel};
use crate::kernels::normal::PixelLaw;
use crate::kernels::{CompositeLaw, KernelParams, for_each_pixel};

pub(crate) fn union(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let new_alpha = (s[ALPHA] - b[ALPHA]) * v + b[ALPHA];
    if new_alpha == 0.0 {
        return [b[0], b[1], b[2], new_alpha];
    }
    let ratio = v * s[ALPHA] / new_alpha;
    [
        (s[0] - b[0]) * ratio + b[0],
        (s[1] - b[1]) * ratio + b[1],
        (s[2] - b[2]) * ratio + b[2],
        new_alpha,
    ]
}

pub(crate) fn clip_to_backdrop(b: &Pixel, _s: &Pixel, v: f32) -> Pixel {
    [b[0], b[1], b[2], b[ALPHA] * (1.0 - v)]
}

/// Always the source color: keeps the zero-copy path for opaque, unmasked calls exact.
pub(crate) fn clip_to_layer(_b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    [s[0], s[1], s[2], s[ALPHA] * v]
}

pub(crate) fn intersection(b: &Pixel, _s: &Pixel, _v: f32) -> Pixel {
    [b[0], b[1], b[2], 0.0]
}

pub(crate) fn process(
    params: &KernelParams,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
) {
    let law: PixelLaw = match params.law() {
        CompositeLaw::Union => union,
        CompositeLaw::ClipToBackdrop => clip_to_backdrop,
        CompositeLaw::ClipToLayer => clip_to_layer,
        CompositeLaw::Intersection => intersection,
    };
    let opacity = params.opacity;
    for_each_pixel(backdrop, source, mask, output, |b, s, m| law(b, s, opacity * m));
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/replace.rs"]
mod tests;
