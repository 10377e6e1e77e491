use crate::foundation::core::{ALPHA, Pixel};
use crate::kernels::normal::PixelLaw;
use crate::kernels::{CompositeLaw, KernelParams, for_each_pixel};

pub(crate) fn union(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let new_alpha = in_alpha + layer_alpha - 2.0 * in_alpha * layer_alpha;
    if layer_alpha == 0.0 || new_alpha == 0.0 {
        return [b[0], b[1], b[2], new_alpha];
    }
    let ratio = (1.0 - in_alpha) * layer_alpha / new_alpha;
    [
        ratio * s[0] + (1.0 - ratio) * b[0],
        ratio * s[1] + (1.0 - ratio) * b[1],
        ratio * s[2] + (1.0 - ratio) * b[2],
        new_alpha,
    ]
}

pub(crate) fn clip_to_backdrop(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    [b[0], b[1], b[2], b[ALPHA] * (1.0 - s[ALPHA] * v)]
}

pub(crate) fn clip_to_layer(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let layer_alpha = s[ALPHA] * v;
    if layer_alpha == 0.0 {
        return [b[0], b[1], b[2], 0.0];
    }
    [s[0], s[1], s[2], layer_alpha * (1.0 - b[ALPHA])]
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
#[path = "../../tests/unit/kernels/erase.rs"]
mod tests;
