use crate::foundation::core::{ALPHA, Pixel};
use crate::kernels::normal::PixelLaw;
use crate::kernels::{CompositeLaw, KernelParams, for_each_pixel};

fn mix(from: &Pixel, to: &Pixel, ratio: f32, alpha: f32) -> Pixel {
    [
        from[0] + (to[0] - from[0]) * ratio,
        from[1] + (to[1] - from[1]) * ratio,
        from[2] + (to[2] - from[2]) * ratio,
        alpha,
    ]
}

pub(crate) fn union(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let layer_alpha = s[ALPHA] * v;
    let in_alpha = b[ALPHA].min(1.0 - layer_alpha);
    let new_alpha = in_alpha + layer_alpha;
    if layer_alpha == 0.0 || new_alpha == 0.0 {
        return [b[0], b[1], b[2], new_alpha];
    }
    mix(b, s, layer_alpha / new_alpha, new_alpha)
}

pub(crate) fn clip_to_backdrop(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v - (1.0 - in_alpha);
    if layer_alpha > 0.0 {
        mix(b, s, layer_alpha / in_alpha, in_alpha)
    } else {
        *b
    }
}

pub(crate) fn clip_to_layer(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let layer_alpha = s[ALPHA] * v;
    if layer_alpha == 0.0 {
        return [b[0], b[1], b[2], 0.0];
    }
    let in_alpha = b[ALPHA] - (1.0 - layer_alpha);
    if in_alpha > 0.0 {
        mix(s, b, in_alpha / layer_alpha, layer_alpha)
    } else {
        [s[0], s[1], s[2], layer_alpha]
    }
}

/// Coverage both inputs share after merging; color weighted by the two coverages.
pub(crate) fn intersection(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let new_alpha = (in_alpha + layer_alpha - 1.0).max(0.0);
    if layer_alpha == 0.0 || new_alpha == 0.0 {
        return [b[0], b[1], b[2], new_alpha];
    }
    mix(b, s, layer_alpha / (in_alpha + layer_alpha), new_alpha)
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
#[path = "../../tests/unit/kernels/merge.rs"]
mod tests;
