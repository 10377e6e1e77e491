use crate::foundation::core::{ALPHA, Pixel};
use crate::kernels::normal::PixelLaw;
use crate::kernels::{CompositeLaw, KernelParams, for_each_pixel};

pub(crate) fn union(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    let out_alpha = in_alpha + layer_alpha - in_alpha * layer_alpha;
    if layer_alpha == 0.0 || out_alpha == 0.0 {
        return [b[0], b[1], b[2], out_alpha];
    }
    let in_weight = in_alpha / out_alpha;
    let layer_weight = 1.0 - in_weight;
    [
        b[0] * in_weight + s[0] * layer_weight,
        b[1] * in_weight + s[1] * layer_weight,
        b[2] * in_weight + s[2] * layer_weight,
        out_alpha,
    ]
}

pub(crate) fn clip_to_backdrop(b: &Pixel, _s: &Pixel, _v: f32) -> Pixel {
    *b
}

pub(crate) fn clip_to_layer(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let layer_alpha = s[ALPHA] * v;
    if layer_alpha == 0.0 {
        return [b[0], b[1], b[2], 0.0];
    }
    [
        b[0] * in_alpha + s[0] * (1.0 - in_alpha),
        b[1] * in_alpha + s[1] * (1.0 - in_alpha),
        b[2] * in_alpha + s[2] * (1.0 - in_alpha),
        layer_alpha,
    ]
}

pub(crate) fn intersection(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    [b[0], b[1], b[2], b[ALPHA] * s[ALPHA] * v]
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
#[path = "../../tests/unit/kernels/behind.rs"]
mod tests;
