use crate::foundation::core::{ALPHA, Pixel};
use crate::kernels::normal::PixelLaw;
use crate::kernels::{CompositeLaw, KernelParams, for_each_pixel};

fn with_alpha(b: &Pixel, alpha: f32) -> Pixel {
    [b[0], b[1], b[2], alpha]
}

pub(crate) fn union(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    with_alpha(b, b[ALPHA] + (1.0 - b[ALPHA]) * s[ALPHA] * v)
}

pub(crate) fn clip_to_backdrop(b: &Pixel, _s: &Pixel, _v: f32) -> Pixel {
    *b
}

pub(crate) fn clip_to_layer(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    with_alpha(b, s[ALPHA] * v)
}

pub(crate) fn intersection(b: &Pixel, s: &Pixel, v: f32) -> Pixel {
    with_alpha(b, b[ALPHA] * s[ALPHA] * v)
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
#[path = "../../tests/unit/kernels/anti_erase.rs"]
mod tests;
