//! The generic blend-then-composite kernel and the legacy kernel.

use crate::color::convert::convert_pixel;
use crate::foundation::core::{ALPHA, BLUE, GREEN, Pixel, RED};
use crate::kernels::KernelParams;
use crate::kernels::composite::composite_fn;
use crate::kernels::for_each_pixel;

/// Blend in the blend space, convert back, then apply the compositing law.
pub(crate) fn process(
    params: &KernelParams,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
) {
    let Some(blend) = params.mode.blend_function() else {
        output.copy_from_slice(backdrop);
        return;
    };
    let law = composite_fn(params.law(), params.mode.is_subtractive());
    let (blend_space, composite_space) = (params.blend_space, params.composite_space);
    let opacity = params.opacity;

    if blend_space == composite_space {
        for_each_pixel(backdrop, source, mask, output, |b, s, m| {
            law(b, s, &blend(b, s), opacity * m)
        });
    } else {
        for_each_pixel(backdrop, source, mask, output, |b, s, m| {
            let bb = convert_pixel(*b, composite_space, blend_space);
            let sb = convert_pixel(*s, composite_space, blend_space);
            let comp = convert_pixel(blend(&bb, &sb), blend_space, composite_space);
            law(b, s, &comp, opacity * m)
        });
    }
}

/// Legacy compositing: blended color weighted by the smaller of both alphas, backdrop
/// alpha kept.
pub(crate) fn legacy_pixel(b: &Pixel, comp: &Pixel, s_alpha: f32, v: f32) -> Pixel {
    let in_alpha = b[ALPHA];
    let comp_alpha = in_alpha.min(s_alpha) * v;
    let new_alpha = in_alpha + (1.0 - in_alpha) * comp_alpha;

    if comp_alpha == 0.0 || new_alpha == 0.0 {
        return *b;
    }
    let ratio = comp_alpha / new_alpha;
    [
        comp[RED] * ratio + b[RED] * (1.0 - ratio),
        comp[GREEN] * ratio + b[GREEN] * (1.0 - ratio),
        comp[BLUE] * ratio + b[BLUE] * (1.0 - ratio),
        in_alpha,
    ]
}

pub(crate) fn process_legacy(
    params: &KernelParams,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
) {
    let Some(blend) = params.mode.blend_function() else {
        output.copy_from_slice(backdrop);
        return;
    };
    let opacity = params.opacity;
    for_each_pixel(backdrop, source, mask, output, |b, s, m| {
        legacy_pixel(b, &blend(b, s), s[ALPHA], opacity * m)
    });
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/layer_mode.rs"]
mod tests;
