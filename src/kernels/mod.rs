//! Pixel kernels and their dispatch.
//!
//! Kernels run over flat interleaved `f32` spans: backdrop, source and output hold four
//! floats per pixel, the optional mask one float per pixel. They never allocate and
//! never fail on numeric input; the only error is a span whose length disagrees with
//! the region of interest.

pub(crate) mod anti_erase;
pub(crate) mod behind;
pub(crate) mod composite;
pub(crate) mod dissolve;
pub(crate) mod erase;
pub(crate) mod layer_mode;
pub(crate) mod merge;
pub(crate) mod normal;
pub(crate) mod replace;
pub(crate) mod split;

use crate::foundation::core::{CHANNELS, Pixel, Roi, load_pixel};
use crate::foundation::error::{LayerModeError, LayerModeResult};
use crate::modes::types::{ColorSpace, CompositeMode, LayerMode};

use dissolve::DissolveSeedTable;

/// Closed set of pixel kernels a mode can be processed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// Blend function followed by a compositing law.
    LayerMode,
    /// Legacy blend function with the legacy clip-to-backdrop law.
    Legacy,
    /// Source over backdrop.
    Normal,
    /// Backdrop over source.
    Behind,
    /// Source alpha removes backdrop coverage.
    Erase,
    /// Source alpha restores backdrop coverage.
    AntiErase,
    /// Coverage-preserving merge of both inputs.
    Merge,
    /// Coverage difference of both inputs.
    Split,
    /// Source replaces backdrop, opacity and mask weighting alpha.
    Replace,
    /// Row-seeded random selection between source and backdrop.
    Dissolve,
}

impl Kernel {
    /// Stable operation name.
    pub fn name(self) -> &'static str {
        match self {
            Kernel::LayerMode => "layer-mode",
            Kernel::Legacy => "layer-mode-legacy",
            Kernel::Normal => "normal",
            Kernel::Behind => "behind",
            Kernel::Erase => "erase",
            Kernel::AntiErase => "anti-erase",
            Kernel::Merge => "merge",
            Kernel::Split => "split",
            Kernel::Replace => "replace",
            Kernel::Dissolve => "dissolve",
        }
    }
}

/// Compositing law a kernel branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CompositeLaw {
    Union,
    ClipToBackdrop,
    ClipToLayer,
    Intersection,
}

/// Inputs of one kernel call.
///
/// An `Auto` composite mode stands for the mode's default. The spaces are `Auto` only
/// for modes whose kernels ignore them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KernelParams {
    /// Mode being composited.
    pub mode: LayerMode,
    /// Space the blend function runs in.
    pub blend_space: ColorSpace,
    /// Space of the backdrop, source and output spans.
    pub composite_space: ColorSpace,
    /// Compositing law.
    pub composite_mode: CompositeMode,
    /// Global opacity in `[0, 1]`.
    pub opacity: f32,
}

impl KernelParams {
    /// Parameters with every `Auto` replaced by the mode's defaults.
    pub fn resolved(mode: LayerMode, opacity: f32) -> Self {
        Self {
            mode,
            blend_space: mode.blend_space(),
            composite_space: mode.composite_space(),
            composite_mode: mode.composite_mode(),
            opacity,
        }
    }

    /// Composite mode with `Auto` replaced by the mode's default.
    pub fn resolved_composite_mode(&self) -> CompositeMode {
        self.composite_mode.resolve(self.mode)
    }

    pub(crate) fn law(&self) -> CompositeLaw {
        match self.resolved_composite_mode() {
            CompositeMode::ClipToBackdrop => CompositeLaw::ClipToBackdrop,
            CompositeMode::ClipToLayer => CompositeLaw::ClipToLayer,
            CompositeMode::Intersection => CompositeLaw::Intersection,
            // registry defaults are never `Auto`
            CompositeMode::Union | CompositeMode::Auto => CompositeLaw::Union,
        }
    }
}

/// Check that input spans cover exactly `roi`.
pub(crate) fn check_inputs(
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    roi: Roi,
) -> LayerModeResult<()> {
    let n = roi.pixel_count();
    check_len("backdrop", backdrop.len(), n)?;
    check_len("source", source.len(), n)?;
    if let Some(mask) = mask
        && mask.len() != n
    {
        return Err(LayerModeError::buffer(format!(
            "mask span holds {} floats, expected {n}",
            mask.len()
        )));
    }
    Ok(())
}

fn check_len(name: &str, len: usize, pixels: usize) -> LayerModeResult<()> {
    let expected = pixels * CHANNELS;
    if len != expected {
        return Err(LayerModeError::buffer(format!(
            "{name} span holds {len} floats, expected {expected} for {pixels} pixels"
        )));
    }
    Ok(())
}

/// Run `f(backdrop, source, mask)` for every pixel, writing its result to `output`.
///
/// Spans must already have matching lengths.
#[inline]
pub(crate) fn for_each_pixel(
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
    mut f: impl FnMut(&Pixel, &Pixel, f32) -> Pixel,
) {
    let pixels = backdrop
        .chunks_exact(CHANNELS)
        .zip(source.chunks_exact(CHANNELS))
        .zip(output.chunks_exact_mut(CHANNELS));
    match mask {
        Some(mask) => {
            for (((b, s), o), m) in pixels.zip(mask.iter()) {
                o.copy_from_slice(&f(&load_pixel(b), &load_pixel(s), *m));
            }
        }
        None => {
            for ((b, s), o) in pixels {
                o.copy_from_slice(&f(&load_pixel(b), &load_pixel(s), 1.0));
            }
        }
    }
}

/// Composite `source` onto `backdrop` into `output` over `roi` with `params.mode`'s kernel.
///
/// `seeds` is only consulted by the dissolve kernel.
pub fn process_pixels(
    params: &KernelParams,
    seeds: &DissolveSeedTable,
    backdrop: &[f32],
    source: &[f32],
    mask: Option<&[f32]>,
    output: &mut [f32],
    roi: Roi,
) -> LayerModeResult<()> {
    check_inputs(backdrop, source, mask, roi)?;
    check_len("output", output.len(), roi.pixel_count())?;
    let params = &KernelParams {
        composite_mode: params.resolved_composite_mode(),
        ..*params
    };
    match params.mode.kernel() {
        Kernel::LayerMode => layer_mode::process(params, backdrop, source, mask, output),
        Kernel::Legacy => layer_mode::process_legacy(params, backdrop, source, mask, output),
        Kernel::Normal => normal::process(params, backdrop, source, mask, output),
        Kernel::Behind => behind::process(params, backdrop, source, mask, output),
        Kernel::Erase => erase::process(params, backdrop, source, mask, output),
        Kernel::AntiErase => anti_erase::process(params, backdrop, source, mask, output),
        Kernel::Merge => merge::process(params, backdrop, source, mask, output),
        Kernel::Split => split::process(params, backdrop, source, mask, output),
        Kernel::Replace => replace::process(params, backdrop, source, mask, output),
        Kernel::Dissolve => dissolve::process(params, seeds, backdrop, source, mask, output, roi),
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/mod.rs"]
mod tests;
