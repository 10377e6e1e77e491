//! A layer mode configured for repeated kernel calls.
//!
//! [`LayerModeOp`] resolves every `Auto` setting once, so per-call work is a span check
//! followed by either a shortcut or the mode's kernel.

use std::borrow::Cow;
use std::sync::Arc;

use crate::foundation::core::{CHANNELS, Roi};
use crate::foundation::error::LayerModeResult;
use crate::kernels::dissolve::DissolveSeedTable;
use crate::kernels::{Kernel, KernelParams, check_inputs, process_pixels};
use crate::modes::region::{bounding_box, included_region};
use crate::modes::registry::layer_mode_info;
use crate::modes::types::{ColorSpace, CompositeRegion, LayerMode, PixelFormat};
use crate::ops::settings::LayerModeSettings;

/// Validated, fully resolved layer-mode operation.
#[derive(Clone, Debug)]
pub struct LayerModeOp {
    settings: LayerModeSettings,
    params: KernelParams,
    region: CompositeRegion,
    format: PixelFormat,
    seeds: Option<Arc<DissolveSeedTable>>,
}

impl LayerModeOp {
    /// Build an operation whose inputs prefer linear RGBA.
    pub fn new(settings: LayerModeSettings) -> LayerModeResult<Self> {
        Self::with_preferred_format(settings, PixelFormat::RgbaLinear)
    }

    /// Build an operation; space-agnostic modes adopt `preferred` as their format.
    #[tracing::instrument]
    pub fn with_preferred_format(
        settings: LayerModeSettings,
        preferred: PixelFormat,
    ) -> LayerModeResult<Self> {
        settings.validate()?;

        let mode = settings.mode;
        let composite_mode = settings.composite_mode.resolve(mode);
        let format = mode.format(
            settings.blend_space,
            settings.composite_space,
            composite_mode,
            preferred,
        );
        let composite_space = format.color_space();
        let blend_space = match settings.blend_space {
            ColorSpace::Auto => match layer_mode_info(mode).blend_space {
                ColorSpace::Auto => composite_space,
                space => space,
            },
            space => space,
        };

        Ok(Self {
            settings,
            params: KernelParams {
                mode,
                blend_space,
                composite_space,
                composite_mode,
                opacity: settings.opacity,
            },
            region: included_region(mode, composite_mode),
            format,
            seeds: None,
        })
    }

    /// Use `seeds` instead of the process-wide dissolve seed table.
    pub fn with_seed_table(mut self, seeds: Arc<DissolveSeedTable>) -> Self {
        self.seeds = Some(seeds);
        self
    }

    /// Settings as given by the caller.
    pub fn settings(&self) -> &LayerModeSettings {
        &self.settings
    }

    /// Resolved kernel parameters.
    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    /// Mode being composited.
    pub fn mode(&self) -> LayerMode {
        self.params.mode
    }

    /// Kernel that processes pixels.
    pub fn kernel(&self) -> Kernel {
        self.params.mode.kernel()
    }

    /// Extents that contribute to the output.
    pub fn region(&self) -> CompositeRegion {
        self.region
    }

    /// Format backdrop, source and output spans are expected in.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    fn seeds(&self) -> &DissolveSeedTable {
        match &self.seeds {
            Some(seeds) => seeds,
            None => DissolveSeedTable::global(),
        }
    }

    /// Run the kernel unconditionally, writing `output`.
    pub fn process(
        &self,
        backdrop: &[f32],
        source: &[f32],
        mask: Option<&[f32]>,
        output: &mut [f32],
        roi: Roi,
    ) -> LayerModeResult<()> {
        process_pixels(&self.params, self.seeds(), backdrop, source, mask, output, roi)
    }

    /// Composite `source` onto `backdrop`, borrowing an input when it already is the result.
    ///
    /// The returned pixels always equal what [`LayerModeOp::process`] would write.
    pub fn composite<'a>(
        &self,
        backdrop: &'a [f32],
        source: &'a [f32],
        mask: Option<&[f32]>,
        roi: Roi,
    ) -> LayerModeResult<Cow<'a, [f32]>> {
        check_inputs(backdrop, source, mask, roi)?;

        if let Some(shortcut) = self.shortcut(backdrop, source, mask) {
            return Ok(shortcut);
        }

        let mut output = vec![0.0; roi.pixel_count() * CHANNELS];
        self.process(backdrop, source, mask, &mut output, roi)?;
        Ok(Cow::Owned(output))
    }

    fn shortcut<'a>(
        &self,
        backdrop: &'a [f32],
        source: &'a [f32],
        mask: Option<&[f32]>,
    ) -> Option<Cow<'a, [f32]>> {
        let mode = self.params.mode;
        let opacity = self.params.opacity;

        if opacity == 0.0
            && self.region.contains(CompositeRegion::DESTINATION)
            && !mode.is_subtractive()
        {
            tracing::debug!(%mode, "transparent source, passing backdrop through");
            return Some(Cow::Borrowed(backdrop));
        }

        if self.kernel() != Kernel::Replace {
            return None;
        }
        if opacity == 1.0 && mask.is_none() && self.region == CompositeRegion::SOURCE {
            tracing::debug!(%mode, "opaque replace clipped to layer, passing source through");
            return Some(Cow::Borrowed(source));
        }
        if self.region == CompositeRegion::UNION
            && std::ptr::eq(backdrop.as_ptr(), source.as_ptr())
            && backdrop.len() == source.len()
        {
            tracing::debug!(%mode, "replace of a buffer with itself, passing it through");
            return Some(Cow::Borrowed(backdrop));
        }
        None
    }

    /// Extent of the output given the input extents.
    ///
    /// A fully transparent operation contributes no source extent.
    pub fn bounding_box(&self, source: Roi, destination: Roi, mask: Option<Roi>) -> Roi {
        let region = if self.params.opacity == 0.0 {
            self.region.difference(CompositeRegion::SOURCE)
        } else {
            self.region
        };
        bounding_box(region, source, destination, mask)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/layer_mode_op.rs"]
mod tests;
