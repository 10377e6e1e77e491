use crate::modes::region::included_region;
use crate::modes::types::{ColorSpace, CompositeMode, CompositeRegion, LayerMode, PixelFormat};

impl LayerMode {
    /// Pixel format the kernel of this mode should receive its inputs in.
    ///
    /// `Auto` arguments resolve to the mode's defaults. Modes whose output does not
    /// depend on the composite space for the resolved region (alpha-only modes outside
    /// union, trivial modes that drop the destination) accept `preferred` as-is when it
    /// is an RGBA format, avoiding a conversion.
    ///
    /// The blend space never affects the format: blend-space conversions happen inside
    /// the kernel.
    pub fn format(
        self,
        _blend_space: ColorSpace,
        composite_space: ColorSpace,
        composite_mode: CompositeMode,
        preferred: PixelFormat,
    ) -> PixelFormat {
        let mut composite_space = match composite_space {
            ColorSpace::Auto => self.composite_space(),
            space => space,
        };
        let composite_mode = composite_mode.resolve(self);

        let region = included_region(self, composite_mode);
        if self.is_alpha_only() && region != CompositeRegion::UNION {
            composite_space = ColorSpace::Auto;
        } else if self.is_trivial() && !region.contains(CompositeRegion::DESTINATION) {
            composite_space = ColorSpace::Auto;
        }

        match composite_space.format() {
            Some(format) => format,
            None if preferred.is_rgba() => preferred,
            None => PixelFormat::RgbaLinear,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modes/format.rs"]
mod tests;
