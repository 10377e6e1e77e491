//! Static description of every layer mode.
//!
//! The table is indexed by ordinal and never mutated. All per-mode questions the rest
//! of the engine asks (which kernel, which spaces, may the user override them) are
//! answered from here.

use crate::blend::functions::{self as f, BlendFunction};
use crate::blend::legacy as l;
use crate::foundation::error::{LayerModeError, LayerModeResult};
use crate::kernels::Kernel;
use crate::modes::types::{
    ColorSpace, CompositeMode, LayerMode, LayerModeContext, LayerModeFlags,
};

/// Registry entry for one mode.
#[derive(Clone, Copy, Debug)]
pub struct LayerModeInfo {
    /// The mode this entry describes; equals the table position.
    pub mode: LayerMode,
    /// Kernel that processes pixels for this mode.
    pub kernel: Kernel,
    /// Blend function driven by the generic and legacy kernels.
    pub blend: Option<BlendFunction>,
    /// Capability flags.
    pub flags: LayerModeFlags,
    /// Contexts in which the mode is offered.
    pub context: LayerModeContext,
    /// Default composite mode when painting.
    pub paint_composite_mode: CompositeMode,
    /// Default composite mode for layers.
    pub composite_mode: CompositeMode,
    /// Default composite space; `Auto` means the mode is agnostic.
    pub composite_space: ColorSpace,
    /// Default blend space; `Auto` means "same as the composite space".
    pub blend_space: ColorSpace,
}

const LEGACY: LayerModeFlags = LayerModeFlags::LEGACY
    .union(LayerModeFlags::BLEND_SPACE_IMMUTABLE)
    .union(LayerModeFlags::COMPOSITE_SPACE_IMMUTABLE)
    .union(LayerModeFlags::COMPOSITE_MODE_IMMUTABLE);
const BLEND_IMMUTABLE: LayerModeFlags = LayerModeFlags::BLEND_SPACE_IMMUTABLE;
const NONE: LayerModeFlags = LayerModeFlags::empty();

const ALL: LayerModeContext = LayerModeContext::ALL;
const FADE: LayerModeContext = LayerModeContext::PAINT.union(LayerModeContext::FILTER);

use ColorSpace::{Auto as AutoSpace, Lab, RgbLinear as Linear, RgbPerceptual as Perceptual};
use CompositeMode::{ClipToBackdrop, Union};

#[allow(clippy::too_many_arguments)]
const fn entry(
    mode: LayerMode,
    kernel: Kernel,
    blend: Option<BlendFunction>,
    flags: LayerModeFlags,
    context: LayerModeContext,
    paint_composite_mode: CompositeMode,
    composite_mode: CompositeMode,
    composite_space: ColorSpace,
    blend_space: ColorSpace,
) -> LayerModeInfo {
    LayerModeInfo {
        mode,
        kernel,
        blend,
        flags,
        context,
        paint_composite_mode,
        composite_mode,
        composite_space,
        blend_space,
    }
}

const fn legacy(mode: LayerMode, blend: BlendFunction) -> LayerModeInfo {
    entry(
        mode,
        Kernel::Legacy,
        Some(blend),
        LEGACY,
        ALL,
        Union,
        ClipToBackdrop,
        Perceptual,
        Perceptual,
    )
}

const fn generic(mode: LayerMode, blend: BlendFunction, blend_space: ColorSpace) -> LayerModeInfo {
    entry(
        mode,
        Kernel::LayerMode,
        Some(blend),
        NONE,
        ALL,
        Union,
        ClipToBackdrop,
        Linear,
        blend_space,
    )
}

const fn pinned(mut info: LayerModeInfo) -> LayerModeInfo {
    info.flags = info.flags.union(BLEND_IMMUTABLE);
    info
}

/// The mode registry, indexed by ordinal.
pub static LAYER_MODE_INFOS: [LayerModeInfo; 64] = [
    entry(
        LayerMode::NormalLegacy,
        Kernel::Normal,
        None,
        LEGACY.union(LayerModeFlags::TRIVIAL),
        ALL,
        Union,
        Union,
        Perceptual,
        Perceptual,
    ),
    entry(
        LayerMode::Dissolve,
        Kernel::Dissolve,
        None,
        BLEND_IMMUTABLE
            .union(LayerModeFlags::COMPOSITE_SPACE_IMMUTABLE)
            .union(LayerModeFlags::COMPOSITE_MODE_IMMUTABLE)
            .union(LayerModeFlags::TRIVIAL),
        ALL,
        Union,
        Union,
        AutoSpace,
        AutoSpace,
    ),
    entry(
        LayerMode::BehindLegacy,
        Kernel::Behind,
        None,
        LEGACY,
        FADE,
        Union,
        Union,
        Perceptual,
        Perceptual,
    ),
    legacy(LayerMode::MultiplyLegacy, l::multiply),
    legacy(LayerMode::ScreenLegacy, l::screen),
    legacy(LayerMode::OverlayLegacy, l::softlight),
    legacy(LayerMode::DifferenceLegacy, l::difference),
    legacy(LayerMode::AdditionLegacy, l::addition),
    legacy(LayerMode::SubtractLegacy, l::subtract),
    legacy(LayerMode::DarkenOnlyLegacy, l::darken_only),
    legacy(LayerMode::LightenOnlyLegacy, l::lighten_only),
    legacy(LayerMode::HsvHueLegacy, l::hsv_hue),
    legacy(LayerMode::HsvSaturationLegacy, l::hsv_saturation),
    legacy(LayerMode::HslColorLegacy, l::hsl_color),
    legacy(LayerMode::HsvValueLegacy, l::hsv_value),
    legacy(LayerMode::DivideLegacy, l::divide),
    legacy(LayerMode::DodgeLegacy, l::dodge),
    legacy(LayerMode::BurnLegacy, l::burn),
    legacy(LayerMode::HardlightLegacy, l::hardlight),
    legacy(LayerMode::SoftlightLegacy, l::softlight),
    legacy(LayerMode::GrainExtractLegacy, l::grain_extract),
    legacy(LayerMode::GrainMergeLegacy, l::grain_merge),
    entry(
        LayerMode::ColorEraseLegacy,
        Kernel::LayerMode,
        Some(f::color_erase),
        LEGACY.union(LayerModeFlags::SUBTRACTIVE),
        FADE,
        Union,
        Union,
        Perceptual,
        Perceptual,
    ),
    generic(LayerMode::Overlay, f::overlay, Perceptual),
    pinned(generic(LayerMode::LchHue, f::lch_hue, Lab)),
    pinned(generic(LayerMode::LchChroma, f::lch_chroma, Lab)),
    pinned(generic(LayerMode::LchColor, f::lch_color, Lab)),
    pinned(generic(LayerMode::LchLightness, f::lch_lightness, Lab)),
    entry(
        LayerMode::Normal,
        Kernel::Normal,
        None,
        BLEND_IMMUTABLE.union(LayerModeFlags::TRIVIAL),
        ALL,
        Union,
        Union,
        Linear,
        AutoSpace,
    ),
    entry(
        LayerMode::Behind,
        Kernel::Behind,
        None,
        BLEND_IMMUTABLE,
        FADE,
        Union,
        Union,
        Linear,
        AutoSpace,
    ),
    generic(LayerMode::Multiply, f::multiply, Linear),
    generic(LayerMode::Screen, f::screen, Perceptual),
    generic(LayerMode::Difference, f::difference, Perceptual),
    generic(LayerMode::Addition, f::addition, Linear),
    generic(LayerMode::Subtract, f::subtract, Linear),
    pinned(generic(LayerMode::DarkenOnly, f::darken_only, AutoSpace)),
    pinned(generic(LayerMode::LightenOnly, f::lighten_only, AutoSpace)),
    pinned(generic(LayerMode::HsvHue, f::hsv_hue, Perceptual)),
    pinned(generic(LayerMode::HsvSaturation, f::hsv_saturation, Perceptual)),
    pinned(generic(LayerMode::HslColor, f::hsl_color, Perceptual)),
    pinned(generic(LayerMode::HsvValue, f::hsv_value, Perceptual)),
    generic(LayerMode::Divide, f::divide, Linear),
    generic(LayerMode::Dodge, f::dodge, Perceptual),
    generic(LayerMode::Burn, f::burn, Perceptual),
    generic(LayerMode::Hardlight, f::hardlight, Perceptual),
    generic(LayerMode::Softlight, f::softlight, Perceptual),
    generic(LayerMode::GrainExtract, f::grain_extract, Perceptual),
    generic(LayerMode::GrainMerge, f::grain_merge, Perceptual),
    generic(LayerMode::VividLight, f::vivid_light, Perceptual),
    generic(LayerMode::PinLight, f::pin_light, Perceptual),
    generic(LayerMode::LinearLight, f::linear_light, Perceptual),
    generic(LayerMode::HardMix, f::hard_mix, Perceptual),
    generic(LayerMode::Exclusion, f::exclusion, Perceptual),
    generic(LayerMode::LinearBurn, f::linear_burn, Perceptual),
    generic(LayerMode::LumaDarkenOnly, f::luma_darken_only, Perceptual),
    generic(LayerMode::LumaLightenOnly, f::luma_lighten_only, Perceptual),
    pinned(generic(LayerMode::Luminance, f::luminance, Linear)),
    entry(
        LayerMode::ColorErase,
        Kernel::LayerMode,
        Some(f::color_erase),
        LayerModeFlags::SUBTRACTIVE,
        FADE,
        Union,
        Union,
        Linear,
        Perceptual,
    ),
    entry(
        LayerMode::Erase,
        Kernel::Erase,
        None,
        BLEND_IMMUTABLE
            .union(LayerModeFlags::SUBTRACTIVE)
            .union(LayerModeFlags::ALPHA_ONLY)
            .union(LayerModeFlags::TRIVIAL),
        FADE,
        ClipToBackdrop,
        ClipToBackdrop,
        Linear,
        AutoSpace,
    ),
    entry(
        LayerMode::Merge,
        Kernel::Merge,
        None,
        BLEND_IMMUTABLE.union(LayerModeFlags::TRIVIAL),
        FADE,
        Union,
        Union,
        Linear,
        AutoSpace,
    ),
    entry(
        LayerMode::Split,
        Kernel::Split,
        None,
        BLEND_IMMUTABLE
            .union(LayerModeFlags::SUBTRACTIVE)
            .union(LayerModeFlags::ALPHA_ONLY),
        FADE,
        ClipToBackdrop,
        ClipToBackdrop,
        Linear,
        AutoSpace,
    ),
    entry(
        LayerMode::PassThrough,
        Kernel::Replace,
        None,
        BLEND_IMMUTABLE.union(LayerModeFlags::TRIVIAL),
        LayerModeContext::GROUP,
        Union,
        Union,
        AutoSpace,
        AutoSpace,
    ),
    entry(
        LayerMode::Replace,
        Kernel::Replace,
        None,
        BLEND_IMMUTABLE.union(LayerModeFlags::TRIVIAL),
        FADE,
        Union,
        Union,
        Linear,
        AutoSpace,
    ),
    entry(
        LayerMode::AntiErase,
        Kernel::AntiErase,
        None,
        BLEND_IMMUTABLE
            .union(LayerModeFlags::COMPOSITE_SPACE_IMMUTABLE)
            .union(LayerModeFlags::ALPHA_ONLY),
        FADE,
        Union,
        Union,
        AutoSpace,
        AutoSpace,
    ),
];

/// Registry entry of `mode`.
pub fn layer_mode_info(mode: LayerMode) -> &'static LayerModeInfo {
    &LAYER_MODE_INFOS[mode as usize]
}

/// Registry entry for a raw ordinal.
///
/// Unknown ordinals degrade to the first entry (`NormalLegacy`) instead of failing, so
/// documents written by newer versions still open.
pub fn layer_mode_info_for_ordinal(ordinal: i32) -> &'static LayerModeInfo {
    match LayerMode::from_ordinal(ordinal) {
        Some(mode) => layer_mode_info(mode),
        None => {
            tracing::warn!(ordinal, "unknown layer mode ordinal, using normal-legacy");
            &LAYER_MODE_INFOS[0]
        }
    }
}

/// Check that every table position holds the entry of the matching ordinal.
pub fn validate_registry() -> LayerModeResult<()> {
    for (i, info) in LAYER_MODE_INFOS.iter().enumerate() {
        if info.mode.ordinal() as usize != i {
            return Err(LayerModeError::validation(format!(
                "layer mode table entry {i} describes {:?} (ordinal {})",
                info.mode,
                info.mode.ordinal()
            )));
        }
        let needs_blend = matches!(info.kernel, Kernel::LayerMode | Kernel::Legacy);
        if needs_blend != info.blend.is_some() {
            return Err(LayerModeError::validation(format!(
                "layer mode {:?} kernel {:?} disagrees with its blend function",
                info.mode, info.kernel
            )));
        }
        if info.composite_mode == CompositeMode::Auto
            || info.paint_composite_mode == CompositeMode::Auto
        {
            return Err(LayerModeError::validation(format!(
                "layer mode {:?} has no concrete default composite mode",
                info.mode
            )));
        }
    }
    Ok(())
}

impl LayerMode {
    fn info(self) -> &'static LayerModeInfo {
        layer_mode_info(self)
    }

    fn has(self, flag: LayerModeFlags) -> bool {
        self.info().flags.contains(flag)
    }

    /// `true` for the pre-2.10 modes.
    pub fn is_legacy(self) -> bool {
        self.has(LayerModeFlags::LEGACY)
    }

    /// `true` when the blend space may be overridden.
    pub fn is_blend_space_mutable(self) -> bool {
        !self.has(LayerModeFlags::BLEND_SPACE_IMMUTABLE)
    }

    /// `true` when the composite space may be overridden.
    pub fn is_composite_space_mutable(self) -> bool {
        !self.has(LayerModeFlags::COMPOSITE_SPACE_IMMUTABLE)
    }

    /// `true` when the composite mode may be overridden.
    pub fn is_composite_mode_mutable(self) -> bool {
        !self.has(LayerModeFlags::COMPOSITE_MODE_IMMUTABLE)
    }

    /// `true` when blending can remove backdrop content.
    pub fn is_subtractive(self) -> bool {
        self.has(LayerModeFlags::SUBTRACTIVE)
    }

    /// `true` when only output alpha depends on the source.
    pub fn is_alpha_only(self) -> bool {
        self.has(LayerModeFlags::ALPHA_ONLY)
    }

    /// `true` when a transparent source leaves the backdrop untouched without blending.
    pub fn is_trivial(self) -> bool {
        self.has(LayerModeFlags::TRIVIAL)
    }

    /// Default blend space; `Auto` entries report the composite space.
    pub fn blend_space(self) -> ColorSpace {
        match self.info().blend_space {
            ColorSpace::Auto => self.composite_space(),
            space => space,
        }
    }

    /// Default composite space (`Auto` for space-agnostic modes).
    pub fn composite_space(self) -> ColorSpace {
        self.info().composite_space
    }

    /// Default composite mode.
    pub fn composite_mode(self) -> CompositeMode {
        self.info().composite_mode
    }

    /// Default composite mode when painting.
    pub fn paint_composite_mode(self) -> CompositeMode {
        self.info().paint_composite_mode
    }

    /// Contexts in which this mode is offered.
    pub fn context(self) -> LayerModeContext {
        self.info().context
    }

    /// Kernel that processes pixels for this mode.
    pub fn kernel(self) -> Kernel {
        self.info().kernel
    }

    /// Name of the processing operation (`"layer-mode"` for the generic kernel).
    pub fn operation_name(self) -> &'static str {
        self.kernel().name()
    }

    /// Blend function, for modes processed by the generic or legacy kernel.
    pub fn blend_function(self) -> Option<BlendFunction> {
        self.info().blend
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modes/registry.rs"]
mod tests;
