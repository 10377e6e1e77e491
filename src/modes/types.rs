use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Every layer mode the engine knows about.
///
/// Discriminants are stable ordinals: they index the mode registry and are what
/// persisted documents store. Serialized names are kebab-case (`"normal-legacy"`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[repr(i32)]
#[allow(missing_docs)]
pub enum LayerMode {
    NormalLegacy = 0,
    Dissolve = 1,
    BehindLegacy = 2,
    MultiplyLegacy = 3,
    ScreenLegacy = 4,
    OverlayLegacy = 5,
    DifferenceLegacy = 6,
    AdditionLegacy = 7,
    SubtractLegacy = 8,
    DarkenOnlyLegacy = 9,
    LightenOnlyLegacy = 10,
    HsvHueLegacy = 11,
    HsvSaturationLegacy = 12,
    HslColorLegacy = 13,
    HsvValueLegacy = 14,
    DivideLegacy = 15,
    DodgeLegacy = 16,
    BurnLegacy = 17,
    HardlightLegacy = 18,
    SoftlightLegacy = 19,
    GrainExtractLegacy = 20,
    GrainMergeLegacy = 21,
    ColorEraseLegacy = 22,
    Overlay = 23,
    LchHue = 24,
    LchChroma = 25,
    LchColor = 26,
    LchLightness = 27,
    Normal = 28,
    Behind = 29,
    Multiply = 30,
    Screen = 31,
    Difference = 32,
    Addition = 33,
    Subtract = 34,
    DarkenOnly = 35,
    LightenOnly = 36,
    HsvHue = 37,
    HsvSaturation = 38,
    HslColor = 39,
    HsvValue = 40,
    Divide = 41,
    Dodge = 42,
    Burn = 43,
    Hardlight = 44,
    Softlight = 45,
    GrainExtract = 46,
    GrainMerge = 47,
    VividLight = 48,
    PinLight = 49,
    LinearLight = 50,
    HardMix = 51,
    Exclusion = 52,
    LinearBurn = 53,
    LumaDarkenOnly = 54,
    LumaLightenOnly = 55,
    Luminance = 56,
    ColorErase = 57,
    Erase = 58,
    Merge = 59,
    Split = 60,
    PassThrough = 61,
    Replace = 62,
    AntiErase = 63,
}

impl LayerMode {
    /// All modes in ordinal order.
    pub const ALL: [LayerMode; 64] = [
        LayerMode::NormalLegacy,
        LayerMode::Dissolve,
        LayerMode::BehindLegacy,
        LayerMode::MultiplyLegacy,
        LayerMode::ScreenLegacy,
        LayerMode::OverlayLegacy,
        LayerMode::DifferenceLegacy,
        LayerMode::AdditionLegacy,
        LayerMode::SubtractLegacy,
        LayerMode::DarkenOnlyLegacy,
        LayerMode::LightenOnlyLegacy,
        LayerMode::HsvHueLegacy,
        LayerMode::HsvSaturationLegacy,
        LayerMode::HslColorLegacy,
        LayerMode::HsvValueLegacy,
        LayerMode::DivideLegacy,
        LayerMode::DodgeLegacy,
        LayerMode::BurnLegacy,
        LayerMode::HardlightLegacy,
        LayerMode::SoftlightLegacy,
        LayerMode::GrainExtractLegacy,
        LayerMode::GrainMergeLegacy,
        LayerMode::ColorEraseLegacy,
        LayerMode::Overlay,
        LayerMode::LchHue,
        LayerMode::LchChroma,
        LayerMode::LchColor,
        LayerMode::LchLightness,
        LayerMode::Normal,
        LayerMode::Behind,
        LayerMode::Multiply,
        LayerMode::Screen,
        LayerMode::Difference,
        LayerMode::Addition,
        LayerMode::Subtract,
        LayerMode::DarkenOnly,
        LayerMode::LightenOnly,
        LayerMode::HsvHue,
        LayerMode::HsvSaturation,
        LayerMode::HslColor,
        LayerMode::HsvValue,
        LayerMode::Divide,
        LayerMode::Dodge,
        LayerMode::Burn,
        LayerMode::Hardlight,
        LayerMode::Softlight,
        LayerMode::GrainExtract,
        LayerMode::GrainMerge,
        LayerMode::VividLight,
        LayerMode::PinLight,
        LayerMode::LinearLight,
        LayerMode::HardMix,
        LayerMode::Exclusion,
        LayerMode::LinearBurn,
        LayerMode::LumaDarkenOnly,
        LayerMode::LumaLightenOnly,
        LayerMode::Luminance,
        LayerMode::ColorErase,
        LayerMode::Erase,
        LayerMode::Merge,
        LayerMode::Split,
        LayerMode::PassThrough,
        LayerMode::Replace,
        LayerMode::AntiErase,
    ];

    /// Stable integer identifier of the mode.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Mode with the given ordinal, `None` when out of range.
    pub fn from_ordinal(ordinal: i32) -> Option<LayerMode> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for LayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(u8);

        impl $name {
            /// The empty set.
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Raw bit representation.
            pub const fn bits(self) -> u8 {
                self.0
            }

            /// `true` when every bit of `other` is set in `self`.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// `true` when `self` and `other` share at least one bit.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            /// `true` when no bit is set.
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Bitwise union usable in constant tables.
            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// `self` with the bits of `other` cleared.
            pub const fn difference(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                self.union(rhs)
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };
}

flag_set!(
    /// Capability flags attached to each registry entry.
    LayerModeFlags
);

impl LayerModeFlags {
    /// Pre-2.10 mode with clamped 8-bit-era arithmetic.
    pub const LEGACY: Self = Self(1 << 0);
    /// Blend space cannot be overridden.
    pub const BLEND_SPACE_IMMUTABLE: Self = Self(1 << 1);
    /// Composite space cannot be overridden.
    pub const COMPOSITE_SPACE_IMMUTABLE: Self = Self(1 << 2);
    /// Composite mode cannot be overridden.
    pub const COMPOSITE_MODE_IMMUTABLE: Self = Self(1 << 3);
    /// The blend stage can remove content, so the subtractive compositing laws apply.
    pub const SUBTRACTIVE: Self = Self(1 << 4);
    /// Only the alpha channel of the output depends on the source.
    pub const ALPHA_ONLY: Self = Self(1 << 5);
    /// A fully transparent source leaves the backdrop unchanged without blending.
    pub const TRIVIAL: Self = Self(1 << 6);
}

flag_set!(
    /// Editing contexts in which a mode may be offered.
    LayerModeContext
);

impl LayerModeContext {
    /// Regular layers.
    pub const LAYER: Self = Self(1 << 0);
    /// Layer groups.
    pub const GROUP: Self = Self(1 << 1);
    /// Paint tools.
    pub const PAINT: Self = Self(1 << 2);
    /// Filters.
    pub const FILTER: Self = Self(1 << 3);
    /// Every context.
    pub const ALL: Self = Self(0b1111);
}

flag_set!(
    /// Which input extents contribute to the composited result.
    ///
    /// The empty set is the intersection region: only pixels covered by both inputs.
    CompositeRegion
);

impl CompositeRegion {
    /// Only where both inputs overlap.
    pub const INTERSECTION: Self = Self(0);
    /// The backdrop extent.
    pub const DESTINATION: Self = Self(1 << 0);
    /// The source extent.
    pub const SOURCE: Self = Self(1 << 1);
    /// Both extents.
    pub const UNION: Self = Self(0b11);
}

impl Not for CompositeRegion {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::UNION.0)
    }
}

/// How the source's coverage combines with the backdrop's coverage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    /// Use the mode's default.
    #[default]
    Auto,
    /// Source over backdrop: result covers both.
    Union,
    /// Result covers only the backdrop.
    ClipToBackdrop,
    /// Result covers only the source.
    ClipToLayer,
    /// Result covers only where both are present.
    Intersection,
}

/// Color space a blend or composite stage operates in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    /// Use the mode's default (blend: same as composite space; composite: agnostic).
    #[default]
    Auto,
    /// Linear-light RGB.
    RgbLinear,
    /// sRGB-encoded RGB.
    RgbPerceptual,
    /// CIE L*a*b*.
    Lab,
}

/// Concrete four-channel float pixel format a kernel consumes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PixelFormat {
    /// Linear-light RGBA.
    #[default]
    RgbaLinear,
    /// sRGB-encoded RGBA.
    RgbaPerceptual,
    /// CIE L*a*b* plus alpha.
    LabAlpha,
}

impl PixelFormat {
    /// `true` for the two RGBA variants.
    pub fn is_rgba(self) -> bool {
        matches!(self, PixelFormat::RgbaLinear | PixelFormat::RgbaPerceptual)
    }

    /// The color space the format's color channels are expressed in.
    pub fn color_space(self) -> ColorSpace {
        match self {
            PixelFormat::RgbaLinear => ColorSpace::RgbLinear,
            PixelFormat::RgbaPerceptual => ColorSpace::RgbPerceptual,
            PixelFormat::LabAlpha => ColorSpace::Lab,
        }
    }
}

impl ColorSpace {
    /// Pixel format for a concrete space; `None` for [`ColorSpace::Auto`].
    pub fn format(self) -> Option<PixelFormat> {
        match self {
            ColorSpace::Auto => None,
            ColorSpace::RgbLinear => Some(PixelFormat::RgbaLinear),
            ColorSpace::RgbPerceptual => Some(PixelFormat::RgbaPerceptual),
            ColorSpace::Lab => Some(PixelFormat::LabAlpha),
        }
    }
}

/// The two families of modes offered to users.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LayerModeGroup {
    /// Current modes.
    #[default]
    Default,
    /// Pre-2.10 modes kept for old documents.
    Legacy,
}

#[cfg(test)]
#[path = "../../tests/unit/modes/types.rs"]
mod tests;
