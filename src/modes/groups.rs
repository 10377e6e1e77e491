use crate::modes::types::{LayerMode, LayerModeContext, LayerModeGroup};

/// One slot of a group listing: a mode or a visual separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupEntry {
    /// A selectable mode.
    Mode(LayerMode),
    /// Divider between related modes.
    Separator,
}

use GroupEntry::{Mode as M, Separator as SEP};

static DEFAULT_GROUP: &[GroupEntry] = &[
    M(LayerMode::Normal),
    M(LayerMode::Replace),
    M(LayerMode::Dissolve),
    M(LayerMode::Behind),
    M(LayerMode::ColorErase),
    M(LayerMode::Erase),
    M(LayerMode::AntiErase),
    M(LayerMode::Merge),
    M(LayerMode::Split),
    M(LayerMode::PassThrough),
    SEP,
    M(LayerMode::LightenOnly),
    M(LayerMode::LumaLightenOnly),
    M(LayerMode::Screen),
    M(LayerMode::Dodge),
    M(LayerMode::Addition),
    SEP,
    M(LayerMode::DarkenOnly),
    M(LayerMode::LumaDarkenOnly),
    M(LayerMode::Multiply),
    M(LayerMode::Burn),
    M(LayerMode::LinearBurn),
    SEP,
    M(LayerMode::Overlay),
    M(LayerMode::Softlight),
    M(LayerMode::Hardlight),
    M(LayerMode::VividLight),
    M(LayerMode::PinLight),
    M(LayerMode::LinearLight),
    M(LayerMode::HardMix),
    SEP,
    M(LayerMode::Difference),
    M(LayerMode::Exclusion),
    M(LayerMode::Subtract),
    M(LayerMode::GrainExtract),
    M(LayerMode::GrainMerge),
    M(LayerMode::Divide),
    SEP,
    M(LayerMode::HsvHue),
    M(LayerMode::HsvSaturation),
    M(LayerMode::HslColor),
    M(LayerMode::HsvValue),
    SEP,
    M(LayerMode::LchHue),
    M(LayerMode::LchChroma),
    M(LayerMode::LchColor),
    M(LayerMode::LchLightness),
    M(LayerMode::Luminance),
];

static LEGACY_GROUP: &[GroupEntry] = &[
    M(LayerMode::NormalLegacy),
    M(LayerMode::Dissolve),
    M(LayerMode::BehindLegacy),
    M(LayerMode::ColorEraseLegacy),
    SEP,
    M(LayerMode::LightenOnlyLegacy),
    M(LayerMode::ScreenLegacy),
    M(LayerMode::DodgeLegacy),
    M(LayerMode::AdditionLegacy),
    SEP,
    M(LayerMode::DarkenOnlyLegacy),
    M(LayerMode::MultiplyLegacy),
    M(LayerMode::BurnLegacy),
    SEP,
    M(LayerMode::OverlayLegacy),
    M(LayerMode::SoftlightLegacy),
    M(LayerMode::HardlightLegacy),
    SEP,
    M(LayerMode::DifferenceLegacy),
    M(LayerMode::SubtractLegacy),
    M(LayerMode::GrainExtractLegacy),
    M(LayerMode::GrainMergeLegacy),
    M(LayerMode::DivideLegacy),
    SEP,
    M(LayerMode::HsvHueLegacy),
    M(LayerMode::HsvSaturationLegacy),
    M(LayerMode::HslColorLegacy),
    M(LayerMode::HsvValueLegacy),
];

/// `(default, legacy)` pairs; `None` marks a mode without a counterpart.
static GROUP_CORRESPONDENCE: &[(Option<LayerMode>, Option<LayerMode>)] = &[
    (Some(LayerMode::Normal), Some(LayerMode::NormalLegacy)),
    (Some(LayerMode::Dissolve), Some(LayerMode::Dissolve)),
    (Some(LayerMode::Behind), Some(LayerMode::BehindLegacy)),
    (Some(LayerMode::Multiply), Some(LayerMode::MultiplyLegacy)),
    (Some(LayerMode::Screen), Some(LayerMode::ScreenLegacy)),
    (Some(LayerMode::Overlay), None),
    (Some(LayerMode::Difference), Some(LayerMode::DifferenceLegacy)),
    (Some(LayerMode::Addition), Some(LayerMode::AdditionLegacy)),
    (Some(LayerMode::Subtract), Some(LayerMode::SubtractLegacy)),
    (Some(LayerMode::DarkenOnly), Some(LayerMode::DarkenOnlyLegacy)),
    (Some(LayerMode::LightenOnly), Some(LayerMode::LightenOnlyLegacy)),
    (Some(LayerMode::HsvHue), Some(LayerMode::HsvHueLegacy)),
    (Some(LayerMode::HsvSaturation), Some(LayerMode::HsvSaturationLegacy)),
    (Some(LayerMode::HslColor), Some(LayerMode::HslColorLegacy)),
    (Some(LayerMode::HsvValue), Some(LayerMode::HsvValueLegacy)),
    (Some(LayerMode::Divide), Some(LayerMode::DivideLegacy)),
    (Some(LayerMode::Dodge), Some(LayerMode::DodgeLegacy)),
    (Some(LayerMode::Burn), Some(LayerMode::BurnLegacy)),
    (Some(LayerMode::Hardlight), Some(LayerMode::HardlightLegacy)),
    (Some(LayerMode::Softlight), Some(LayerMode::SoftlightLegacy)),
    (Some(LayerMode::GrainExtract), Some(LayerMode::GrainExtractLegacy)),
    (Some(LayerMode::GrainMerge), Some(LayerMode::GrainMergeLegacy)),
    (Some(LayerMode::ColorErase), Some(LayerMode::ColorEraseLegacy)),
    (None, Some(LayerMode::OverlayLegacy)),
    (Some(LayerMode::VividLight), None),
    (Some(LayerMode::PinLight), None),
    (Some(LayerMode::LinearLight), None),
    (Some(LayerMode::HardMix), None),
    (Some(LayerMode::Exclusion), None),
    (Some(LayerMode::LinearBurn), None),
    (Some(LayerMode::LumaDarkenOnly), None),
    (Some(LayerMode::LumaLightenOnly), None),
    (Some(LayerMode::Luminance), None),
    (Some(LayerMode::LchHue), None),
    (Some(LayerMode::LchChroma), None),
    (Some(LayerMode::LchColor), None),
    (Some(LayerMode::LchLightness), None),
    (Some(LayerMode::Erase), None),
    (Some(LayerMode::Replace), None),
    (Some(LayerMode::AntiErase), None),
    (Some(LayerMode::Merge), None),
    (Some(LayerMode::Split), None),
    (Some(LayerMode::PassThrough), None),
];

/// Ordered listing of a group, separators included.
pub fn group_array(group: LayerModeGroup) -> &'static [GroupEntry] {
    match group {
        LayerModeGroup::Default => DEFAULT_GROUP,
        LayerModeGroup::Legacy => LEGACY_GROUP,
    }
}

fn in_group(group: LayerModeGroup, mode: LayerMode) -> bool {
    group_array(group).contains(&GroupEntry::Mode(mode))
}

impl LayerMode {
    /// Group the mode is listed in; modes listed in both report `Default`.
    pub fn group(self) -> LayerModeGroup {
        if in_group(LayerModeGroup::Default, self) {
            LayerModeGroup::Default
        } else if in_group(LayerModeGroup::Legacy, self) {
            LayerModeGroup::Legacy
        } else {
            LayerModeGroup::Default
        }
    }

    /// Equivalent mode in `group`, or `None` when there is no counterpart.
    pub fn for_group(self, group: LayerModeGroup) -> Option<LayerMode> {
        GROUP_CORRESPONDENCE
            .iter()
            .find(|(default, legacy)| *default == Some(self) || *legacy == Some(self))
            .and_then(|&(default, legacy)| match group {
                LayerModeGroup::Default => default,
                LayerModeGroup::Legacy => legacy,
            })
    }

    /// Modes of this mode's group that may be used in `context`, in listing order.
    pub fn context_modes(self, context: LayerModeContext) -> Vec<LayerMode> {
        group_array(self.group())
            .iter()
            .filter_map(|entry| match entry {
                GroupEntry::Mode(mode) if mode.context().intersects(context) => Some(*mode),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modes/groups.rs"]
mod tests;
