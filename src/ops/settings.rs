use serde::{Deserialize, Serialize};

use crate::foundation::error::{LayerModeError, LayerModeResult};
use crate::modes::types::{ColorSpace, CompositeMode, LayerMode};

/// User-facing configuration of one layer-mode operation.
///
/// `Auto` fields resolve to the mode's registry defaults when the operation is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayerModeSettings {
    /// Mode to composite with.
    #[serde(default = "default_mode")]
    pub mode: LayerMode,
    /// Space the blend function runs in.
    #[serde(default)]
    pub blend_space: ColorSpace,
    /// Space the inputs are composited in.
    #[serde(default)]
    pub composite_space: ColorSpace,
    /// Coverage law.
    #[serde(default)]
    pub composite_mode: CompositeMode,
    /// Global opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_mode() -> LayerMode {
    LayerMode::Normal
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for LayerModeSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            blend_space: ColorSpace::Auto,
            composite_space: ColorSpace::Auto,
            composite_mode: CompositeMode::Auto,
            opacity: default_opacity(),
        }
    }
}

impl LayerModeSettings {
    /// Settings for `mode` with every other field at its default.
    pub fn for_mode(mode: LayerMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Same settings with a different opacity.
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { opacity, ..self }
    }

    /// Same settings with a different composite mode.
    pub fn with_composite_mode(self, composite_mode: CompositeMode) -> Self {
        Self {
            composite_mode,
            ..self
        }
    }

    /// Reject opacities outside `[0, 1]` and overrides of fields the mode pins.
    ///
    /// An override equal to the mode's own default is accepted.
    pub fn validate(&self) -> LayerModeResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(LayerModeError::validation(format!(
                "opacity must be finite and within [0, 1], got {}",
                self.opacity
            )));
        }

        let mode = self.mode;
        if !mode.is_blend_space_mutable()
            && self.blend_space != ColorSpace::Auto
            && self.blend_space != mode.blend_space()
        {
            return Err(LayerModeError::validation(format!(
                "mode '{mode}' does not allow overriding the blend space"
            )));
        }
        if !mode.is_composite_space_mutable()
            && self.composite_space != ColorSpace::Auto
            && self.composite_space != mode.composite_space()
        {
            return Err(LayerModeError::validation(format!(
                "mode '{mode}' does not allow overriding the composite space"
            )));
        }
        if !mode.is_composite_mode_mutable()
            && self.composite_mode != CompositeMode::Auto
            && self.composite_mode != mode.composite_mode()
        {
            return Err(LayerModeError::validation(format!(
                "mode '{mode}' does not allow overriding the composite mode"
            )));
        }
        Ok(())
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> LayerModeResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> LayerModeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/settings.rs"]
mod tests;
