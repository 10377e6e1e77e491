//! Layermode is a layer-mode compositing engine for raster image editors.
//!
//! It combines a source layer with a backdrop under one of 64 layer modes. The public
//! surface is built around a configured operation:
//!
//! - Describe the mode with [`LayerModeSettings`]
//! - Resolve it into a [`LayerModeOp`] (blend space, composite space, pixel format)
//! - Process pixel spans directly, or a whole image with [`composite_image`]
//!
//! Besides compositing, the crate carries the geometry used by cage deformation
//! ([`CageConfig`], [`cage_coefficients`]) and adaptive bezier flattening
//! ([`BezierStroke`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cage;
mod color;
mod foundation;
mod kernels;
mod modes;
mod ops;
mod path;
mod render;

/// Per-pixel blend functions of the default and legacy mode families.
pub mod blend;

pub use crate::foundation::core::{
    ALPHA, BLUE, CHANNELS, CubicBez, GREEN, Pixel, Point, RED, Rect, Roi, TRANSPARENT, Vec2,
};
pub use crate::foundation::error::{LayerModeError, LayerModeResult};

pub use crate::color::convert::{
    LUMINANCE_WEIGHTS, convert_pixel, hsl_to_rgb, hsv_to_rgb, lab_to_rgb_linear,
    linear_to_perceptual, perceptual_to_linear, rgb_linear_to_lab, rgb_luminance, rgb_to_hsl,
    rgb_to_hsv,
};

pub use crate::modes::groups::{GroupEntry, group_array};
pub use crate::modes::region::{bounding_box, included_region};
pub use crate::modes::registry::{
    LAYER_MODE_INFOS, LayerModeInfo, layer_mode_info, layer_mode_info_for_ordinal,
    validate_registry,
};
pub use crate::modes::types::{
    ColorSpace, CompositeMode, CompositeRegion, LayerMode, LayerModeContext, LayerModeFlags,
    LayerModeGroup, PixelFormat,
};

pub use crate::kernels::dissolve::{
    DISSOLVE_SEED, DISSOLVE_TABLE_SIZE, DissolveSeedTable, RowRng,
};
pub use crate::kernels::{Kernel, KernelParams, process_pixels};

pub use crate::ops::layer_mode_op::LayerModeOp;
pub use crate::ops::settings::LayerModeSettings;
pub use crate::render::tiles::{TileThreading, composite_image};

pub use crate::cage::coef::{cage_coefficients, coefficient_buffer, deform_point};
pub use crate::cage::config::{CageConfig, CageMode, CagePoint};
pub use crate::path::bezier::{
    Anchor, AnchorKind, BezierStroke, MAX_SUBDIVISION_DEPTH, StrokeNearest, interpolate_bezier,
};
