//! Per-pixel blend functions.
//!
//! Every function takes the backdrop and source colors in the blend space and returns
//! the blended color with the source alpha carried through.

/// Blend functions of the default (2.10+) modes.
pub mod functions;
/// Clamped blend functions of the legacy modes.
pub mod legacy;

pub use functions::BlendFunction;
