use crate::foundation::core::Roi;
use crate::modes::types::{CompositeMode, CompositeRegion, LayerMode};

impl CompositeMode {
    /// Replace `Auto` by `mode`'s default composite mode.
    pub fn resolve(self, mode: LayerMode) -> CompositeMode {
        match self {
            CompositeMode::Auto => mode.composite_mode(),
            other => other,
        }
    }
}

/// Which input extents contribute to the output of `mode` under `composite_mode`.
///
/// Intersection yields the empty region: neither extent is included on its own.
pub fn included_region(mode: LayerMode, composite_mode: CompositeMode) -> CompositeRegion {
    match composite_mode.resolve(mode) {
        CompositeMode::Union | CompositeMode::Auto => CompositeRegion::UNION,
        CompositeMode::ClipToBackdrop => CompositeRegion::DESTINATION,
        CompositeMode::ClipToLayer => CompositeRegion::SOURCE,
        CompositeMode::Intersection => CompositeRegion::INTERSECTION,
    }
}

/// Extent of the composited output.
///
/// The source extent is first restricted by the mask extent when one is given. The
/// overlap of source and destination is always included; each extent named by
/// `region` is then added in full.
pub fn bounding_box(
    region: CompositeRegion,
    source: Roi,
    destination: Roi,
    mask: Option<Roi>,
) -> Roi {
    let src = match mask {
        Some(mask) => source.intersect(mask),
        None => source,
    };
    let mut result = src.intersect(destination);
    if region.contains(CompositeRegion::SOURCE) {
        result = result.union(src);
    }
    if region.contains(CompositeRegion::DESTINATION) {
        result = result.union(destination);
    }
    result
}

#[cfg(test)]
#[path = "../../tests/unit/modes/region.rs"]
mod tests;
