//! Bezier strokes and their adaptive flattening.

pub(crate) mod bezier;
