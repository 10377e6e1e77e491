//! Cage deformation: the editable cage and its Green-coordinate coefficients.

pub(crate) mod coef;
pub(crate) mod config;
