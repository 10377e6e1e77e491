//! Conversions between the linear, perceptual and CIE LAB color spaces, plus the
//! HSV/HSL models used by the component blend functions.

pub(crate) mod convert;
