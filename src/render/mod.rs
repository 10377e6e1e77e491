//! Row-band scheduling of an operation over a whole image.

pub(crate) mod tiles;
