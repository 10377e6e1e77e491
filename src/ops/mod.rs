//! Configured layer mode operation.

pub(crate) mod layer_mode_op;
pub(crate) mod settings;
