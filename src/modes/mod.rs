//! Layer mode identities and their static metadata.
//!
//! The registry maps every mode to its flags, default spaces and kernel; the resolvers
//! derive the pixel format and contributing region for a concrete configuration.

pub(crate) mod format;
pub(crate) mod groups;
pub(crate) mod region;
pub(crate) mod registry;
pub(crate) mod types;
