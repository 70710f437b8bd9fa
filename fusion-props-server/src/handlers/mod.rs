//! Request handlers, one module per resource family.
//!
//! Every handler binds a [`fusion_props_core::FusionData`] to the token its
//! extractor produced and returns the operation result as JSON.

pub mod collections;
pub mod definitions;
pub mod ids;
pub mod properties;
pub mod thumbnails;
pub mod versions;
