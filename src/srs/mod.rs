//! Spatial reference definitions
//!
//! This module holds the [`SpatialReference`] facade together with its
//! error type, the supported projection methods and the unit
//! normalization factors.

pub mod errors;
pub mod constants;
pub mod projection;
pub mod norm;
pub(crate) mod well_known;
mod spatial_reference;
mod setters;
#[cfg(test)]
mod tests;

pub use errors::{SrsError, SrsResult};
pub use norm::NormInfo;
pub use projection::{is_angular_parameter, is_linear_parameter, Projection, ProjectionKind};
pub use spatial_reference::{GeogCsDef, SpatialReference};
pub(crate) use spatial_reference::read_definition_file;
pub use well_known::WELL_KNOWN_NAMES;
