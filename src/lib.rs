pub mod wkt;
pub mod registry;
pub mod srs;
pub mod epsg;
pub mod proj4;
pub mod esri;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{CrsKit, InputFormat, OutputFormat};

pub use srs::{Projection, ProjectionKind, SpatialReference, SrsError, SrsResult};
pub use wkt::WktNode;
pub use registry::Registry;
