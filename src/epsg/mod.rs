//! EPSG registry resolution
//!
//! Turns numeric EPSG codes into definitions by joining the registry
//! tables, with the WKT dictionary and the Proj4 init file as fallbacks.

pub mod codes;
pub mod units;
mod resolver;
#[cfg(test)]
mod tests;

pub use resolver::{resolve, towgs84_for_datum};
