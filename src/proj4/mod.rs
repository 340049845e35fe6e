//! Proj4 string codec
//!
//! Decodes `+proj=... +ellps=...` strings into definitions and encodes
//! definitions back, with named ellipsoid, datum, meridian and unit tables.

pub mod tables;
pub mod dms;
mod decoder;
mod encoder;
#[cfg(test)]
mod tests;

pub use decoder::{decode, decode_params, Proj4Params};
pub use encoder::encode;
