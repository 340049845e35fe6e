//! WKT tree model
//!
//! This module provides the labeled tree that every definition is stored
//! in, its text reader and writer, and the table-driven renaming primitive
//! used by the dialect and Proj4 converters.

mod node;
pub mod remap;
#[cfg(test)]
mod tests;

pub use self::node::{NodePath, WktNode};
pub use self::remap::{MatchMode, RemapDirection, RemapEntry, RemapTable};
