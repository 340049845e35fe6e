//! Esri dialect translation
//!
//! Esri WKT shares the bracket grammar of OGC WKT but spells projections,
//! parameters, datums and units differently and carries no axis or
//! authority metadata. [`morph_to_esri`] and [`morph_from_esri`] rewrite a
//! tree in place between the two.

mod morph;
pub mod tables;
#[cfg(test)]
mod tests;

pub use morph::{morph_from_esri, morph_to_esri};
