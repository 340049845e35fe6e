//! Unit normalization factors
//!
//! Projection parameters are stored in the units of the definition they
//! belong to. Normalized access converts angles to degrees and distances
//! to meters with the factors held here.

use crate::srs::constants::units::DEGREE_CONV;

/// Angular factors closer than this to one degree are treated as exact
const DEGREE_SNAP_TOLERANCE: f64 = 1e-9;

/// Conversion factors derived from a definition's units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormInfo {
    /// Prime meridian offset from Greenwich, in the angular unit
    pub from_greenwich: f64,
    /// Meters per linear unit
    pub to_meter: f64,
    /// Degrees per angular unit
    pub to_degrees: f64,
}

impl NormInfo {
    /// Builds the factors from raw unit values.
    ///
    /// `radians_per_unit` is the angular unit's conversion to radians.
    pub fn from_units(from_greenwich: f64, to_meter: f64, radians_per_unit: f64) -> Self {
        let mut to_degrees = radians_per_unit / DEGREE_CONV;
        if (to_degrees - 1.0).abs() < DEGREE_SNAP_TOLERANCE {
            to_degrees = 1.0;
        }
        NormInfo {
            from_greenwich,
            to_meter,
            to_degrees,
        }
    }

    /// Converts a stored angular value to degrees
    pub fn angle_to_degrees(&self, value: f64) -> f64 {
        if self.to_degrees == 1.0 { value } else { value * self.to_degrees }
    }

    /// Converts degrees to the stored angular unit
    pub fn angle_from_degrees(&self, value: f64) -> f64 {
        if self.to_degrees == 1.0 { value } else { value / self.to_degrees }
    }

    /// Converts a stored linear value to meters
    pub fn length_to_meters(&self, value: f64) -> f64 {
        if self.to_meter == 1.0 { value } else { value * self.to_meter }
    }

    /// Converts meters to the stored linear unit
    pub fn length_from_meters(&self, value: f64) -> f64 {
        if self.to_meter == 1.0 { value } else { value / self.to_meter }
    }
}

impl Default for NormInfo {
    fn default() -> Self {
        NormInfo {
            from_greenwich: 0.0,
            to_meter: 1.0,
            to_degrees: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs::constants::units::GRAD_CONV;

    #[test]
    fn test_degree_factor_snaps_to_one() {
        let info = NormInfo::from_units(0.0, 1.0, 0.01745329251994328);
        assert_eq!(info.to_degrees, 1.0);
    }

    #[test]
    fn test_grad_conversion() {
        let info = NormInfo::from_units(0.0, 1.0, GRAD_CONV);
        assert!((info.angle_to_degrees(100.0) - 90.0).abs() < 1e-9);
        assert!((info.angle_from_degrees(90.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_feet() {
        let info = NormInfo::from_units(0.0, 0.3048, DEGREE_CONV);
        assert!((info.length_to_meters(1000.0) - 304.8).abs() < 1e-9);
    }
}
