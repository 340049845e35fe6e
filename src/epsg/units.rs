//! Unit of measure resolution
//!
//! Common codes are answered directly; anything else is looked up in
//! `unit_of_measure.csv`, where a unit converts to its base unit by
//! `FACTOR_B / FACTOR_C`.

use crate::registry::{files, CompareMode, Registry};
use crate::srs::constants::units;
use crate::utils::format_utils::atof;

pub const METRE: u32 = 9001;
pub const FOOT: u32 = 9002;
pub const US_SURVEY_FOOT: u32 = 9003;
pub const RADIAN: u32 = 9101;
pub const DEGREE: u32 = 9102;
pub const GRAD: u32 = 9105;
pub const ARC_DEGREE: u32 = 9108;
/// Sexagesimal DMS packed as DDD.MMSSsss
pub const PACKED_DMS: u32 = 9110;
pub const DEGREE_SUPPLIER: u32 = 9122;

/// Which family a unit code belongs to, by code range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Linear,
    Angular,
    Scale,
    Other,
}

impl UnitFamily {
    pub fn of(code: u32) -> UnitFamily {
        match code {
            9001..=9099 => UnitFamily::Linear,
            9101..=9199 => UnitFamily::Angular,
            9201..=9299 => UnitFamily::Scale,
            _ => UnitFamily::Other,
        }
    }
}

/// Name and meters-per-unit of a linear unit
pub fn linear_unit(registry: &Registry, code: u32) -> Option<(String, f64)> {
    match code {
        METRE => Some((units::METRE.to_string(), 1.0)),
        FOOT => Some((units::FOOT.to_string(), units::FOOT_CONV)),
        US_SURVEY_FOOT => Some((units::US_FOOT.to_string(), units::US_FOOT_CONV)),
        _ => lookup_factor(registry, code),
    }
}

/// Name and radians-per-unit of an angular unit
pub fn angular_unit(registry: &Registry, code: u32) -> Option<(String, f64)> {
    match code {
        DEGREE | ARC_DEGREE | PACKED_DMS | DEGREE_SUPPLIER => {
            Some((units::DEGREE.to_string(), units::DEGREE_CONV))
        },
        RADIAN => Some((units::RADIAN.to_string(), 1.0)),
        GRAD => Some((units::GRAD.to_string(), units::GRAD_CONV)),
        _ => lookup_factor(registry, code),
    }
}

fn lookup_factor(registry: &Registry, code: u32) -> Option<(String, f64)> {
    let table = registry.find_table(files::UNIT_OF_MEASURE)?;
    let row = table.scan("UOM_CODE", &code.to_string(), CompareMode::Integer)?;
    let name = table.field(&row, "UNIT_OF_MEAS_NAME").to_string();
    let b = atof(table.field(&row, "FACTOR_B"));
    let c = atof(table.field(&row, "FACTOR_C"));
    if b == 0.0 || c == 0.0 {
        return None;
    }
    Some((name, b / c))
}

/// Converts an angle written in unit `code` to degrees
pub fn angle_to_degrees(registry: &Registry, text: &str, code: u32) -> f64 {
    match code {
        PACKED_DMS => packed_dms_to_degrees(text),
        DEGREE | ARC_DEGREE | DEGREE_SUPPLIER => atof(text),
        _ => match angular_unit(registry, code) {
            Some((_, radians)) => atof(text) * radians / units::DEGREE_CONV,
            None => atof(text),
        },
    }
}

/// Converts a length written in unit `code` to meters
pub fn length_to_meters(registry: &Registry, text: &str, code: u32) -> f64 {
    let value = atof(text);
    match linear_unit(registry, code) {
        Some((_, factor)) => value * factor,
        None => value,
    }
}

/// Decodes `DDD.MMSSsss` (degrees, two digits of minutes, seconds with
/// the remaining digits after the second place being fractional)
pub fn packed_dms_to_degrees(text: &str) -> f64 {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.trim_start_matches('+')),
    };

    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    let degrees = atof(whole);

    let mut digits: String = fraction.chars().take_while(|c| c.is_ascii_digit()).collect();
    while digits.len() < 4 {
        digits.push('0');
    }
    let minutes = atof(&digits[..2]);
    let seconds = atof(&format!("{}.{}", &digits[2..4], &digits[4..]));

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_dms() {
        assert_eq!(packed_dms_to_degrees("46.3"), 46.5);
        assert_eq!(packed_dms_to_degrees("-74"), -74.0);
        assert!((packed_dms_to_degrees("-74.04513") - -74.08091666666667).abs() < 1e-12);
        assert!((packed_dms_to_degrees("30.1717303") - 30.28813972222222).abs() < 1e-12);
        assert!((packed_dms_to_degrees("4.2124983") - 4.356939722222222).abs() < 1e-12);
    }

    #[test]
    fn test_unit_families() {
        assert_eq!(UnitFamily::of(9001), UnitFamily::Linear);
        assert_eq!(UnitFamily::of(9110), UnitFamily::Angular);
        assert_eq!(UnitFamily::of(9201), UnitFamily::Scale);
        assert_eq!(UnitFamily::of(1024), UnitFamily::Other);
    }

    #[test]
    fn test_builtin_units_need_no_registry() {
        let registry = Registry::new("/nonexistent/registry");
        assert_eq!(linear_unit(&registry, US_SURVEY_FOOT).unwrap().1, units::US_FOOT_CONV);
        assert_eq!(angular_unit(&registry, PACKED_DMS).unwrap().0, "degree");
        assert!((angle_to_degrees(&registry, "100", GRAD) - 90.0).abs() < 1e-9);
        assert!(linear_unit(&registry, 9036).is_none());
    }
}
