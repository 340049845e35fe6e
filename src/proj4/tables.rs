//! Lookup tables for Proj4 names
//!
//! Ellipsoids, prime meridians, datums and linear units known by name in
//! Proj4 strings, with the values written into WKT trees for them.

use crate::srs::constants::units;

/// A named ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Identifier used by `+ellps=`
    pub id: &'static str,
    /// Name written in the `SPHEROID` node
    pub description: &'static str,
    pub semi_major: f64,
    /// Inverse flattening; 0 for a sphere
    pub inv_flattening: f64,
}

macro_rules! ellipsoids {
    ($( $id:literal, $desc:literal, $a:expr, $rf:expr; )+) => {
        &[ $( Ellipsoid { id: $id, description: $desc, semi_major: $a, inv_flattening: $rf } ),+ ]
    };
}

pub const ELLIPSOIDS: &[Ellipsoid] = ellipsoids! {
    "WGS84", "WGS 84", 6378137.0, 298.257223563;
    "GRS80", "GRS 1980", 6378137.0, 298.257222101;
    "WGS72", "WGS 72", 6378135.0, 298.26;
    "WGS66", "WGS 66", 6378145.0, 298.25;
    "WGS60", "WGS 60", 6378165.0, 298.3;
    "MERIT", "MERIT 1983", 6378137.0, 298.257;
    "SGS85", "Soviet Geodetic System 85", 6378136.0, 298.257;
    "IAU76", "IAU 1976", 6378140.0, 298.257;
    "GRS67", "GRS 1967", 6378160.0, 298.247167427;
    "aust_SA", "Australian National Spheroid", 6378160.0, 298.25;
    "airy", "Airy 1830", 6377563.396, 299.3249646;
    "mod_airy", "Airy Modified 1849", 6377340.189, 299.3249646;
    "bessel", "Bessel 1841", 6377397.155, 299.1528128;
    "bess_nam", "Bessel 1841 (Namibia)", 6377483.865, 299.1528128;
    "clrk66", "Clarke 1866", 6378206.4, 294.9786982138982;
    "clrk80", "Clarke 1880 mod.", 6378249.145, 293.4663;
    "clrk80ign", "Clarke 1880 (IGN)", 6378249.2, 293.4660212936269;
    "evrst30", "Everest 1830", 6377276.345, 300.8017;
    "helmert", "Helmert 1906", 6378200.0, 298.3;
    "intl", "International 1909 (Hayford)", 6378388.0, 297.0;
    "krass", "Krassowsky 1940", 6378245.0, 298.3;
    "sphere", "Normal Sphere (r=6370997)", 6370997.0, 0.0;
};

/// Finds an ellipsoid by its Proj4 identifier (case-insensitive)
pub fn ellipsoid_by_id(id: &str) -> Option<&'static Ellipsoid> {
    ELLIPSOIDS.iter().find(|e| e.id.eq_ignore_ascii_case(id))
}

/// Closest ellipsoid within 0.01 m on the semi-major axis and 0.0001 on
/// the inverse flattening
pub fn match_ellipsoid(semi_major: f64, inv_flattening: f64) -> Option<&'static Ellipsoid> {
    ELLIPSOIDS
        .iter()
        .filter(|e| (e.semi_major - semi_major).abs() <= 0.01)
        .filter(|e| (e.inv_flattening - inv_flattening).abs() <= 0.0001)
        .min_by(|a, b| {
            let da = (a.inv_flattening - inv_flattening).abs();
            let db = (b.inv_flattening - inv_flattening).abs();
            da.total_cmp(&db)
        })
}

/// Named prime meridians with their offsets in DMS
pub const PRIME_MERIDIANS: &[(&str, &str)] = &[
    ("greenwich", "0dE"),
    ("lisbon", "9d07'54.862\"W"),
    ("paris", "2d20'14.025\"E"),
    ("bogota", "74d04'51.3\"W"),
    ("madrid", "3d41'16.58\"W"),
    ("rome", "12d27'8.4\"E"),
    ("bern", "7d26'22.5\"E"),
    ("jakarta", "106d48'27.79\"E"),
    ("ferro", "17d40'W"),
    ("brussels", "4d22'4.71\"E"),
    ("stockholm", "18d3'29.8\"E"),
    ("athens", "23d42'58.815\"E"),
    ("oslo", "10d43'22.5\"E"),
];

/// DMS offset of a named prime meridian
pub fn prime_meridian_offset(name: &str) -> Option<&'static str> {
    PRIME_MERIDIANS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .map(|(_, dms)| *dms)
}

/// Datums that map onto built-in geographic systems
pub const WELL_KNOWN_DATUMS: &[(&str, &str)] = &[
    ("WGS84", "WGS84"),
    ("NAD27", "NAD27"),
    ("NAD83", "NAD83"),
];

/// A datum known to Proj4 that resolves through the EPSG registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedDatum {
    pub id: &'static str,
    /// Geographic system registered for the datum
    pub gcs_code: u32,
    pub datum_code: u32,
}

pub const NAMED_DATUMS: &[NamedDatum] = &[
    NamedDatum { id: "GGRS87", gcs_code: 4121, datum_code: 6121 },
    NamedDatum { id: "potsdam", gcs_code: 4314, datum_code: 6314 },
    NamedDatum { id: "carthage", gcs_code: 4223, datum_code: 6223 },
    NamedDatum { id: "hermannskogel", gcs_code: 4312, datum_code: 6312 },
    NamedDatum { id: "ire65", gcs_code: 4299, datum_code: 6299 },
    NamedDatum { id: "nzgd49", gcs_code: 4272, datum_code: 6272 },
    NamedDatum { id: "OSGB36", gcs_code: 4277, datum_code: 6277 },
];

pub fn named_datum(id: &str) -> Option<&'static NamedDatum> {
    NAMED_DATUMS.iter().find(|d| d.id.eq_ignore_ascii_case(id))
}

pub fn named_datum_by_code(datum_code: u32) -> Option<&'static NamedDatum> {
    NAMED_DATUMS.iter().find(|d| d.datum_code == datum_code)
}

/// Linear units: `+units=` identifier, WKT name, meters per unit
pub const LINEAR_UNITS: &[(&str, &str, f64)] = &[
    ("m", units::METRE, 1.0),
    ("km", units::KILOMETRE, 1000.0),
    ("ft", units::FOOT, units::FOOT_CONV),
    ("us-ft", units::US_FOOT, units::US_FOOT_CONV),
    ("yd", units::YARD, units::YARD_CONV),
    ("us-yd", "US survey yard", 0.914401828803658),
    ("ch", "chain", 20.1168),
    ("link", "link", 0.201168),
    ("mi", "Statute mile", 1609.344),
    ("in", "inch", 0.0254),
];

/// `(name, factor)` of a `+units=` identifier
pub fn linear_unit_by_id(id: &str) -> Option<(&'static str, f64)> {
    LINEAR_UNITS
        .iter()
        .find(|(unit_id, _, _)| *unit_id == id)
        .map(|(_, name, factor)| (*name, *factor))
}

/// `+units=` identifier of a factor, on exact match only
pub fn linear_unit_by_factor(factor: f64) -> Option<(&'static str, &'static str)> {
    LINEAR_UNITS
        .iter()
        .find(|(_, _, f)| *f == factor)
        .map(|(id, name, _)| (*id, *name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ellipsoid_prefers_closest() {
        assert_eq!(match_ellipsoid(6378137.0, 298.257223563).map(|e| e.id), Some("WGS84"));
        assert_eq!(match_ellipsoid(6378137.0, 298.257222101).map(|e| e.id), Some("GRS80"));
        assert_eq!(match_ellipsoid(6378137.004, 298.25722215).map(|e| e.id), Some("GRS80"));
        assert!(match_ellipsoid(6378137.5, 298.257223563).is_none());
        assert_eq!(match_ellipsoid(6370997.0, 0.0).map(|e| e.id), Some("sphere"));
    }

    #[test]
    fn test_unit_lookups() {
        assert_eq!(linear_unit_by_id("us-ft"), Some((units::US_FOOT, units::US_FOOT_CONV)));
        assert_eq!(linear_unit_by_factor(0.3048).map(|u| u.0), Some("ft"));
        assert!(linear_unit_by_factor(0.30479).is_none());
        assert!(linear_unit_by_id("furlong").is_none());
    }

    #[test]
    fn test_datum_lookups() {
        assert_eq!(named_datum("osgb36").map(|d| d.gcs_code), Some(4277));
        assert_eq!(named_datum_by_code(6314).map(|d| d.id), Some("potsdam"));
        assert!(prime_meridian_offset("Paris").is_some());
    }
}
