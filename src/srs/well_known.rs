//! Built-in geographic coordinate systems
//!
//! The four most common datums are available without any registry file.

use crate::srs::errors::SrsResult;
use crate::wkt::WktNode;

const WGS84: &str = concat!(
    "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,",
    "AUTHORITY[\"EPSG\",\"7030\"]],AUTHORITY[\"EPSG\",\"6326\"]],",
    "PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],",
    "UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],",
    "AUTHORITY[\"EPSG\",\"4326\"]]"
);

const WGS72: &str = concat!(
    "GEOGCS[\"WGS 72\",DATUM[\"WGS_1972\",SPHEROID[\"WGS 72\",6378135,298.26,",
    "AUTHORITY[\"EPSG\",\"7043\"]],TOWGS84[0,0,4.5,0,0,0.554,0.2263],",
    "AUTHORITY[\"EPSG\",\"6322\"]],",
    "PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],",
    "UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],",
    "AUTHORITY[\"EPSG\",\"4322\"]]"
);

const NAD27: &str = concat!(
    "GEOGCS[\"NAD27\",DATUM[\"North_American_Datum_1927\",",
    "SPHEROID[\"Clarke 1866\",6378206.4,294.9786982138982,AUTHORITY[\"EPSG\",\"7008\"]],",
    "AUTHORITY[\"EPSG\",\"6267\"]],",
    "PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],",
    "UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],",
    "AUTHORITY[\"EPSG\",\"4267\"]]"
);

const NAD83: &str = concat!(
    "GEOGCS[\"NAD83\",DATUM[\"North_American_Datum_1983\",",
    "SPHEROID[\"GRS 1980\",6378137,298.257222101,AUTHORITY[\"EPSG\",\"7019\"]],",
    "TOWGS84[0,0,0,0,0,0,0],AUTHORITY[\"EPSG\",\"6269\"]],",
    "PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],",
    "UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],",
    "AUTHORITY[\"EPSG\",\"4269\"]]"
);

/// Names accepted by [`well_known_geog_cs`], with their EPSG codes
pub const WELL_KNOWN_NAMES: &[(&str, u32)] = &[
    ("WGS84", 4326),
    ("WGS72", 4322),
    ("NAD27", 4267),
    ("NAD83", 4269),
];

/// Returns the built-in `GEOGCS` tree for a name such as `WGS84`
pub fn well_known_geog_cs(name: &str) -> Option<SrsResult<WktNode>> {
    let text = match name.to_ascii_uppercase().as_str() {
        "WGS84" => WGS84,
        "WGS72" => WGS72,
        "NAD27" => NAD27,
        "NAD83" => NAD83,
        _ => return None,
    };
    Some(WktNode::parse(text))
}

/// Returns the built-in `GEOGCS` tree for one of the short-circuited EPSG codes
pub fn well_known_epsg(code: u32) -> Option<SrsResult<WktNode>> {
    WELL_KNOWN_NAMES
        .iter()
        .find(|(_, c)| *c == code)
        .and_then(|(name, _)| well_known_geog_cs(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_parse() {
        for (name, code) in WELL_KNOWN_NAMES {
            let node = well_known_geog_cs(name).unwrap().unwrap();
            assert_eq!(node.value(), "GEOGCS");
            let authority = node.children().last().unwrap();
            assert_eq!(authority.child_value(1), Some(code.to_string().as_str()));
        }
    }

    #[test]
    fn test_lookup_by_code() {
        let nad27 = well_known_epsg(4267).unwrap().unwrap();
        assert_eq!(nad27.get_attr_value("DATUM", 0), Some("North_American_Datum_1927"));
        assert!(well_known_epsg(4230).is_none());
        assert!(well_known_geog_cs("ED50").is_none());
    }
}
