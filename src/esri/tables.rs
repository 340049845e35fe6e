//! Name and value tables for the Esri dialect
//!
//! Every table is written as `(wkt, esri)` pairs, so the same table serves
//! both directions. Entries are scanned front to back and the first match
//! wins: where several OGC names share one Esri name, the entry listed first
//! is the one chosen on import.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use lazy_static::lazy_static;
use log::{debug, warn};

use crate::registry::{files, Registry, Table};
use crate::srs::constants::{params as pp, projections as pt};
use crate::srs::ProjectionKind;
use crate::wkt::{MatchMode, RemapEntry, RemapTable};

/// Esri names of projection methods that differ from the OGC ones
const PROJECTION_NAMES: &[(&str, &str)] = &[
    (pt::ALBERS_CONIC_EQUAL_AREA, "Albers"),
    (pt::CASSINI_SOLDNER, "Cassini"),
    (pt::EQUIRECTANGULAR, "Equidistant_Cylindrical"),
    (pt::EQUIRECTANGULAR, "Plate_Carree"),
    (pt::HOTINE_OBLIQUE_MERCATOR, "Hotine_Oblique_Mercator_Azimuth_Natural_Origin"),
    (pt::LAMBERT_CONFORMAL_CONIC_1SP, "Lambert_Conformal_Conic"),
    (pt::LAMBERT_CONFORMAL_CONIC_2SP, "Lambert_Conformal_Conic"),
    (pt::MERCATOR_1SP, "Mercator"),
    (pt::MERCATOR_2SP, "Mercator"),
    (pt::OBLIQUE_STEREOGRAPHIC, "Double_Stereographic"),
    (pt::TRANSVERSE_MERCATOR, "Transverse_Mercator"),
    (pt::TRANSVERSE_MERCATOR, "Gauss_Kruger"),
    (pt::VAN_DER_GRINTEN, "Van_der_Grinten_I"),
];

/// Esri names of the two polar stereographic variants
pub const STEREOGRAPHIC_NORTH_POLE: &str = "Stereographic_North_Pole";
pub const STEREOGRAPHIC_SOUTH_POLE: &str = "Stereographic_South_Pole";
pub const PLATE_CARREE: &str = "Plate_Carree";

/// Parameter names shared by most projections
const PARAMETER_NAMES: &[(&str, &str)] = &[
    (pp::CENTRAL_MERIDIAN, "Central_Meridian"),
    (pp::LATITUDE_OF_ORIGIN, "Latitude_Of_Origin"),
    (pp::SCALE_FACTOR, "Scale_Factor"),
    (pp::STANDARD_PARALLEL_1, "Standard_Parallel_1"),
    (pp::STANDARD_PARALLEL_2, "Standard_Parallel_2"),
    (pp::PSEUDO_STANDARD_PARALLEL_1, "Pseudo_Standard_Parallel_1"),
    (pp::FALSE_EASTING, "False_Easting"),
    (pp::FALSE_NORTHING, "False_Northing"),
    (pp::LATITUDE_OF_CENTER, "Latitude_Of_Center"),
    (pp::LONGITUDE_OF_CENTER, "Longitude_Of_Center"),
    (pp::AZIMUTH, "Azimuth"),
    (pp::RECTIFIED_GRID_ANGLE, "Rectified_Grid_Angle"),
    (pp::LATITUDE_OF_POINT_1, "Latitude_Of_1st_Point"),
    (pp::LONGITUDE_OF_POINT_1, "Longitude_Of_1st_Point"),
    (pp::LATITUDE_OF_POINT_2, "Latitude_Of_2nd_Point"),
    (pp::LONGITUDE_OF_POINT_2, "Longitude_Of_2nd_Point"),
    (pp::SATELLITE_HEIGHT, "Height"),
];

/// Albers and the equal-area/equidistant family describe their center as
/// an origin
const CENTER_AS_ORIGIN: &[(&str, &str)] = &[
    (pp::LONGITUDE_OF_CENTER, "Central_Meridian"),
    (pp::LATITUDE_OF_CENTER, "Latitude_Of_Origin"),
];

/// Azimuthal methods that describe their origin as a center
const ORIGIN_AS_CENTER: &[(&str, &str)] = &[
    (pp::CENTRAL_MERIDIAN, "Longitude_Of_Center"),
    (pp::LATITUDE_OF_ORIGIN, "Latitude_Of_Center"),
];

/// Esri writes the Mercator origin latitude as a standard parallel
const MERCATOR: &[(&str, &str)] = &[(pp::LATITUDE_OF_ORIGIN, "Standard_Parallel_1")];

/// The latitude of true scale of a polar stereographic system
const POLAR_STEREOGRAPHIC: &[(&str, &str)] = &[(pp::LATITUDE_OF_ORIGIN, "Standard_Parallel_1")];

/// Two point equidistant already uses the Esri spelling
const TWO_POINT_EQUIDISTANT: &[(&str, &str)] = &[
    (pp::LATITUDE_OF_1ST_POINT, "Latitude_Of_1st_Point"),
    (pp::LONGITUDE_OF_1ST_POINT, "Longitude_Of_1st_Point"),
    (pp::LATITUDE_OF_2ND_POINT, "Latitude_Of_2nd_Point"),
    (pp::LONGITUDE_OF_2ND_POINT, "Longitude_Of_2nd_Point"),
];

/// Parameters Esri requires although they carry no information here; they
/// are added on export and removed on import
pub const ADDED_PARAMETERS: &[(ProjectionKind, &str, f64)] = &[
    (ProjectionKind::Krovak, "X_Scale", 1.0),
    (ProjectionKind::Krovak, "Y_Scale", 1.0),
    (ProjectionKind::Krovak, "XY_Plane_Rotation", 0.0),
];

/// Parameters Esri does not know, removed on export
pub const DELETED_PARAMETERS: &[(ProjectionKind, &str)] = &[
    (ProjectionKind::HotineObliqueMercatorAzimuthCenter, pp::RECTIFIED_GRID_ANGLE),
];

const UNIT_NAMES: &[(&str, &str)] = &[
    ("metre", "Meter"),
    ("meter", "Meter"),
    ("kilometre", "Kilometer"),
    ("foot", "Foot"),
    ("US survey foot", "Foot_US"),
    ("yard", "Yard"),
    ("degree", "Degree"),
    ("radian", "Radian"),
    ("grad", "Grad"),
];

const SPHEROID_NAMES: &[(&str, &str)] = &[
    ("WGS 84", "WGS_1984"),
    ("WGS 72", "WGS_1972"),
    ("GRS 1980", "GRS_1980"),
    ("Clarke 1866", "Clarke_1866"),
    ("Clarke 1880 (IGN)", "Clarke_1880_IGN"),
    ("Clarke 1880 (RGS)", "Clarke_1880_RGS"),
    ("International 1924", "International_1924"),
    ("Bessel 1841", "Bessel_1841"),
    ("Airy 1830", "Airy_1830"),
    ("Airy Modified 1849", "Airy_Modified"),
    ("Krassowsky 1940", "Krasovsky_1940"),
    ("Everest 1830 (1937 Adjustment)", "Everest_Adjustment_1937"),
    ("unnamed", "Unknown"),
];

/// Geographic system names Esri spells after the datum
const GEOGCS_NAMES: &[(&str, &str)] = &[
    ("WGS 84", "GCS_WGS_1984"),
    ("WGS 72", "GCS_WGS_1972"),
    ("NAD27", "GCS_North_American_1927"),
    ("NAD83", "GCS_North_American_1983"),
    ("ETRS89", "GCS_ETRS_1989"),
    ("unnamed", "GCS_Unknown"),
    ("unknown", "GCS_Unknown"),
];

/// Used when the registry mapping file is missing or too short to be real
const DEFAULT_DATUM_NAMES: &[(&str, &str)] = &[
    ("WGS_1984", "D_WGS_1984"),
    ("WGS_1972", "D_WGS_1972"),
    ("North_American_Datum_1927", "D_North_American_1927"),
    ("North_American_Datum_1983", "D_North_American_1983"),
    ("European_Datum_1950", "D_European_1950"),
    ("OSGB_1936", "D_OSGB_1936"),
];

/// Fewest rows a registry datum mapping must have to replace the default
const MIN_DATUM_ROWS: usize = 5;

/// Esri text prefixes of rounded inverse flattenings, with the registry
/// value they stand for
pub const INV_FLATTENING_FIXUPS: &[(&str, &str)] = &[
    ("293.464999999", "293.465"),
    ("293.465000003", "293.465"),
    ("294.978698200", "294.9786982"),
    ("297.000000000", "297"),
    ("297.000000004", "297"),
    ("298.257222100", "298.257222101"),
    ("298.2572235629", "298.257223563"),
    ("299.152812800", "299.1528128"),
    ("300.801699999", "300.8017"),
];

/// `(projection, parameter, legacy text, value)`: rounding artifacts found
/// in Esri files, replaced on import
pub const PARAMETER_VALUE_FIXUPS: &[(&str, &str, &str, &str)] = &[
    (pt::TRANSVERSE_MERCATOR, pp::CENTRAL_MERIDIAN, "-2.999999999999999", "-3"),
    (pt::TRANSVERSE_MERCATOR, pp::CENTRAL_MERIDIAN, "-5.999999999999999", "-6"),
    (pt::TRANSVERSE_MERCATOR, pp::CENTRAL_MERIDIAN, "-8.999999999999998", "-9"),
    (pt::TRANSVERSE_MERCATOR, pp::SCALE_FACTOR, "0.9996000000000001", "0.9996"),
    (pt::KROVAK, pp::LONGITUDE_OF_CENTER, "24.83333333333334", "24.83333333333333"),
];

/// Datum name prefixes used for UTM zone names
pub const UTM_PREFIXES: &[(&str, &str)] = &[
    ("WGS_1984", "WGS_1984"),
    ("WGS_1972", "WGS_1972"),
    ("North_American_Datum_1927", "NAD_1927"),
    ("North_American_Datum_1983", "NAD_1983"),
    ("European_Datum_1950", "ED_1950"),
];

lazy_static! {
    pub static ref PROJECTIONS: RemapTable = RemapTable::from_pairs(PROJECTION_NAMES, MatchMode::ExactIgnoreCase);
    pub static ref UNITS: RemapTable = RemapTable::from_pairs(UNIT_NAMES, MatchMode::ExactIgnoreCase);
    pub static ref SPHEROIDS: RemapTable = RemapTable::from_pairs(SPHEROID_NAMES, MatchMode::ExactIgnoreCase);
    pub static ref GEOGCS: RemapTable = RemapTable::from_pairs(GEOGCS_NAMES, MatchMode::ExactIgnoreCase);
    static ref PARAMETERS: RemapTable = RemapTable::from_pairs(PARAMETER_NAMES, MatchMode::ExactIgnoreCase);
    static ref DATUMS: Mutex<Option<DatumMemo>> = Mutex::new(None);
}

/// Datum table built from one loaded `gdal_datum.csv`, or from the
/// built-in list for a folder without one
struct DatumMemo {
    source: Option<Arc<Table>>,
    dir: PathBuf,
    table: Arc<RemapTable>,
}

impl DatumMemo {
    fn matches(&self, registry: &Registry, source: &Option<Arc<Table>>) -> bool {
        match (&self.source, source) {
            (Some(built_from), Some(current)) => Arc::ptr_eq(built_from, current),
            (None, None) => self.dir == registry.dir(),
            _ => false,
        }
    }
}

/// The datum table of the registry in effect
pub fn datum_table() -> Arc<RemapTable> {
    datum_table_for(&Registry::global())
}

/// The datum table of `registry`.
///
/// The table is rebuilt whenever the registry cache hands out a different
/// `gdal_datum.csv`, so a new registry folder or a `reset_cache` is picked
/// up on the next call.
pub fn datum_table_for(registry: &Registry) -> Arc<RemapTable> {
    let source = registry.find_table(files::GDAL_DATUM);
    let mut memo = match DATUMS.lock() {
        Ok(memo) => memo,
        Err(_) => return Arc::new(build_datum_table(registry, source.as_deref())),
    };

    if let Some(current) = memo.as_ref().filter(|m| m.matches(registry, &source)) {
        return Arc::clone(&current.table);
    }

    let table = Arc::new(build_datum_table(registry, source.as_deref()));
    *memo = Some(DatumMemo {
        source,
        dir: registry.dir().to_path_buf(),
        table: Arc::clone(&table),
    });
    table
}

/// Builds the datum name table from the registry's `DATUM_NAME` and
/// `ESRI_DATUM_NAME` columns, falling back to a short built-in list
pub fn load_datum_table(registry: &Registry) -> RemapTable {
    build_datum_table(registry, registry.find_table(files::GDAL_DATUM).as_deref())
}

fn build_datum_table(registry: &Registry, table: Option<&Table>) -> RemapTable {
    let table = match table {
        Some(table) => table,
        None => {
            warn!("No {} in {:?}, using built-in Esri datum names", files::GDAL_DATUM, registry.dir());
            return default_datum_table();
        },
    };

    let entries: Vec<RemapEntry> = (0..table.row_count())
        .filter_map(|i| table.row(i))
        .map(|row| RemapEntry {
            wkt: table.field(row, "DATUM_NAME").to_string(),
            other: table.field(row, "ESRI_DATUM_NAME").to_string(),
        })
        .filter(|e| !e.wkt.is_empty() && !e.other.is_empty())
        .collect();

    if entries.len() < MIN_DATUM_ROWS {
        warn!("Only {} Esri datum names in {}, using built-in list", entries.len(), files::GDAL_DATUM);
        return default_datum_table();
    }
    debug!("Loaded {} Esri datum names", entries.len());
    RemapTable::from_entries(entries, MatchMode::ExactIgnoreCase)
}

fn default_datum_table() -> RemapTable {
    RemapTable::from_pairs(DEFAULT_DATUM_NAMES, MatchMode::ExactIgnoreCase)
}

/// Parameter table for one projection: its family entries ahead of the
/// shared ones
pub fn parameter_table(kind: Option<ProjectionKind>) -> RemapTable {
    use ProjectionKind::*;

    let family: &[(&str, &str)] = match kind {
        Some(AlbersConicEqualArea) | Some(EquidistantConic) | Some(LambertAzimuthalEqualArea)
        | Some(AzimuthalEquidistant) | Some(MillerCylindrical) | Some(Robinson) | Some(Sinusoidal) => CENTER_AS_ORIGIN,
        Some(Gnomonic) | Some(Orthographic) => ORIGIN_AS_CENTER,
        Some(Mercator1SP) => MERCATOR,
        Some(PolarStereographic) => POLAR_STEREOGRAPHIC,
        Some(TwoPointEquidistant) => TWO_POINT_EQUIDISTANT,
        _ => &[],
    };

    let entries = RemapTable::from_pairs(family, MatchMode::ExactIgnoreCase)
        .entries()
        .iter()
        .chain(PARAMETERS.entries())
        .cloned()
        .collect();
    RemapTable::from_entries(entries, MatchMode::ExactIgnoreCase)
}
