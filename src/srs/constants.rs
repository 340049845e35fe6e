//! Spatial reference name constants
//!
//! Keyword, projection, parameter and unit names used in WKT trees, so that
//! the rest of the crate never spells them out by hand.

/// Tree node keywords
pub mod nodes {
    pub const GEOGCS: &str = "GEOGCS";
    pub const PROJCS: &str = "PROJCS";
    pub const LOCAL_CS: &str = "LOCAL_CS";
    pub const COMPD_CS: &str = "COMPD_CS";
    pub const DATUM: &str = "DATUM";
    pub const SPHEROID: &str = "SPHEROID";
    pub const PRIMEM: &str = "PRIMEM";
    pub const UNIT: &str = "UNIT";
    pub const PROJECTION: &str = "PROJECTION";
    pub const PARAMETER: &str = "PARAMETER";
    pub const AXIS: &str = "AXIS";
    pub const AUTHORITY: &str = "AUTHORITY";
    pub const TOWGS84: &str = "TOWGS84";
    pub const EXTENSION: &str = "EXTENSION";
}

/// Projection method names
pub mod projections {
    pub const ALBERS_CONIC_EQUAL_AREA: &str = "Albers_Conic_Equal_Area";
    pub const AZIMUTHAL_EQUIDISTANT: &str = "Azimuthal_Equidistant";
    pub const BONNE: &str = "Bonne";
    pub const CASSINI_SOLDNER: &str = "Cassini_Soldner";
    pub const CYLINDRICAL_EQUAL_AREA: &str = "Cylindrical_Equal_Area";
    pub const ECKERT_IV: &str = "Eckert_IV";
    pub const ECKERT_VI: &str = "Eckert_VI";
    pub const EQUIDISTANT_CONIC: &str = "Equidistant_Conic";
    pub const EQUIRECTANGULAR: &str = "Equirectangular";
    pub const GALL_STEREOGRAPHIC: &str = "Gall_Stereographic";
    pub const GAUSS_SCHREIBER_TRANSVERSE_MERCATOR: &str = "Gauss_Schreiber_Transverse_Mercator";
    pub const GEOSTATIONARY_SATELLITE: &str = "Geostationary_Satellite";
    pub const GNOMONIC: &str = "Gnomonic";
    pub const GOODE_HOMOLOSINE: &str = "Goode_Homolosine";
    pub const HOTINE_OBLIQUE_MERCATOR: &str = "Hotine_Oblique_Mercator";
    pub const HOTINE_OBLIQUE_MERCATOR_AZIMUTH_CENTER: &str = "Hotine_Oblique_Mercator_Azimuth_Center";
    pub const HOTINE_OBLIQUE_MERCATOR_TWO_POINT_NATURAL_ORIGIN: &str = "Hotine_Oblique_Mercator_Two_Point_Natural_Origin";
    pub const INTERNATIONAL_MAP_WORLD_POLYCONIC: &str = "International_Map_of_the_World_Polyconic";
    pub const KROVAK: &str = "Krovak";
    pub const LAMBERT_AZIMUTHAL_EQUAL_AREA: &str = "Lambert_Azimuthal_Equal_Area";
    pub const LAMBERT_CONFORMAL_CONIC_1SP: &str = "Lambert_Conformal_Conic_1SP";
    pub const LAMBERT_CONFORMAL_CONIC_2SP: &str = "Lambert_Conformal_Conic_2SP";
    pub const LAMBERT_CONFORMAL_CONIC_2SP_BELGIUM: &str = "Lambert_Conformal_Conic_2SP_Belgium";
    pub const MERCATOR_1SP: &str = "Mercator_1SP";
    pub const MERCATOR_2SP: &str = "Mercator_2SP";
    pub const MILLER_CYLINDRICAL: &str = "Miller_Cylindrical";
    pub const MOLLWEIDE: &str = "Mollweide";
    pub const NEW_ZEALAND_MAP_GRID: &str = "New_Zealand_Map_Grid";
    pub const OBLIQUE_STEREOGRAPHIC: &str = "Oblique_Stereographic";
    pub const ORTHOGRAPHIC: &str = "Orthographic";
    pub const POLAR_STEREOGRAPHIC: &str = "Polar_Stereographic";
    pub const POLYCONIC: &str = "Polyconic";
    pub const ROBINSON: &str = "Robinson";
    pub const SINUSOIDAL: &str = "Sinusoidal";
    pub const STEREOGRAPHIC: &str = "Stereographic";
    pub const SWISS_OBLIQUE_CYLINDRICAL: &str = "Swiss_Oblique_Cylindrical";
    pub const TRANSVERSE_MERCATOR: &str = "Transverse_Mercator";
    pub const TRANSVERSE_MERCATOR_SOUTH_ORIENTED: &str = "Transverse_Mercator_South_Orientated";
    pub const TWO_POINT_EQUIDISTANT: &str = "Two_Point_Equidistant";
    pub const VAN_DER_GRINTEN: &str = "VanDerGrinten";
    pub const WAGNER_I: &str = "Wagner_I";
    pub const WAGNER_II: &str = "Wagner_II";
    pub const WAGNER_III: &str = "Wagner_III";
    pub const WAGNER_IV: &str = "Wagner_IV";
    pub const WAGNER_V: &str = "Wagner_V";
    pub const WAGNER_VI: &str = "Wagner_VI";
    pub const WAGNER_VII: &str = "Wagner_VII";
}

/// Projection parameter names
pub mod params {
    pub const CENTRAL_MERIDIAN: &str = "central_meridian";
    pub const SCALE_FACTOR: &str = "scale_factor";
    pub const STANDARD_PARALLEL_1: &str = "standard_parallel_1";
    pub const STANDARD_PARALLEL_2: &str = "standard_parallel_2";
    pub const PSEUDO_STANDARD_PARALLEL_1: &str = "pseudo_standard_parallel_1";
    pub const LONGITUDE_OF_CENTER: &str = "longitude_of_center";
    pub const LATITUDE_OF_CENTER: &str = "latitude_of_center";
    pub const LONGITUDE_OF_ORIGIN: &str = "longitude_of_origin";
    pub const LATITUDE_OF_ORIGIN: &str = "latitude_of_origin";
    pub const FALSE_EASTING: &str = "false_easting";
    pub const FALSE_NORTHING: &str = "false_northing";
    pub const AZIMUTH: &str = "azimuth";
    pub const LONGITUDE_OF_POINT_1: &str = "longitude_of_point_1";
    pub const LATITUDE_OF_POINT_1: &str = "latitude_of_point_1";
    pub const LONGITUDE_OF_POINT_2: &str = "longitude_of_point_2";
    pub const LATITUDE_OF_POINT_2: &str = "latitude_of_point_2";
    pub const LATITUDE_OF_1ST_POINT: &str = "Latitude_Of_1st_Point";
    pub const LONGITUDE_OF_1ST_POINT: &str = "Longitude_Of_1st_Point";
    pub const LATITUDE_OF_2ND_POINT: &str = "Latitude_Of_2nd_Point";
    pub const LONGITUDE_OF_2ND_POINT: &str = "Longitude_Of_2nd_Point";
    pub const RECTIFIED_GRID_ANGLE: &str = "rectified_grid_angle";
    pub const SATELLITE_HEIGHT: &str = "satellite_height";
}

/// Unit names and conversion factors
pub mod units {
    pub const METRE: &str = "metre";
    pub const FOOT: &str = "foot";
    pub const US_FOOT: &str = "US survey foot";
    pub const YARD: &str = "yard";
    pub const KILOMETRE: &str = "kilometre";
    pub const DEGREE: &str = "degree";
    pub const RADIAN: &str = "radian";
    pub const GRAD: &str = "grad";

    pub const FOOT_CONV: f64 = 0.3048;
    pub const US_FOOT_CONV: f64 = 0.3048006096012192;
    pub const YARD_CONV: f64 = 0.9144;

    /// Radians per degree, as written in definitions
    pub const DEGREE_CONV_TEXT: &str = "0.0174532925199433";
    pub const DEGREE_CONV: f64 = 0.0174532925199433;
    pub const GRAD_CONV: f64 = 0.01570796326794897;
}

/// Well-known datum and ellipsoid names
pub mod datums {
    pub const WGS84: &str = "WGS_1984";
    pub const WGS72: &str = "WGS_1972";
    pub const NAD27: &str = "North_American_Datum_1927";
    pub const NAD83: &str = "North_American_Datum_1983";

    pub const WGS84_SEMIMAJOR: f64 = 6378137.0;
    pub const WGS84_INVFLATTENING: f64 = 298.257223563;
}

/// Name used for elements without a name
pub const UNNAMED: &str = "unnamed";
/// Name used for elements whose name is unknown
pub const UNKNOWN: &str = "unknown";
