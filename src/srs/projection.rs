//! Supported projection methods
//!
//! Every projection the crate understands is a variant of [`Projection`],
//! carrying its parameters in degrees (angular) and meters (linear). The
//! data-less [`ProjectionKind`] mirrors it for lookups by name. Parameters
//! are listed in the order they are written into a `PROJCS` tree.

use crate::srs::constants::{params as pp, projections as pt};
use crate::utils::string_utils::starts_with_ci;

macro_rules! projections {
    (
        $(
            $(#[$doc:meta])*
            $variant:ident => $wkt:path {
                $( $field:ident : $param:path = $default:expr ),+ $(,)?
            }
        ),+ $(,)?
    ) => {
        /// Identifies a projection method without its parameters
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ProjectionKind {
            $( $(#[$doc])* $variant ),+
        }

        /// A projection method with its parameter values
        #[derive(Debug, Clone, PartialEq)]
        pub enum Projection {
            $( $(#[$doc])* $variant { $( $field: f64 ),+ } ),+
        }

        impl ProjectionKind {
            /// Every supported kind
            pub const ALL: &'static [ProjectionKind] = &[ $( ProjectionKind::$variant ),+ ];

            /// Name written in the `PROJECTION` node
            pub fn wkt_name(self) -> &'static str {
                match self {
                    $( ProjectionKind::$variant => $wkt ),+
                }
            }

            /// Parameter names in tree order
            pub fn parameter_names(self) -> &'static [&'static str] {
                match self {
                    $( ProjectionKind::$variant => &[ $( $param ),+ ] ),+
                }
            }

            /// Values assumed for parameters missing from a definition
            pub fn defaults(self) -> &'static [f64] {
                match self {
                    $( ProjectionKind::$variant => &[ $( $default ),+ ] ),+
                }
            }
        }

        impl Projection {
            pub fn kind(&self) -> ProjectionKind {
                match self {
                    $( Projection::$variant { .. } => ProjectionKind::$variant ),+
                }
            }

            /// Parameter values in the order of [`ProjectionKind::parameter_names`]
            pub fn values(&self) -> Vec<f64> {
                match self {
                    $( Projection::$variant { $( $field ),+ } => vec![ $( *$field ),+ ] ),+
                }
            }

            /// Builds a projection from values in parameter order; missing
            /// trailing values take their defaults
            pub fn from_values(kind: ProjectionKind, values: &[f64]) -> Projection {
                match kind {
                    $(
                        ProjectionKind::$variant => {
                            let mut it = values.iter().copied();
                            Projection::$variant { $( $field: it.next().unwrap_or($default) ),+ }
                        }
                    ),+
                }
            }
        }
    };
}

projections! {
    AlbersConicEqualArea => pt::ALBERS_CONIC_EQUAL_AREA {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        std_parallel_2: pp::STANDARD_PARALLEL_2 = 0.0,
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    AzimuthalEquidistant => pt::AZIMUTHAL_EQUIDISTANT {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Bonne => pt::BONNE {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    CassiniSoldner => pt::CASSINI_SOLDNER {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    CylindricalEqualArea => pt::CYLINDRICAL_EQUAL_AREA {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    EckertIV => pt::ECKERT_IV {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    EckertVI => pt::ECKERT_VI {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    EquidistantConic => pt::EQUIDISTANT_CONIC {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        std_parallel_2: pp::STANDARD_PARALLEL_2 = 0.0,
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Equirectangular => pt::EQUIRECTANGULAR {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    GallStereographic => pt::GALL_STEREOGRAPHIC {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    GaussSchreiberTransverseMercator => pt::GAUSS_SCHREIBER_TRANSVERSE_MERCATOR {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    GeostationarySatellite => pt::GEOSTATIONARY_SATELLITE {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        satellite_height: pp::SATELLITE_HEIGHT = 35785831.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Gnomonic => pt::GNOMONIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    GoodeHomolosine => pt::GOODE_HOMOLOSINE {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    HotineObliqueMercator => pt::HOTINE_OBLIQUE_MERCATOR {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        azimuth: pp::AZIMUTH = 0.0,
        rectified_grid_angle: pp::RECTIFIED_GRID_ANGLE = 90.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    /// Oblique Mercator with false origin at the projection center
    HotineObliqueMercatorAzimuthCenter => pt::HOTINE_OBLIQUE_MERCATOR_AZIMUTH_CENTER {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        azimuth: pp::AZIMUTH = 0.0,
        rectified_grid_angle: pp::RECTIFIED_GRID_ANGLE = 90.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    HotineObliqueMercatorTwoPoint => pt::HOTINE_OBLIQUE_MERCATOR_TWO_POINT_NATURAL_ORIGIN {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        lat_point_1: pp::LATITUDE_OF_POINT_1 = 0.0,
        long_point_1: pp::LONGITUDE_OF_POINT_1 = 0.0,
        lat_point_2: pp::LATITUDE_OF_POINT_2 = 0.0,
        long_point_2: pp::LONGITUDE_OF_POINT_2 = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    InternationalMapWorldPolyconic => pt::INTERNATIONAL_MAP_WORLD_POLYCONIC {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        std_parallel_2: pp::STANDARD_PARALLEL_2 = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Krovak => pt::KROVAK {
        center_lat: pp::LATITUDE_OF_CENTER = 49.5,
        center_long: pp::LONGITUDE_OF_CENTER = 24.83333333333333,
        azimuth: pp::AZIMUTH = 30.28813972222222,
        pseudo_std_parallel_1: pp::PSEUDO_STANDARD_PARALLEL_1 = 78.5,
        scale: pp::SCALE_FACTOR = 0.9999,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    LambertAzimuthalEqualArea => pt::LAMBERT_AZIMUTHAL_EQUAL_AREA {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    LambertConformalConic1SP => pt::LAMBERT_CONFORMAL_CONIC_1SP {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    LambertConformalConic2SP => pt::LAMBERT_CONFORMAL_CONIC_2SP {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        std_parallel_2: pp::STANDARD_PARALLEL_2 = 0.0,
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    LambertConformalConic2SPBelgium => pt::LAMBERT_CONFORMAL_CONIC_2SP_BELGIUM {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        std_parallel_2: pp::STANDARD_PARALLEL_2 = 0.0,
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Mercator1SP => pt::MERCATOR_1SP {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Mercator2SP => pt::MERCATOR_2SP {
        std_parallel_1: pp::STANDARD_PARALLEL_1 = 0.0,
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    MillerCylindrical => pt::MILLER_CYLINDRICAL {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Mollweide => pt::MOLLWEIDE {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    NewZealandMapGrid => pt::NEW_ZEALAND_MAP_GRID {
        center_lat: pp::LATITUDE_OF_ORIGIN = -41.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 173.0,
        false_easting: pp::FALSE_EASTING = 2510000.0,
        false_northing: pp::FALSE_NORTHING = 6023150.0,
    },
    ObliqueStereographic => pt::OBLIQUE_STEREOGRAPHIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Orthographic => pt::ORTHOGRAPHIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    PolarStereographic => pt::POLAR_STEREOGRAPHIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 90.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Polyconic => pt::POLYCONIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Robinson => pt::ROBINSON {
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Sinusoidal => pt::SINUSOIDAL {
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    Stereographic => pt::STEREOGRAPHIC {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    SwissObliqueCylindrical => pt::SWISS_OBLIQUE_CYLINDRICAL {
        center_lat: pp::LATITUDE_OF_CENTER = 0.0,
        center_long: pp::LONGITUDE_OF_CENTER = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    TransverseMercator => pt::TRANSVERSE_MERCATOR {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    TransverseMercatorSouthOriented => pt::TRANSVERSE_MERCATOR_SOUTH_ORIENTED {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        scale: pp::SCALE_FACTOR = 1.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    TwoPointEquidistant => pt::TWO_POINT_EQUIDISTANT {
        lat_point_1: pp::LATITUDE_OF_1ST_POINT = 0.0,
        long_point_1: pp::LONGITUDE_OF_1ST_POINT = 0.0,
        lat_point_2: pp::LATITUDE_OF_2ND_POINT = 0.0,
        long_point_2: pp::LONGITUDE_OF_2ND_POINT = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    VanDerGrinten => pt::VAN_DER_GRINTEN {
        central_meridian: pp::CENTRAL_MERIDIAN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerI => pt::WAGNER_I {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerII => pt::WAGNER_II {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerIII => pt::WAGNER_III {
        center_lat: pp::LATITUDE_OF_ORIGIN = 0.0,
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerIV => pt::WAGNER_IV {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerV => pt::WAGNER_V {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerVI => pt::WAGNER_VI {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
    WagnerVII => pt::WAGNER_VII {
        false_easting: pp::FALSE_EASTING = 0.0,
        false_northing: pp::FALSE_NORTHING = 0.0,
    },
}

impl ProjectionKind {
    /// Looks a kind up by its WKT name (case-insensitive)
    pub fn from_wkt_name(name: &str) -> Option<ProjectionKind> {
        ProjectionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.wkt_name().eq_ignore_ascii_case(name))
    }

    /// Default for one named parameter of this kind
    pub fn default_for(self, parameter: &str) -> f64 {
        self.parameter_names()
            .iter()
            .position(|p| p.eq_ignore_ascii_case(parameter))
            .map(|i| self.defaults()[i])
            .unwrap_or(0.0)
    }
}

impl Projection {
    /// `(name, value)` pairs in tree order
    pub fn parameters(&self) -> Vec<(&'static str, f64)> {
        self.kind()
            .parameter_names()
            .iter()
            .copied()
            .zip(self.values())
            .collect()
    }

    /// Value of one named parameter
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters()
            .into_iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}

/// Whether a parameter holds an angle (stored in the geographic angular unit)
pub fn is_angular_parameter(name: &str) -> bool {
    starts_with_ci(name, "long")
        || starts_with_ci(name, "lati")
        || name.eq_ignore_ascii_case(pp::CENTRAL_MERIDIAN)
        || starts_with_ci(name, "standard_parallel")
        || name.eq_ignore_ascii_case(pp::PSEUDO_STANDARD_PARALLEL_1)
        || name.eq_ignore_ascii_case(pp::AZIMUTH)
        || name.eq_ignore_ascii_case(pp::RECTIFIED_GRID_ANGLE)
}

/// Whether a parameter holds a distance (stored in the linear unit)
pub fn is_linear_parameter(name: &str) -> bool {
    starts_with_ci(name, "false_") || name.eq_ignore_ascii_case(pp::SATELLITE_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_have_consistent_tables() {
        for kind in ProjectionKind::ALL {
            assert_eq!(kind.parameter_names().len(), kind.defaults().len(), "{:?}", kind);
            assert_eq!(ProjectionKind::from_wkt_name(kind.wkt_name()), Some(*kind));
            let projection = Projection::from_values(*kind, &[]);
            assert_eq!(projection.kind(), *kind);
            assert_eq!(projection.values(), kind.defaults());
        }
    }

    #[test]
    fn test_from_values_keeps_order() {
        let tm = Projection::from_values(ProjectionKind::TransverseMercator, &[0.0, 15.0, 0.9996, 500000.0, 0.0]);
        assert_eq!(tm, Projection::TransverseMercator {
            center_lat: 0.0,
            central_meridian: 15.0,
            scale: 0.9996,
            false_easting: 500000.0,
            false_northing: 0.0,
        });
        assert_eq!(tm.parameter("scale_factor"), Some(0.9996));
    }

    #[test]
    fn test_parameter_classification() {
        assert!(is_angular_parameter("central_meridian"));
        assert!(is_angular_parameter("Latitude_Of_1st_Point"));
        assert!(is_angular_parameter("standard_parallel_2"));
        assert!(!is_angular_parameter("scale_factor"));
        assert!(is_linear_parameter("false_easting"));
        assert!(is_linear_parameter("satellite_height"));
        assert!(!is_linear_parameter("azimuth"));
    }
}
