//! EPSG parameter and method codes

use crate::srs::projection::Projection;

/// Projection parameter codes
pub mod param {
    pub const LATITUDE_OF_NATURAL_ORIGIN: u32 = 8801;
    pub const LONGITUDE_OF_NATURAL_ORIGIN: u32 = 8802;
    pub const SCALE_AT_NATURAL_ORIGIN: u32 = 8805;
    pub const FALSE_EASTING: u32 = 8806;
    pub const FALSE_NORTHING: u32 = 8807;
    pub const LATITUDE_OF_PROJECTION_CENTRE: u32 = 8811;
    pub const LONGITUDE_OF_PROJECTION_CENTRE: u32 = 8812;
    pub const AZIMUTH_OF_INITIAL_LINE: u32 = 8813;
    pub const ANGLE_FROM_RECTIFIED_TO_SKEW_GRID: u32 = 8814;
    pub const SCALE_ON_INITIAL_LINE: u32 = 8815;
    pub const EASTING_AT_PROJECTION_CENTRE: u32 = 8816;
    pub const NORTHING_AT_PROJECTION_CENTRE: u32 = 8817;
    pub const LATITUDE_OF_PSEUDO_STANDARD_PARALLEL: u32 = 8818;
    pub const SCALE_ON_PSEUDO_STANDARD_PARALLEL: u32 = 8819;
    pub const LATITUDE_OF_FALSE_ORIGIN: u32 = 8821;
    pub const LONGITUDE_OF_FALSE_ORIGIN: u32 = 8822;
    pub const LATITUDE_OF_FIRST_STANDARD_PARALLEL: u32 = 8823;
    pub const LATITUDE_OF_SECOND_STANDARD_PARALLEL: u32 = 8824;
    pub const EASTING_OF_FALSE_ORIGIN: u32 = 8826;
    pub const NORTHING_OF_FALSE_ORIGIN: u32 = 8827;
    pub const LATITUDE_OF_STANDARD_PARALLEL: u32 = 8832;
    pub const LONGITUDE_OF_ORIGIN: u32 = 8833;
    pub const CO_LATITUDE_OF_CONE_AXIS: u32 = 1036;
}

/// Coordinate operation method codes
pub mod method {
    pub const LAMBERT_CONIC_CONFORMAL_1SP: u32 = 9801;
    pub const LAMBERT_CONIC_CONFORMAL_2SP: u32 = 9802;
    pub const LAMBERT_CONIC_CONFORMAL_2SP_BELGIUM: u32 = 9803;
    pub const MERCATOR_1SP: u32 = 9804;
    pub const MERCATOR_2SP: u32 = 9805;
    pub const CASSINI_SOLDNER: u32 = 9806;
    pub const TRANSVERSE_MERCATOR: u32 = 9807;
    pub const TRANSVERSE_MERCATOR_SOUTH_ORIENTED: u32 = 9808;
    pub const OBLIQUE_STEREOGRAPHIC: u32 = 9809;
    pub const POLAR_STEREOGRAPHIC: u32 = 9810;
    pub const NEW_ZEALAND_MAP_GRID: u32 = 9811;
    pub const HOTINE_OBLIQUE_MERCATOR: u32 = 9812;
    pub const SWISS_OBLIQUE_CYLINDRICAL: u32 = 9814;
    pub const HOTINE_OBLIQUE_MERCATOR_CENTER: u32 = 9815;
    pub const POLYCONIC: u32 = 9818;
    pub const KROVAK: u32 = 9819;
    pub const LAMBERT_AZIMUTHAL_EQUAL_AREA: u32 = 9820;
    pub const ALBERS_EQUAL_AREA: u32 = 9822;
    pub const POLAR_STEREOGRAPHIC_VARIANT_B: u32 = 9829;
    pub const LAMBERT_CYLINDRICAL_EQUAL_AREA_SPHERICAL: u32 = 9834;
    pub const LAMBERT_CYLINDRICAL_EQUAL_AREA: u32 = 9835;
    pub const ORTHOGRAPHIC: u32 = 9840;
    pub const MERCATOR_SPHERICAL: u32 = 9841;
    pub const EQUIDISTANT_CYLINDRICAL: u32 = 9842;
    pub const POPULAR_VISUALISATION_PSEUDO_MERCATOR: u32 = 1024;
    pub const EQUIDISTANT_CYLINDRICAL_ELLIPSOIDAL: u32 = 1028;
}

/// Builds the projection for an operation method.
///
/// `value(code, default)` returns the normalized value of a parameter slot,
/// or `default` when the definition does not carry that code. Returns
/// `None` for methods that have no projection counterpart.
pub fn projection_for_method(method_code: u32, value: &dyn Fn(u32, f64) -> f64) -> Option<Projection> {
    use self::method as m;
    use self::param as p;

    let fe = || value(p::FALSE_EASTING, 0.0);
    let fn_ = || value(p::FALSE_NORTHING, 0.0);

    let projection = match method_code {
        m::LAMBERT_CONIC_CONFORMAL_1SP => Projection::LambertConformalConic1SP {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::LAMBERT_CONIC_CONFORMAL_2SP | m::LAMBERT_CONIC_CONFORMAL_2SP_BELGIUM => {
            let std_parallel_1 = value(p::LATITUDE_OF_FIRST_STANDARD_PARALLEL, 0.0);
            let std_parallel_2 = value(p::LATITUDE_OF_SECOND_STANDARD_PARALLEL, 0.0);
            let center_lat = value(p::LATITUDE_OF_FALSE_ORIGIN, 0.0);
            let central_meridian = value(p::LONGITUDE_OF_FALSE_ORIGIN, 0.0);
            let false_easting = value(p::EASTING_OF_FALSE_ORIGIN, 0.0);
            let false_northing = value(p::NORTHING_OF_FALSE_ORIGIN, 0.0);
            if method_code == m::LAMBERT_CONIC_CONFORMAL_2SP {
                Projection::LambertConformalConic2SP {
                    std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing,
                }
            } else {
                Projection::LambertConformalConic2SPBelgium {
                    std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing,
                }
            }
        },
        m::MERCATOR_1SP | m::MERCATOR_SPHERICAL | m::POPULAR_VISUALISATION_PSEUDO_MERCATOR => Projection::Mercator1SP {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::MERCATOR_2SP => Projection::Mercator2SP {
            std_parallel_1: value(p::LATITUDE_OF_FIRST_STANDARD_PARALLEL, 0.0),
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::CASSINI_SOLDNER => Projection::CassiniSoldner {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::TRANSVERSE_MERCATOR => Projection::TransverseMercator {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::TRANSVERSE_MERCATOR_SOUTH_ORIENTED => Projection::TransverseMercatorSouthOriented {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::OBLIQUE_STEREOGRAPHIC => Projection::ObliqueStereographic {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::POLAR_STEREOGRAPHIC => Projection::PolarStereographic {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            scale: value(p::SCALE_AT_NATURAL_ORIGIN, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::POLAR_STEREOGRAPHIC_VARIANT_B => Projection::PolarStereographic {
            center_lat: value(p::LATITUDE_OF_STANDARD_PARALLEL, 0.0),
            central_meridian: value(p::LONGITUDE_OF_ORIGIN, 0.0),
            scale: 1.0,
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::NEW_ZEALAND_MAP_GRID => Projection::NewZealandMapGrid {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::HOTINE_OBLIQUE_MERCATOR => Projection::HotineObliqueMercator {
            center_lat: value(p::LATITUDE_OF_PROJECTION_CENTRE, 0.0),
            center_long: value(p::LONGITUDE_OF_PROJECTION_CENTRE, 0.0),
            azimuth: value(p::AZIMUTH_OF_INITIAL_LINE, 0.0),
            rectified_grid_angle: value(p::ANGLE_FROM_RECTIFIED_TO_SKEW_GRID, 90.0),
            scale: value(p::SCALE_ON_INITIAL_LINE, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::HOTINE_OBLIQUE_MERCATOR_CENTER => Projection::HotineObliqueMercatorAzimuthCenter {
            center_lat: value(p::LATITUDE_OF_PROJECTION_CENTRE, 0.0),
            center_long: value(p::LONGITUDE_OF_PROJECTION_CENTRE, 0.0),
            azimuth: value(p::AZIMUTH_OF_INITIAL_LINE, 0.0),
            rectified_grid_angle: value(p::ANGLE_FROM_RECTIFIED_TO_SKEW_GRID, 90.0),
            scale: value(p::SCALE_ON_INITIAL_LINE, 1.0),
            false_easting: value(p::EASTING_AT_PROJECTION_CENTRE, 0.0),
            false_northing: value(p::NORTHING_AT_PROJECTION_CENTRE, 0.0),
        },
        m::SWISS_OBLIQUE_CYLINDRICAL => Projection::SwissObliqueCylindrical {
            center_lat: value(p::LATITUDE_OF_PROJECTION_CENTRE, 0.0),
            center_long: value(p::LONGITUDE_OF_PROJECTION_CENTRE, 0.0),
            false_easting: value(p::EASTING_AT_PROJECTION_CENTRE, 0.0),
            false_northing: value(p::NORTHING_AT_PROJECTION_CENTRE, 0.0),
        },
        m::POLYCONIC => Projection::Polyconic {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::KROVAK => Projection::Krovak {
            center_lat: value(p::LATITUDE_OF_PROJECTION_CENTRE, 0.0),
            center_long: value(p::LONGITUDE_OF_ORIGIN, 0.0),
            azimuth: value(p::CO_LATITUDE_OF_CONE_AXIS, 0.0),
            pseudo_std_parallel_1: value(p::LATITUDE_OF_PSEUDO_STANDARD_PARALLEL, 0.0),
            scale: value(p::SCALE_ON_PSEUDO_STANDARD_PARALLEL, 1.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::LAMBERT_AZIMUTHAL_EQUAL_AREA => Projection::LambertAzimuthalEqualArea {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            center_long: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::ALBERS_EQUAL_AREA => Projection::AlbersConicEqualArea {
            std_parallel_1: value(p::LATITUDE_OF_FIRST_STANDARD_PARALLEL, 0.0),
            std_parallel_2: value(p::LATITUDE_OF_SECOND_STANDARD_PARALLEL, 0.0),
            center_lat: value(p::LATITUDE_OF_FALSE_ORIGIN, 0.0),
            center_long: value(p::LONGITUDE_OF_FALSE_ORIGIN, 0.0),
            false_easting: value(p::EASTING_OF_FALSE_ORIGIN, 0.0),
            false_northing: value(p::NORTHING_OF_FALSE_ORIGIN, 0.0),
        },
        m::LAMBERT_CYLINDRICAL_EQUAL_AREA | m::LAMBERT_CYLINDRICAL_EQUAL_AREA_SPHERICAL => {
            Projection::CylindricalEqualArea {
                std_parallel_1: value(p::LATITUDE_OF_FIRST_STANDARD_PARALLEL, 0.0),
                central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
                false_easting: fe(),
                false_northing: fn_(),
            }
        },
        m::ORTHOGRAPHIC => Projection::Orthographic {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        m::EQUIDISTANT_CYLINDRICAL | m::EQUIDISTANT_CYLINDRICAL_ELLIPSOIDAL => Projection::Equirectangular {
            center_lat: value(p::LATITUDE_OF_NATURAL_ORIGIN, 0.0),
            central_meridian: value(p::LONGITUDE_OF_NATURAL_ORIGIN, 0.0),
            std_parallel_1: value(p::LATITUDE_OF_FIRST_STANDARD_PARALLEL, 0.0),
            false_easting: fe(),
            false_northing: fn_(),
        },
        _ => return None,
    };
    Some(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(values: HashMap<u32, f64>) -> impl Fn(u32, f64) -> f64 {
        move |code, default| values.get(&code).copied().unwrap_or(default)
    }

    #[test]
    fn test_hotine_center_uses_centre_offsets() {
        let value = lookup(HashMap::from([
            (param::LATITUDE_OF_PROJECTION_CENTRE, 4.0),
            (param::LONGITUDE_OF_PROJECTION_CENTRE, 115.0),
            (param::AZIMUTH_OF_INITIAL_LINE, 53.3),
            (param::EASTING_AT_PROJECTION_CENTRE, 590476.87),
            (param::NORTHING_AT_PROJECTION_CENTRE, 442857.65),
        ]));
        match projection_for_method(method::HOTINE_OBLIQUE_MERCATOR_CENTER, &value) {
            Some(Projection::HotineObliqueMercatorAzimuthCenter { rectified_grid_angle, scale, false_easting, .. }) => {
                assert_eq!(rectified_grid_angle, 90.0);
                assert_eq!(scale, 1.0);
                assert_eq!(false_easting, 590476.87);
            },
            other => panic!("unexpected projection {:?}", other),
        }
    }

    #[test]
    fn test_unknown_method() {
        let value = lookup(HashMap::new());
        assert!(projection_for_method(9831, &value).is_none());
    }
}
