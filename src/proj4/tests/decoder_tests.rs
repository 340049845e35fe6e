//! Tests for Proj4 decoding

use crate::proj4::{decode, decode_params, Proj4Params};
use crate::srs::{Projection, ProjectionKind, SrsError};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-6, "{} != {}", actual, expected);
}

#[test]
fn test_tokenizer() {
    let params = Proj4Params::parse("+proj=utm  +zone=33\t+south +no_defs");
    assert_eq!(params.len(), 4);
    assert_eq!(params.get("zone"), Some("33"));
    assert_eq!(params.get("south"), Some("yes"));
    assert!(params.get("datum").is_none());
    assert_eq!(params.angle("lon_0", 7.5), 7.5);
}

#[test]
fn test_utm_with_datum() {
    let srs = decode("+proj=utm +zone=33 +datum=WGS84 +units=m +no_defs").unwrap();
    assert!(srs.is_projected());
    assert_eq!(srs.projection(), Some(Projection::TransverseMercator {
        center_lat: 0.0,
        central_meridian: 15.0,
        scale: 0.9996,
        false_easting: 500000.0,
        false_northing: 0.0,
    }));
    assert_eq!(srs.utm_zone(), Some((33, true)));
    assert_eq!(srs.datum_name(), Some("WGS_1984"));
    assert_eq!(srs.linear_units(), ("metre".to_string(), 1.0));
}

#[test]
fn test_southern_utm_and_bad_zone() {
    let srs = decode("+proj=utm +zone=56 +south +ellps=GRS80").unwrap();
    assert_eq!(srs.utm_zone(), Some((56, false)));
    assert!(decode("+proj=utm +zone=0 +datum=WGS84").is_err());
}

#[test]
fn test_ellipsoid_forms() {
    let grs80 = decode("+proj=longlat +ellps=GRS80 +no_defs").unwrap();
    assert!(grs80.is_geographic());
    assert_eq!(grs80.datum_name(), Some("unknown"));
    assert_eq!(grs80.get_attr_value("SPHEROID", 0), Some("GRS 1980"));
    assert_eq!(grs80.inv_flattening(), 298.257222101);

    let sphere = decode("+proj=longlat +a=6371007 +b=6371007 +no_defs").unwrap();
    assert_eq!(sphere.semi_major(), 6371007.0);
    assert_eq!(sphere.inv_flattening(), 0.0);

    let radius = decode("+proj=longlat +R=6370997").unwrap();
    assert_eq!(radius.semi_minor(), 6370997.0);

    let clarke = decode("+proj=longlat +a=6378206.4 +b=6356583.8").unwrap();
    assert_close(clarke.inv_flattening(), 294.9786982138982);

    let default = decode("+proj=longlat").unwrap();
    assert_eq!(default.datum_name(), Some("WGS_1984"));
}

#[test]
fn test_invalid_ellipsoids() {
    assert!(matches!(decode("+proj=longlat +ellps=bogus"), Err(SrsError::NotFound(_))));
    assert!(matches!(decode("+proj=longlat +a=6378137"), Err(SrsError::MalformedInput { .. })));
}

#[test]
fn test_invalid_projections() {
    assert!(matches!(decode("+proj=healpix +datum=WGS84"), Err(SrsError::UnsupportedFormat(_))));
    assert!(matches!(decode("+ellps=WGS84"), Err(SrsError::MalformedInput { .. })));
}

#[test]
fn test_named_datum_resolves_registry_system() {
    let srs = decode("+proj=longlat +datum=OSGB36 +no_defs").unwrap();
    assert_eq!(srs.datum_name(), Some("OSGB_1936"));
    assert_eq!(srs.authority_code(Some("DATUM")), Some("6277"));
}

#[test]
fn test_towgs84_terms() {
    let three = decode("+proj=longlat +ellps=intl +towgs84=-87,-98,-121").unwrap();
    assert_eq!(three.towgs84(), Some([-87.0, -98.0, -121.0, 0.0, 0.0, 0.0, 0.0]));

    let seven = decode("+proj=longlat +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489").unwrap();
    assert_eq!(seven.towgs84().map(|t| t[6]), Some(-20.489));

    assert!(decode("+proj=longlat +ellps=intl +towgs84=1,2,3,4,5").is_err());
}

#[test]
fn test_prime_meridians() {
    let paris = decode("+proj=longlat +ellps=clrk80ign +pm=paris").unwrap();
    let (name, offset) = paris.prime_meridian();
    assert_eq!(name, "Paris");
    assert_close(offset, 2.337229166666667);

    let literal = decode("+proj=longlat +ellps=WGS84 +pm=-3d30'").unwrap();
    assert_close(literal.prime_meridian().1, -3.5);

    assert!(decode("+proj=longlat +ellps=WGS84 +pm=atlantis").is_err());
}

#[test]
fn test_feet_rescale_parameters() {
    let srs = decode(
        "+proj=lcc +lat_1=41.03333333333333 +lat_2=40.66666666666666 +lat_0=40.16666666666666 \
         +lon_0=-74 +x_0=300000 +y_0=0 +datum=NAD83 +units=us-ft +no_defs",
    ).unwrap();
    assert_eq!(srs.linear_units().0, "US survey foot");
    assert_close(srs.proj_parm("false_easting").unwrap(), 984250.0);
    assert_close(srs.get_norm_proj_parm("false_easting", 0.0), 300000.0);

    let generic = decode("+proj=tmerc +lon_0=9 +x_0=1000 +ellps=WGS84 +to_meter=2").unwrap();
    assert_eq!(generic.linear_units(), ("unknown".to_string(), 2.0));
    assert_eq!(generic.proj_parm("false_easting"), Some(500.0));
}

#[test]
fn test_lambert_variants() {
    let one = decode("+proj=lcc +lat_1=46.8 +lat_0=46.8 +lon_0=0 +k_0=0.99987742 +ellps=clrk80ign").unwrap();
    assert_eq!(one.projection().map(|p| p.kind()), Some(ProjectionKind::LambertConformalConic1SP));
    assert_eq!(one.proj_parm("scale_factor"), Some(0.99987742));

    let two = decode("+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +ellps=GRS80").unwrap();
    assert_eq!(two.projection().map(|p| p.kind()), Some(ProjectionKind::LambertConformalConic2SP));
}

#[test]
fn test_oblique_mercator_variants() {
    let natural = decode("+proj=omerc +lat_0=45.30916666666666 +lonc=-86 +alpha=337.25556 +k=0.9996 +no_uoff +ellps=GRS80").unwrap();
    assert_eq!(natural.projection_name(), Some("Hotine_Oblique_Mercator"));
    assert_eq!(natural.get_norm_proj_parm("rectified_grid_angle", 0.0), 337.25556);

    let center = decode("+proj=omerc +lat_0=4 +lonc=115 +alpha=53.31582047222222 +gamma=53.13010236111111 +k=0.99984 +ellps=evrst30").unwrap();
    assert_eq!(center.projection_name(), Some("Hotine_Oblique_Mercator_Azimuth_Center"));

    let two_point = decode("+proj=omerc +lat_0=40 +lat_1=30 +lon_1=-100 +lat_2=50 +lon_2=-80 +ellps=WGS84").unwrap();
    assert_eq!(two_point.projection_name(), Some("Hotine_Oblique_Mercator_Two_Point_Natural_Origin"));
}

#[test]
fn test_stereographic_variants() {
    let polar = decode("+proj=stere +lat_0=-90 +lat_ts=-71 +lon_0=0 +k=1 +datum=WGS84").unwrap();
    assert_eq!(polar.projection_name(), Some("Polar_Stereographic"));
    assert_eq!(polar.get_norm_proj_parm("latitude_of_origin", 0.0), -71.0);

    let oblique = decode("+proj=sterea +lat_0=52.15616055555555 +lon_0=5.38763888888889 +k=0.9999079 +ellps=bessel").unwrap();
    assert_eq!(oblique.projection_name(), Some("Oblique_Stereographic"));

    let south = decode("+proj=tmerc +lat_0=0 +lon_0=25 +k=1 +axis=wsu +ellps=WGS84").unwrap();
    assert_eq!(south.projection_name(), Some("Transverse_Mercator_South_Orientated"));
}

#[test]
fn test_dms_parameters() {
    let srs = decode("+proj=tmerc +lat_0=49 +lon_0=2d20'14.025\"E +k=1 +ellps=WGS84").unwrap();
    assert_close(srs.get_norm_proj_parm("central_meridian", 0.0), 2.337229166666667);
}

#[test]
fn test_control_characters_and_init() {
    let srs = decode("+proj=longlat\n+datum=NAD27\r\n+no_defs").unwrap();
    assert_eq!(srs.datum_name(), Some("North_American_Datum_1927"));

    let init = decode("+init=epsg:4326").unwrap();
    assert_eq!(init.authority_code(None), Some("4326"));
    assert!(decode("+init=epsg:abc").is_err());
}

#[test]
fn test_decode_params_ignores_init() {
    let srs = decode_params("+proj=merc +lat_ts=30 +lon_0=0 +datum=WGS84").unwrap();
    assert_eq!(srs.projection_name(), Some("Mercator_2SP"));
    assert_eq!(srs.get_norm_proj_parm("standard_parallel_1", 0.0), 30.0);
}

#[test]
fn test_wagner_variants() {
    let wag3 = decode("+proj=wag3 +lat_ts=20 +ellps=WGS84").unwrap();
    assert_eq!(wag3.projection_name(), Some("Wagner_III"));
    assert_eq!(wag3.get_norm_proj_parm("latitude_of_origin", 0.0), 20.0);
    assert_eq!(decode("+proj=wag7 +ellps=WGS84").unwrap().projection_name(), Some("Wagner_VII"));
}
