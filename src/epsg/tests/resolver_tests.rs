//! Tests for EPSG resolution against the bundled registry

use std::fs;

use crate::epsg::{resolve, towgs84_for_datum};
use crate::registry::Registry;
use crate::srs::{Projection, SpatialReference, SrsError};

fn bundled() -> Registry {
    Registry::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn resolved(code: u32) -> SpatialReference {
    resolve(&bundled(), code).unwrap()
}

#[test]
fn test_short_circuit_codes() {
    let wgs84 = resolved(4326);
    assert!(wgs84.is_geographic());
    assert_eq!(wgs84.datum_name(), Some("WGS_1984"));
    assert_eq!(wgs84.authority_code(Some("GEOGCS")), Some("4326"));

    let wgs72 = resolved(4322);
    assert_eq!(wgs72.towgs84(), Some([0.0, 0.0, 4.5, 0.0, 0.0, 0.554, 0.2263]));
}

#[test]
fn test_geographic_from_tables() {
    let osgb = resolved(4277);
    assert_eq!(osgb.name(), Some("OSGB 1936"));
    assert_eq!(osgb.datum_name(), Some("OSGB_1936"));
    assert_eq!(osgb.semi_major(), 6377563.396);
    assert_eq!(osgb.inv_flattening(), 299.3249646);
    assert_eq!(osgb.towgs84(), Some([446.448, -125.157, 542.06, 0.15, 0.247, 0.842, -20.489]));
    assert_eq!(osgb.authority_code(Some("DATUM")), Some("6277"));
    assert_eq!(osgb.authority_code(Some("SPHEROID")), Some("7001"));
    assert_eq!(osgb.axes("GEOGCS"), vec![
        ("Lat".to_string(), "NORTH".to_string()),
        ("Long".to_string(), "EAST".to_string()),
    ]);
    assert!(osgb.to_wkt().ends_with("AXIS[\"Lat\",NORTH],AXIS[\"Long\",EAST],AUTHORITY[\"EPSG\",4277]]"));
}

#[test]
fn test_inverse_flattening_from_semi_minor() {
    let nad27 = resolve(&bundled(), 4267).unwrap();
    assert!((nad27.inv_flattening() - 294.9786982138982).abs() < 1e-9);

    let carthage = resolved(4223);
    assert!((carthage.inv_flattening() - 293.4660212936269).abs() < 1e-6);
}

#[test]
fn test_override_table_wins() {
    let ed50 = resolved(4230);
    assert_eq!(ed50.towgs84(), Some([-87.0, -98.0, -121.0, 0.0, 0.0, 0.0, 0.0]));
    assert_eq!(towgs84_for_datum(&bundled(), 6230), None);
    assert_eq!(towgs84_for_datum(&bundled(), 6277).map(|v| v[0]), Some(446.448));
}

#[test]
fn test_datum_name_from_datum_table() {
    let etrs89 = resolved(4258);
    assert_eq!(etrs89.datum_name(), Some("European_Terrestrial_Reference_System_1989"));
}

#[test]
fn test_non_greenwich_grad_system() {
    let ntf = resolved(4807);
    let (pm_name, offset) = ntf.prime_meridian();
    assert_eq!(pm_name, "Paris");
    assert!((offset - 2.33722917).abs() < 1e-9);
    assert_eq!(ntf.angular_units().0, "grad");
}

#[test]
fn test_projected_utm() {
    let utm = resolved(32633);
    assert!(utm.is_projected());
    assert_eq!(utm.name(), Some("WGS 84 / UTM zone 33N"));
    assert_eq!(utm.utm_zone(), Some((33, true)));
    assert_eq!(utm.authority_code(None), Some("32633"));
    assert_eq!(utm.authority_code(Some("PROJCS|UNIT")), Some("9001"));
    assert_eq!(utm.axes("PROJCS")[0].0, "Easting");

    let south = resolved(32733);
    assert_eq!(south.utm_zone(), Some((33, false)));
}

#[test]
fn test_projected_child_order() {
    let bng = resolved(27700);
    let kinds: Vec<&str> = bng.root().unwrap().children().iter().map(|c| c.value()).collect();
    assert_eq!(&kinds[..3], &["OSGB 1936 / British National Grid", "GEOGCS", "PROJECTION"]);
    assert_eq!(&kinds[kinds.len() - 4..], &["UNIT", "AXIS", "AXIS", "AUTHORITY"]);
    assert_eq!(bng.proj_parm("scale_factor"), Some(0.9996012717));
    assert_eq!(bng.proj_parm("false_northing"), Some(-100000.0));
}

#[test]
fn test_packed_dms_parameters() {
    let lambert93 = resolved(2154);
    match lambert93.projection() {
        Some(Projection::LambertConformalConic2SP { std_parallel_1, std_parallel_2, center_lat, central_meridian, .. }) => {
            assert_eq!(std_parallel_1, 49.0);
            assert_eq!(std_parallel_2, 44.0);
            assert_eq!(center_lat, 46.5);
            assert_eq!(central_meridian, 3.0);
        },
        other => panic!("unexpected projection {:?}", other),
    }
}

#[test]
fn test_grad_parameters() {
    let tunisia = resolved(22391);
    assert!((tunisia.get_norm_proj_parm("latitude_of_origin", 0.0) - 36.0).abs() < 1e-9);
    assert!((tunisia.get_norm_proj_parm("central_meridian", 0.0) - 9.9).abs() < 1e-9);
}

#[test]
fn test_feet_linear_unit() {
    let long_island = resolved(2263);
    let (name, factor) = long_island.linear_units();
    assert_eq!(name, "US survey foot");
    assert_eq!(factor, 0.3048006096012192);
    assert!((long_island.proj_parm("false_easting").unwrap() - 984250.0).abs() < 1e-6);
    assert!((long_island.get_norm_proj_parm("false_easting", 0.0) - 300000.0).abs() < 1e-6);
}

#[test]
fn test_axis_rows_sorted_by_order() {
    let laea = resolved(3035);
    assert_eq!(laea.axes("PROJCS"), vec![
        ("Northing".to_string(), "NORTH".to_string()),
        ("Easting".to_string(), "EAST".to_string()),
    ]);

    let krovak = resolved(5513);
    assert_eq!(krovak.axes("PROJCS")[0], ("Southing".to_string(), "SOUTH".to_string()));
    assert!((krovak.get_norm_proj_parm("azimuth", 0.0) - 30.28813972222222).abs() < 1e-9);
}

#[test]
fn test_method_variants() {
    assert_eq!(resolved(31300).projection_name(), Some("Lambert_Conformal_Conic_2SP_Belgium"));
    assert_eq!(resolved(3857).projection_name(), Some("Mercator_1SP"));
    assert_eq!(resolved(21781).projection_name(), Some("Swiss_Oblique_Cylindrical"));

    let polar = resolved(3031);
    assert_eq!(polar.projection_name(), Some("Polar_Stereographic"));
    assert_eq!(polar.get_norm_proj_parm("latitude_of_origin", 0.0), -71.0);

    let michigan = resolved(3078);
    assert_eq!(michigan.get_norm_proj_parm("rectified_grid_angle", 0.0), 337.25556);
}

#[test]
fn test_dictionary_fallback() {
    let google = resolved(900913);
    assert_eq!(google.name(), Some("Google Maps Global Mercator"));
    assert_eq!(google.authority_code(None), Some("900913"));

    let popular = resolved(3785);
    assert_eq!(popular.inv_flattening(), 0.0);
}

#[test]
fn test_init_file_fallback() {
    let anguilla = resolved(2000);
    assert_eq!(anguilla.projection_name(), Some("Transverse_Mercator"));
    assert_eq!(anguilla.get_norm_proj_parm("central_meridian", 0.0), -62.0);
    assert_eq!(anguilla.authority_code(None), Some("2000"));
}

#[test]
fn test_unknown_code() {
    assert!(matches!(resolve(&bundled(), 999999), Err(SrsError::NotFound(_))));
}

#[test]
fn test_missing_required_table() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::new(dir.path());
    assert!(matches!(resolve(&registry, 27700), Err(SrsError::MissingRegistryFile(_))));
}

#[test]
fn test_unsupported_method() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gcs.csv"), "COORD_REF_SYS_CODE,COORD_REF_SYS_NAME\n").unwrap();
    fs::write(
        dir.path().join("pcs.csv"),
        "COORD_REF_SYS_CODE,COORD_REF_SYS_NAME,UOM_CODE,SOURCE_GEOGCRS_CODE,COORD_OP_METHOD_CODE\n\
         3993,Guam 1963 / Guam SPCS,9001,4326,9831\n",
    ).unwrap();
    let registry = Registry::new(dir.path());
    assert!(matches!(resolve(&registry, 3993), Err(SrsError::UnsupportedFormat(_))));
}
