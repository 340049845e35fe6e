//! Integration tests for conversions across notations

use std::fs;

use crskit::{CrsKit, InputFormat, OutputFormat, SpatialReference, SrsError, WktNode};
use crskit::api::{describe, parse_input, render};

#[test]
fn test_epsg_to_every_notation() {
    let utm = SpatialReference::from_user_input("EPSG:32633").unwrap();

    let proj4 = render(&utm, OutputFormat::Proj4).unwrap();
    assert!(proj4.starts_with("+proj=utm +zone=33 +datum=WGS84"), "{}", proj4);

    let wkt = render(&utm, OutputFormat::Wkt).unwrap();
    assert!(wkt.starts_with("PROJCS[\"WGS 84 / UTM zone 33N\""), "{}", wkt);
    assert!(wkt.ends_with("AUTHORITY[\"EPSG\",32633]]"), "{}", wkt);

    let pretty = render(&utm, OutputFormat::Pretty).unwrap();
    assert!(pretty.lines().count() > 10);
    assert_eq!(WktNode::parse(&pretty).unwrap().to_wkt(), wkt);

    let esri = render(&utm, OutputFormat::Esri).unwrap();
    assert!(esri.starts_with("PROJCS[\"WGS_1984_UTM_Zone_33N\""), "{}", esri);
}

#[test]
fn test_proj4_round_trip_keeps_parameters() {
    let text = "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 +y_0=6600000 +ellps=GRS80 +units=m +no_defs";
    let srs = SpatialReference::from_proj4(text).unwrap();
    assert_eq!(srs.projection_name(), Some("Lambert_Conformal_Conic_2SP"));

    let wkt = srs.to_wkt();
    let reparsed = SpatialReference::from_wkt(&wkt).unwrap();
    let again = SpatialReference::from_proj4(&reparsed.to_proj4().unwrap()).unwrap();
    assert_eq!(again.projection(), srs.projection());
    assert_eq!(again.semi_major(), 6378137.0);
    assert!((again.inv_flattening() - 298.257222101).abs() < 1e-9);
}

#[test]
fn test_esri_import_identifies_epsg_code() {
    let esri = "PROJCS[\"WGS_1984_UTM_Zone_33N\",GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                SPHEROID[\"WGS_1984\",6378137,298.257223563]],PRIMEM[\"Greenwich\",0],\
                UNIT[\"Degree\",0.0174532925199433]],PROJECTION[\"Transverse_Mercator\"],\
                PARAMETER[\"False_Easting\",500000],PARAMETER[\"False_Northing\",0],\
                PARAMETER[\"Central_Meridian\",15],PARAMETER[\"Scale_Factor\",0.9996],\
                PARAMETER[\"Latitude_Of_Origin\",0],UNIT[\"Meter\",1]]";

    let srs = parse_input(esri, InputFormat::Esri).unwrap();
    assert_eq!(srs.utm_zone(), Some((33, true)));
    assert_eq!(srs.datum_name(), Some("WGS_1984"));
    assert_eq!(srs.authority_code(None), Some("32633"));
    assert_eq!(srs.proj_parm("central_meridian"), Some(15.0));

    let prefixed = SpatialReference::from_user_input(&format!("ESRI::{}", esri)).unwrap();
    assert_eq!(prefixed.to_wkt(), srs.to_wkt());
}

#[test]
fn test_registry_system_through_esri_and_back() {
    let bng = SpatialReference::from_epsg(27700).unwrap();
    let esri = bng.to_esri_wkt().unwrap();
    assert!(esri.contains("GEOGCS[\"GCS_OSGB_1936\",DATUM[\"D_OSGB_1936\""), "{}", esri);
    assert!(!esri.contains("TOWGS84"), "{}", esri);

    let back = SpatialReference::from_esri_wkt(&esri).unwrap();
    assert_eq!(back.datum_name(), Some("OSGB_1936"));
    assert_eq!(back.projection_name(), Some("Transverse_Mercator"));
    assert_eq!(back.proj_parm("scale_factor"), Some(0.9996012717));
    assert_eq!(back.proj_parm("false_northing"), Some(-100000.0));
}

#[test]
fn test_facade_and_summary() {
    let kit = CrsKit::new(None).unwrap();
    assert_eq!(
        kit.convert("4326", InputFormat::Auto, OutputFormat::Proj4).unwrap(),
        "+proj=longlat +datum=WGS84 +no_defs"
    );

    let summary = kit.describe("EPSG:27700", InputFormat::Epsg).unwrap();
    assert!(summary.contains("Kind: Projected"), "{}", summary);
    assert!(summary.contains("Name: OSGB 1936 / British National Grid"), "{}", summary);
    assert!(summary.contains("Authority: EPSG:27700"), "{}", summary);
    assert!(summary.contains("Projection: Transverse_Mercator"), "{}", summary);

    let local = SpatialReference::from_wkt("LOCAL_CS[\"site grid\",UNIT[\"metre\",1]]").unwrap();
    assert!(describe(&local).contains("Kind: Local"));
}

#[test]
fn test_failures_are_reported() {
    assert!(matches!(SpatialReference::from_user_input("EPSG:999999"), Err(SrsError::NotFound(_))));
    assert!(matches!(
        SpatialReference::from_wkt("GEOGCS[\"broken\""),
        Err(SrsError::MalformedInput { .. })
    ));
    assert!(matches!(
        parse_input("COMPD_CS[\"x\"]", InputFormat::Esri),
        Err(SrsError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        SpatialReference::from_proj4("+proj=healpix +datum=WGS84"),
        Err(SrsError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_file_input_with_conversion_log() {
    let dir = tempfile::tempdir().unwrap();
    let definition = dir.path().join("utm.prj");
    fs::write(&definition, "+proj=utm +zone=56 +south +ellps=GRS80 +units=m +no_defs\n").unwrap();
    let log = dir.path().join("crskit.log");

    let kit = CrsKit::new(log.to_str()).unwrap();
    let wkt = kit
        .convert(&format!("@{}", definition.display()), InputFormat::Proj4, OutputFormat::Wkt)
        .unwrap();
    let srs = SpatialReference::from_wkt(&wkt).unwrap();
    assert_eq!(srs.utm_zone(), Some((56, false)));

    let logged = fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Converted to wkt:"), "{}", logged);
    assert!(logged.contains("utm.prj"), "{}", logged);
}
