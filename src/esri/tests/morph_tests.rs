//! Tests for the Esri dialect translation

use crate::epsg::resolve;
use crate::esri::{morph_from_esri, morph_to_esri};
use crate::registry::Registry;
use crate::srs::constants::units;
use crate::srs::{is_angular_parameter, is_linear_parameter, Projection, ProjectionKind, SpatialReference, SrsError};

fn wgs84() -> SpatialReference {
    let mut srs = SpatialReference::new();
    srs.set_well_known_geog_cs("WGS84").unwrap();
    srs
}

fn projected(setup: impl FnOnce(&mut SpatialReference)) -> SpatialReference {
    let mut srs = wgs84();
    setup(&mut srs);
    srs.set_linear_units(units::METRE, 1.0).unwrap();
    srs
}

fn esri_text(srs: &SpatialReference) -> String {
    srs.to_esri_wkt().unwrap()
}

#[test]
fn test_geographic_names_and_metadata() {
    assert_eq!(
        esri_text(&wgs84()),
        "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",6378137,298.257223563]],\
         PRIMEM[\"Greenwich\",0],UNIT[\"Degree\",0.0174532925199433]]"
    );
}

#[test]
fn test_utm_zone_name_and_parameters() {
    let utm = resolve(&Registry::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data")), 32633).unwrap();
    let text = esri_text(&utm);

    assert!(text.starts_with("PROJCS[\"WGS_1984_UTM_Zone_33N\",GEOGCS[\"GCS_WGS_1984\""), "{}", text);
    assert!(text.contains("PROJECTION[\"Transverse_Mercator\"]"), "{}", text);
    assert!(text.contains("PARAMETER[\"Central_Meridian\",15]"), "{}", text);
    assert!(text.contains("PARAMETER[\"Scale_Factor\",0.9996]"), "{}", text);
    assert!(text.ends_with("UNIT[\"Meter\",1]]"), "{}", text);
    assert!(!text.contains("AUTHORITY") && !text.contains("AXIS"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.utm_zone(), Some((33, true)));
    assert_eq!(back.datum_name(), Some("WGS_1984"));
    assert_eq!(back.get_attr_value("GEOGCS", 0), Some("WGS 84"));
    assert_eq!(back.authority_code(None), Some("32633"));
    assert_eq!(back.linear_units().0, "metre");
}

#[test]
fn test_placeholders() {
    let mut srs = SpatialReference::from_wkt(
        "GEOGCS[\"unnamed\",DATUM[\"unknown\",SPHEROID[\"unnamed\",6400000,320]],\
         PRIMEM[\"Greenwich\",0],UNIT[\"degree\",0.0174532925199433]]",
    ).unwrap();
    srs.set_tm(0.0, 9.0, 1.0, 0.0, 0.0).unwrap();

    let text = esri_text(&srs);
    assert!(text.starts_with("PROJCS[\"Unknown\",GEOGCS[\"GCS_Unknown\",DATUM[\"D_Unknown\",SPHEROID[\"Unknown\","), "{}", text);
    assert!(text.ends_with("UNIT[\"Meter\",1]]"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.name(), Some("unnamed"));
    assert_eq!(back.get_attr_value("GEOGCS", 0), Some("unnamed"));
    assert_eq!(back.datum_name(), Some("unknown"));
    assert_eq!(back.get_attr_value("SPHEROID", 0), Some("unnamed"));
}

#[test]
fn test_registry_datum_names() {
    let mut srs = resolve(&Registry::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data")), 4277).unwrap();
    morph_to_esri(&mut srs).unwrap();
    assert_eq!(srs.datum_name(), Some("D_OSGB_1936"));
    assert_eq!(srs.get_attr_value("GEOGCS", 0), Some("GCS_OSGB_1936"));
    assert_eq!(srs.get_attr_value("SPHEROID", 0), Some("Airy_1830"));

    morph_from_esri(&mut srs).unwrap();
    assert_eq!(srs.datum_name(), Some("OSGB_1936"));
    assert_eq!(srs.get_attr_value("GEOGCS", 0), Some("OSGB_1936"));
    assert_eq!(srs.get_attr_value("SPHEROID", 0), Some("Airy 1830"));
}

#[test]
fn test_oblique_mercator_at_ninety_degrees() {
    let srs = projected(|s| s.set_hom(47.0, 8.0, 90.0, 90.0, 1.0, 0.0, 0.0).unwrap());
    let text = esri_text(&srs);
    assert!(text.contains("PROJECTION[\"Hotine_Oblique_Mercator_Azimuth_Center\"]"), "{}", text);
    assert!(!text.contains("Rectified_Grid_Angle"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.projection_name(), Some("Hotine_Oblique_Mercator_Azimuth_Center"));
    assert_eq!(back.proj_parm("rectified_grid_angle"), Some(90.0));

    let natural = projected(|s| s.set_hom(47.0, 8.0, 45.0, 45.0, 1.0, 0.0, 0.0).unwrap());
    assert!(esri_text(&natural).contains("PROJECTION[\"Hotine_Oblique_Mercator_Azimuth_Natural_Origin\"]"));
}

#[test]
fn test_polar_stereographic_variants() {
    let south = projected(|s| s.set_ps(-71.0, 0.0, 1.0, 0.0, 0.0).unwrap());
    let text = esri_text(&south);
    assert!(text.contains("PROJECTION[\"Stereographic_South_Pole\"]"), "{}", text);
    assert!(text.contains("PARAMETER[\"Standard_Parallel_1\",-71]"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.projection_name(), Some("Polar_Stereographic"));
    assert_eq!(back.proj_parm("latitude_of_origin"), Some(-71.0));

    let north = projected(|s| s.set_ps(70.0, -45.0, 1.0, 0.0, 0.0).unwrap());
    assert!(esri_text(&north).contains("PROJECTION[\"Stereographic_North_Pole\"]"));
}

#[test]
fn test_plate_carree() {
    let srs = projected(|s| s.set_equirectangular(0.0, 0.0, 0.0, 0.0, 0.0).unwrap());
    let text = esri_text(&srs);
    assert!(text.contains("PROJECTION[\"Plate_Carree\"]"), "{}", text);
    assert!(!text.contains("Standard_Parallel_1") && !text.contains("Latitude_Of_Origin"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.projection_name(), Some("Equirectangular"));

    let shifted = projected(|s| s.set_equirectangular(0.0, 0.0, 30.0, 0.0, 0.0).unwrap());
    assert!(esri_text(&shifted).contains("PROJECTION[\"Equidistant_Cylindrical\"]"));
}

#[test]
fn test_lambert_parallels_decide_variant() {
    let one = projected(|s| s.set_lcc_1sp(46.8, 2.337229166666667, 0.99987742, 600000.0, 2200000.0).unwrap());
    let text = esri_text(&one);
    assert!(text.contains("PROJECTION[\"Lambert_Conformal_Conic\"]"), "{}", text);
    assert!(text.contains("PARAMETER[\"Standard_Parallel_1\",46.8]"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert_eq!(back.projection_name(), Some("Lambert_Conformal_Conic_1SP"));
    assert_eq!(back.proj_parm("latitude_of_origin"), Some(46.8));
    assert!(back.proj_parm("standard_parallel_1").is_none());

    let two = SpatialReference::from_esri_wkt(
        "PROJCS[\"RGF93_Lambert_93\",GEOGCS[\"GCS_RGF_1993\",DATUM[\"D_RGF_1993\",\
         SPHEROID[\"GRS_1980\",6378137.0,298.257222101]],PRIMEM[\"Greenwich\",0.0],\
         UNIT[\"Degree\",0.0174532925199433]],PROJECTION[\"Lambert_Conformal_Conic\"],\
         PARAMETER[\"False_Easting\",700000.0],PARAMETER[\"False_Northing\",6600000.0],\
         PARAMETER[\"Central_Meridian\",3.0],PARAMETER[\"Standard_Parallel_1\",49.0],\
         PARAMETER[\"Standard_Parallel_2\",44.0],PARAMETER[\"Scale_Factor\",1.0],\
         PARAMETER[\"Latitude_Of_Origin\",46.5],UNIT[\"Meter\",1.0]]",
    ).unwrap();
    assert_eq!(two.projection_name(), Some("Lambert_Conformal_Conic_2SP"));
    assert_eq!(two.datum_name(), Some("Reseau_Geodesique_Francais_1993"));
    assert!(two.proj_parm("scale_factor").is_none());
    assert_eq!(two.proj_parm("standard_parallel_2"), Some(44.0));
}

#[test]
fn test_mercator_scale_factor_decides_variant() {
    let base = "PROJCS[\"World_Mercator\",GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],\
                UNIT[\"Degree\",0.0174532925199433]],PROJECTION[\"Mercator\"],\
                PARAMETER[\"False_Easting\",0.0],PARAMETER[\"False_Northing\",0.0],\
                PARAMETER[\"Central_Meridian\",0.0],PARAMETER[\"Standard_Parallel_1\",0.0]";

    let two = SpatialReference::from_esri_wkt(&format!("{},UNIT[\"Meter\",1.0]]", base)).unwrap();
    assert_eq!(two.projection_name(), Some("Mercator_2SP"));
    assert_eq!(two.proj_parm("standard_parallel_1"), Some(0.0));

    let one = SpatialReference::from_esri_wkt(&format!("{},PARAMETER[\"Scale_Factor\",1.0],UNIT[\"Meter\",1.0]]", base)).unwrap();
    assert_eq!(one.projection_name(), Some("Mercator_1SP"));
    assert_eq!(one.proj_parm("latitude_of_origin"), Some(0.0));
}

#[test]
fn test_krovak_added_parameters() {
    let srs = projected(|s| s.set_krovak(49.5, 24.83333333333333, 30.28813972222222, 78.5, 0.9999, 0.0, 0.0).unwrap());
    let text = esri_text(&srs);
    assert!(text.contains("PARAMETER[\"X_Scale\",1]"), "{}", text);
    assert!(text.contains("PARAMETER[\"XY_Plane_Rotation\",0]"), "{}", text);

    let back = SpatialReference::from_esri_wkt(&text).unwrap();
    assert!(back.proj_parm("X_Scale").is_none());
    assert_eq!(back.proj_parm("pseudo_standard_parallel_1"), Some(78.5));
}

#[test]
fn test_legacy_value_fixups() {
    let srs = SpatialReference::from_esri_wkt(
        "PROJCS[\"Irish_Grid\",GEOGCS[\"GCS_TM65\",DATUM[\"D_TM65\",\
         SPHEROID[\"GRS_1980\",6378137.0,298.2572221008827]],PRIMEM[\"Greenwich\",0.0],\
         UNIT[\"Degree\",0.0174532925199433]],PROJECTION[\"Gauss_Kruger\"],\
         PARAMETER[\"False_Easting\",500000.0],PARAMETER[\"False_Northing\",0.0],\
         PARAMETER[\"Central_Meridian\",-2.999999999999999],PARAMETER[\"Scale_Factor\",0.9996000000000001],\
         PARAMETER[\"Latitude_Of_Origin\",0.0],UNIT[\"Meter\",1.0]]",
    ).unwrap();
    assert_eq!(srs.inv_flattening(), 298.257222101);
    assert_eq!(srs.get_attr_value("SPHEROID", 0), Some("GRS 1980"));
    assert_eq!(srs.datum_name(), Some("TM65"));
    assert_eq!(srs.projection_name(), Some("Transverse_Mercator"));
    assert_eq!(srs.proj_parm("central_meridian"), Some(-3.0));
    assert_eq!(srs.utm_zone(), Some((30, true)));
}

#[test]
fn test_unsupported_roots() {
    let compound = "COMPD_CS[\"x\",GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
                    SPHEROID[\"WGS_1984\",6378137,298.257223563]]],VERT_CS[\"h\"]]";
    assert!(matches!(SpatialReference::from_esri_wkt(compound), Err(SrsError::UnsupportedFormat(_))));

    let wkt = SpatialReference::from_wkt(compound).unwrap();
    assert!(matches!(wkt.to_esri_wkt(), Err(SrsError::UnsupportedFormat(_))));
    assert!(matches!(SpatialReference::new().to_esri_wkt(), Err(SrsError::NotFound(_))));
}

#[test]
fn test_missing_units_are_added() {
    let mut srs = SpatialReference::from_wkt(
        "PROJCS[\"bare\",GEOGCS[\"g\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563]],\
         PRIMEM[\"Greenwich\",0]],PROJECTION[\"Transverse_Mercator\"],PARAMETER[\"central_meridian\",3]]",
    ).unwrap();
    morph_to_esri(&mut srs).unwrap();
    let text = srs.to_wkt();
    assert!(text.contains("UNIT[\"Degree\",0.0174532925199433]"), "{}", text);
    assert!(text.ends_with("UNIT[\"Meter\",1]]"), "{}", text);
}

/// Distinct values for every parameter of a kind; the center variant of the
/// oblique Mercator carries its rectified grid angle as the azimuth
fn sample_projection(kind: ProjectionKind) -> Projection {
    let mut values: Vec<f64> = kind
        .parameter_names()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if is_angular_parameter(name) {
                10.0 + i as f64 * 1.5
            } else if is_linear_parameter(name) {
                1000.0 * (i + 1) as f64
            } else {
                0.9995
            }
        })
        .collect();
    if kind == ProjectionKind::HotineObliqueMercatorAzimuthCenter {
        values[3] = values[2];
    }
    Projection::from_values(kind, &values)
}

#[test]
fn test_every_projection_round_trips() {
    for kind in ProjectionKind::ALL {
        let projection = sample_projection(*kind);
        let srs = projected(|s| s.set_projection(&projection).unwrap());

        let text = esri_text(&srs);
        let back = SpatialReference::from_esri_wkt(&text).unwrap_or_else(|e| panic!("{:?}: {} ({})", kind, e, text));
        let read = back.projection().unwrap_or_else(|| panic!("{:?}: no projection in {}", kind, back.to_wkt()));

        assert_eq!(read.kind(), *kind, "{}", text);
        for (a, b) in projection.values().iter().zip(read.values()) {
            assert!((a - b).abs() < 1e-6, "{:?}: {} != {} in {}", kind, a, b, text);
        }
    }
}
