//! Tests for unit normalization and its cache

use crate::srs::{GeogCsDef, SpatialReference};
use crate::srs::constants::units;

fn grad_based() -> SpatialReference {
    let mut srs = SpatialReference::new();
    srs.set_geog_cs(
        &GeogCsDef::new("NTF (Paris)", "Nouvelle_Triangulation_Francaise_Paris", "Clarke 1880 (IGN)", 6378249.2, 293.4660212936269)
            .with_prime_meridian("Paris", 2.5969213)
            .with_angular_unit(units::GRAD, units::GRAD_CONV),
    ).unwrap();
    srs
}

#[test]
fn test_ensure_caches_until_invalidated() {
    let mut srs = grad_based();
    let first = srs.ensure_norm_info();
    assert_eq!(first.from_greenwich, 2.5969213);
    assert!((first.to_degrees - 0.9).abs() < 1e-12);
    assert_eq!(first.to_meter, 1.0);

    // Mutable node access drops the cached factors.
    if let Some(primem) = srs.get_attr_node_mut("PRIMEM") {
        primem.child_mut(1).unwrap().set_value("0");
    }
    assert_eq!(srs.norm_info().from_greenwich, 0.0);

    srs.invalidate();
    assert_eq!(srs.ensure_norm_info().from_greenwich, 0.0);
}

#[test]
fn test_angular_parameters_follow_angular_unit() {
    let mut srs = grad_based();
    srs.set_lcc_1sp(46.8, 0.0, 0.99987742, 600000.0, 2200000.0).unwrap();

    assert!((srs.proj_parm("latitude_of_origin").unwrap() - 52.0).abs() < 1e-9);
    assert!((srs.get_norm_proj_parm("latitude_of_origin", 0.0) - 46.8).abs() < 1e-9);
    assert_eq!(srs.proj_parm("scale_factor"), Some(0.99987742));
    assert_eq!(srs.proj_parm("false_easting"), Some(600000.0));
}

#[test]
fn test_meter_units_leave_values_unchanged() {
    let mut srs = SpatialReference::new();
    srs.set_well_known_geog_cs("WGS84").unwrap();
    srs.set_tm(0.0, 9.0, 0.9996, 500000.0, 0.0).unwrap();
    srs.set_linear_units(units::METRE, 1.0).unwrap();

    assert_eq!(srs.get_norm_proj_parm("false_easting", 0.0), 500000.0);
    assert_eq!(srs.get_norm_proj_parm("central_meridian", 0.0), 9.0);
    assert_eq!(srs.get_norm_proj_parm("missing", 42.0), 42.0);
}

#[test]
fn test_unit_change_invalidates_cache() {
    let mut srs = SpatialReference::new();
    srs.set_well_known_geog_cs("WGS84").unwrap();
    srs.set_tm(0.0, 9.0, 1.0, 1000.0, 0.0).unwrap();
    assert_eq!(srs.ensure_norm_info().to_meter, 1.0);

    srs.set_linear_units(units::FOOT, units::FOOT_CONV).unwrap();
    assert_eq!(srs.ensure_norm_info().to_meter, units::FOOT_CONV);
    assert!((srs.get_norm_proj_parm("false_easting", 0.0) - 304.8).abs() < 1e-9);
}
