use log::{debug, info};

use crate::esri::tables::{
    self, ADDED_PARAMETERS, DELETED_PARAMETERS, INV_FLATTENING_FIXUPS, PARAMETER_VALUE_FIXUPS,
    PLATE_CARREE, STEREOGRAPHIC_NORTH_POLE, STEREOGRAPHIC_SOUTH_POLE, UTM_PREFIXES,
};
use crate::srs::constants::{nodes, params as pp, projections as pt, units, UNKNOWN, UNNAMED};
use crate::srs::{ProjectionKind, SpatialReference, SrsError, SrsResult};
use crate::utils::format_utils::nearly_equal;
use crate::utils::string_utils::{massage_name, starts_with_ci};
use crate::wkt::{RemapDirection, RemapTable, WktNode};

/// Roots the Esri dialect can express
const ESRI_ROOTS: &[&str] = &[nodes::GEOGCS, nodes::PROJCS, nodes::LOCAL_CS];

/// Metadata the Esri dialect does not carry
const STRIPPED_NODES: &[&str] = &[nodes::AXIS, nodes::AUTHORITY, nodes::TOWGS84, nodes::EXTENSION];

const ESRI_UNKNOWN: &str = "Unknown";
const ESRI_UNKNOWN_DATUM: &str = "D_Unknown";
const GCS_PREFIX: &str = "GCS_";
const DATUM_PREFIX: &str = "D_";

/// Tolerance for recognizing a 90 degree oblique Mercator azimuth
const AZIMUTH_TOLERANCE: f64 = 0.0001;

fn root_keyword(srs: &SpatialReference) -> SrsResult<String> {
    let keyword = srs
        .root()
        .map(|r| r.value().to_string())
        .ok_or_else(|| SrsError::NotFound("no definition to translate".to_string()))?;

    if !ESRI_ROOTS.iter().any(|k| k.eq_ignore_ascii_case(&keyword)) {
        return Err(SrsError::UnsupportedFormat(format!(
            "{} has no Esri equivalent", keyword
        )));
    }
    Ok(keyword)
}

/// Rewrites the name (first child) of the first `keyword` node
fn rename_node<F>(srs: &mut SpatialReference, keyword: &str, rename: F)
where
    F: FnOnce(&str) -> Option<String>,
{
    let leaf = match srs.get_attr_node_mut(keyword).and_then(|n| n.child_mut(0)) {
        Some(leaf) => leaf,
        None => return,
    };
    if let Some(name) = rename(leaf.value()) {
        if name != leaf.value() {
            debug!("Renamed {} '{}' -> '{}'", keyword, leaf.value(), name);
            leaf.set_value(name);
        }
    }
}

fn remap_all(srs: &mut SpatialReference, anchor: &str, table: &RemapTable, direction: RemapDirection) -> usize {
    srs.root_mut()
        .map(|root| root.apply_remap(Some(anchor), table, direction))
        .unwrap_or(0)
}

fn kind_of(srs: &SpatialReference) -> Option<ProjectionKind> {
    srs.projection_name().and_then(ProjectionKind::from_wkt_name)
}

// ---- OGC -> Esri -----------------------------------------------------------

/// Rewrites an OGC tree into the Esri dialect in place
pub fn morph_to_esri(srs: &mut SpatialReference) -> SrsResult<()> {
    let keyword = root_keyword(srs)?;

    normalize_units(srs, &keyword)?;
    for kind in STRIPPED_NODES {
        srs.strip_nodes(kind);
    }

    let utm_name = srs.utm_zone().map(|(zone, north)| utm_zone_name(srs, zone, north));
    let datum = srs.datum_name().map(str::to_string);

    if srs.is_projected() {
        projection_to_esri(srs)?;
    }

    rename_node(srs, nodes::PROJCS, |name| {
        if let Some(utm) = utm_name {
            Some(utm)
        } else if name.is_empty() || name.eq_ignore_ascii_case(UNNAMED) {
            Some(ESRI_UNKNOWN.to_string())
        } else {
            Some(massage_name(name))
        }
    });

    rename_node(srs, nodes::GEOGCS, |name| {
        tables::GEOGCS.lookup(name, RemapDirection::FromWkt).or_else(|| {
            if starts_with_ci(name, GCS_PREFIX) {
                None
            } else {
                Some(format!("{}{}", GCS_PREFIX, massage_name(name)))
            }
        })
    });

    if let Some(datum) = datum {
        let esri = if datum.eq_ignore_ascii_case(UNKNOWN) {
            ESRI_UNKNOWN_DATUM.to_string()
        } else {
            tables::datum_table()
                .lookup(&datum, RemapDirection::FromWkt)
                .unwrap_or_else(|| {
                    if starts_with_ci(&datum, DATUM_PREFIX) {
                        datum.clone()
                    } else {
                        format!("{}{}", DATUM_PREFIX, massage_name(&datum))
                    }
                })
        };
        rename_node(srs, nodes::DATUM, |_| Some(esri));
    }

    rename_node(srs, nodes::SPHEROID, |name| {
        tables::SPHEROIDS
            .lookup(name, RemapDirection::FromWkt)
            .or_else(|| Some(massage_name(name)))
    });

    remap_all(srs, nodes::UNIT, &tables::UNITS, RemapDirection::FromWkt);

    info!("Morphed {} to Esri dialect", keyword);
    Ok(())
}

/// Adds the default unit where a system has none
fn normalize_units(srs: &mut SpatialReference, keyword: &str) -> SrsResult<()> {
    let missing = |srs: &SpatialReference, owner: &str| {
        srs.get_attr_node(owner).map(|n| n.find_child(nodes::UNIT).is_none()).unwrap_or(false)
    };

    if missing(srs, nodes::GEOGCS) {
        srs.set_angular_units(units::DEGREE, units::DEGREE_CONV)?;
    }
    if !keyword.eq_ignore_ascii_case(nodes::GEOGCS) && missing(srs, keyword) {
        srs.set_linear_units(units::METRE, 1.0)?;
    }
    Ok(())
}

fn utm_zone_name(srs: &SpatialReference, zone: u32, north: bool) -> String {
    let datum = srs.datum_name().unwrap_or("");
    let prefix = UTM_PREFIXES
        .iter()
        .find(|(wkt, _)| wkt.eq_ignore_ascii_case(datum))
        .map(|(_, prefix)| *prefix)
        .unwrap_or("UTM");
    format!("{}_UTM_Zone_{}{}", prefix, zone, if north { "N" } else { "S" })
}

fn projection_to_esri(srs: &mut SpatialReference) -> SrsResult<()> {
    let mut kind = kind_of(srs);

    if kind == Some(ProjectionKind::HotineObliqueMercator)
        && nearly_equal(srs.get_norm_proj_parm(pp::AZIMUTH, 0.0), 90.0, AZIMUTH_TOLERANCE)
        && nearly_equal(srs.get_norm_proj_parm(pp::RECTIFIED_GRID_ANGLE, 90.0), 90.0, AZIMUTH_TOLERANCE)
    {
        srs.set_projection_name(pt::HOTINE_OBLIQUE_MERCATOR_AZIMUTH_CENTER)?;
        kind = Some(ProjectionKind::HotineObliqueMercatorAzimuthCenter);
    }

    let esri_name = match kind {
        Some(ProjectionKind::PolarStereographic) => {
            if srs.get_norm_proj_parm(pp::LATITUDE_OF_ORIGIN, 90.0) > 0.0 {
                Some(STEREOGRAPHIC_NORTH_POLE)
            } else {
                Some(STEREOGRAPHIC_SOUTH_POLE)
            }
        },
        Some(ProjectionKind::Equirectangular)
            if srs.get_norm_proj_parm(pp::LATITUDE_OF_ORIGIN, 0.0) == 0.0
                && srs.get_norm_proj_parm(pp::STANDARD_PARALLEL_1, 0.0) == 0.0 =>
        {
            srs.remove_proj_parm(pp::LATITUDE_OF_ORIGIN);
            srs.remove_proj_parm(pp::STANDARD_PARALLEL_1);
            Some(PLATE_CARREE)
        },
        _ => None,
    };

    if kind == Some(ProjectionKind::LambertConformalConic1SP) {
        let origin = srs.get_proj_parm(pp::LATITUDE_OF_ORIGIN, 0.0);
        srs.set_proj_parm(pp::STANDARD_PARALLEL_1, origin)?;
    }

    for (_, parameter) in DELETED_PARAMETERS.iter().filter(|(k, _)| Some(*k) == kind) {
        srs.remove_proj_parm(parameter);
    }

    remap_all(srs, nodes::PARAMETER, &tables::parameter_table(kind), RemapDirection::FromWkt);

    match esri_name {
        Some(name) => srs.set_projection_name(name)?,
        None => {
            remap_all(srs, nodes::PROJECTION, &tables::PROJECTIONS, RemapDirection::FromWkt);
        },
    }

    for (_, parameter, value) in ADDED_PARAMETERS.iter().filter(|(k, _, _)| Some(*k) == kind) {
        srs.set_proj_parm(parameter, *value)?;
    }
    Ok(())
}

// ---- Esri -> OGC -----------------------------------------------------------

/// Rewrites an Esri-dialect tree into OGC names in place
pub fn morph_from_esri(srs: &mut SpatialReference) -> SrsResult<()> {
    let keyword = root_keyword(srs)?;

    fix_inv_flattening(srs);

    rename_node(srs, nodes::PROJCS, |name| {
        if name.eq_ignore_ascii_case(ESRI_UNKNOWN) { Some(UNNAMED.to_string()) } else { None }
    });

    rename_node(srs, nodes::GEOGCS, |name| {
        tables::GEOGCS.lookup(name, RemapDirection::ToWkt).or_else(|| {
            if starts_with_ci(name, GCS_PREFIX) {
                Some(name[GCS_PREFIX.len()..].to_string())
            } else {
                None
            }
        })
    });

    rename_node(srs, nodes::DATUM, |name| {
        if name.eq_ignore_ascii_case(ESRI_UNKNOWN_DATUM) {
            return Some(UNKNOWN.to_string());
        }
        tables::datum_table().lookup(name, RemapDirection::ToWkt).or_else(|| {
            if starts_with_ci(name, DATUM_PREFIX) {
                Some(name[DATUM_PREFIX.len()..].to_string())
            } else {
                None
            }
        })
    });

    rename_node(srs, nodes::SPHEROID, |name| tables::SPHEROIDS.lookup(name, RemapDirection::ToWkt));

    remap_all(srs, nodes::UNIT, &tables::UNITS, RemapDirection::ToWkt);

    if srs.is_projected() {
        projection_from_esri(srs)?;
    }

    srs.fixup_ordering();
    srs.auto_identify_epsg();
    info!("Morphed {} from Esri dialect", keyword);
    Ok(())
}

fn fix_inv_flattening(srs: &mut SpatialReference) {
    let leaf = match srs.get_attr_node_mut(nodes::SPHEROID).and_then(|s| s.child_mut(2)) {
        Some(leaf) => leaf,
        None => return,
    };
    if let Some((_, value)) = INV_FLATTENING_FIXUPS.iter().find(|(legacy, _)| leaf.value().starts_with(legacy)) {
        debug!("Inverse flattening {} read as {}", leaf.value(), value);
        leaf.set_value(*value);
    }
}

fn projection_from_esri(srs: &mut SpatialReference) -> SrsResult<()> {
    let esri_name = match srs.projection_name() {
        Some(name) => name.to_string(),
        None => return Ok(()),
    };

    let mut name = if esri_name.eq_ignore_ascii_case(STEREOGRAPHIC_NORTH_POLE)
        || esri_name.eq_ignore_ascii_case(STEREOGRAPHIC_SOUTH_POLE)
    {
        pt::POLAR_STEREOGRAPHIC.to_string()
    } else {
        tables::PROJECTIONS
            .lookup(&esri_name, RemapDirection::ToWkt)
            .unwrap_or_else(|| esri_name.clone())
    };

    if name.eq_ignore_ascii_case(pt::LAMBERT_CONFORMAL_CONIC_1SP) {
        let two_parallels = match (srs.proj_parm("Standard_Parallel_1"), srs.proj_parm("Standard_Parallel_2")) {
            (Some(first), Some(second)) => first != second,
            _ => false,
        };
        if two_parallels {
            name = pt::LAMBERT_CONFORMAL_CONIC_2SP.to_string();
        }
    } else if name.eq_ignore_ascii_case(pt::MERCATOR_1SP) && srs.proj_parm("Scale_Factor").is_none() {
        name = pt::MERCATOR_2SP.to_string();
    }

    srs.set_projection_name(&name)?;
    let kind = kind_of(srs);

    for (_, parameter, _) in ADDED_PARAMETERS.iter().filter(|(k, _, _)| Some(*k) == kind) {
        srs.remove_proj_parm(parameter);
    }

    remap_all(srs, nodes::PARAMETER, &tables::parameter_table(kind), RemapDirection::ToWkt);

    match kind {
        Some(ProjectionKind::LambertConformalConic1SP) => {
            if srs.proj_parm(pp::LATITUDE_OF_ORIGIN).is_none() {
                if let Some(parallel) = srs.proj_parm(pp::STANDARD_PARALLEL_1) {
                    srs.set_proj_parm(pp::LATITUDE_OF_ORIGIN, parallel)?;
                }
            }
            srs.remove_proj_parm(pp::STANDARD_PARALLEL_1);
            srs.remove_proj_parm(pp::STANDARD_PARALLEL_2);
        },
        Some(ProjectionKind::LambertConformalConic2SP) => {
            if srs.proj_parm(pp::SCALE_FACTOR) == Some(1.0) {
                srs.remove_proj_parm(pp::SCALE_FACTOR);
            }
        },
        Some(ProjectionKind::HotineObliqueMercatorAzimuthCenter) => {
            if srs.proj_parm(pp::RECTIFIED_GRID_ANGLE).is_none() {
                let azimuth = srs.get_proj_parm(pp::AZIMUTH, 0.0);
                srs.set_proj_parm(pp::RECTIFIED_GRID_ANGLE, azimuth)?;
            }
        },
        _ => {},
    }

    if let Some(root) = srs.root_mut() {
        fix_parameter_values(root, &name);
    }
    Ok(())
}

/// Replaces known rounding artifacts in parameter values
fn fix_parameter_values(projcs: &mut WktNode, projection: &str) {
    for (_, parameter, legacy, value) in PARAMETER_VALUE_FIXUPS
        .iter()
        .filter(|(p, _, _, _)| p.eq_ignore_ascii_case(projection))
    {
        for index in 0..projcs.child_count() {
            let node = match projcs.child_mut(index) {
                Some(n) if n.value().eq_ignore_ascii_case(nodes::PARAMETER) => n,
                _ => continue,
            };
            let matches = node.child_value(0).map(|n| n.eq_ignore_ascii_case(parameter)).unwrap_or(false)
                && node.child_value(1) == Some(*legacy);
            if matches {
                if let Some(leaf) = node.child_mut(1) {
                    leaf.set_value(*value);
                }
            }
        }
    }
}
