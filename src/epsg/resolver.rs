//! EPSG code resolution
//!
//! Assembles a definition from the registry tables. Geographic codes join
//! datum, ellipsoid, prime meridian and unit rows; projected codes resolve
//! their source geographic system and translate up to seven parameter
//! slots through the operation method. When the tables cannot produce a
//! definition the WKT dictionary and then the Proj4 init file are tried.

use std::collections::HashMap;
use std::sync::Arc;
use log::{debug, info, warn};

use crate::epsg::codes::projection_for_method;
use crate::epsg::units::{self, UnitFamily};
use crate::registry::{files, CompareMode, Registry, Row, Table};
use crate::srs::constants::{nodes, units as unit_names};
use crate::srs::errors::{SrsError, SrsResult};
use crate::srs::well_known::well_known_epsg;
use crate::srs::{GeogCsDef, SpatialReference};
use crate::utils::format_utils::{atof, atoi};
use crate::utils::string_utils::massage_name;

/// Number of parameter slots in a projected row
const PARAMETER_SLOTS: usize = 7;

/// Greenwich prime meridian code
const GREENWICH: u32 = 8901;

/// Resolves an EPSG code into a complete definition
pub fn resolve(registry: &Registry, code: u32) -> SrsResult<SpatialReference> {
    if let Some(gcs) = well_known_epsg(code) {
        debug!("EPSG:{} resolved from built-in definitions", code);
        return Ok(SpatialReference::from_root(gcs?));
    }

    let primary = resolve_from_tables(registry, code);
    match primary {
        Ok(Some(srs)) => return Ok(srs),
        Ok(None) => debug!("EPSG:{} not found in registry tables", code),
        Err(ref e) => warn!("EPSG:{} could not be assembled from registry tables: {}", code, e),
    }

    if let Some(srs) = resolve_from_dictionary(registry, code) {
        return Ok(srs);
    }
    if let Some(srs) = resolve_from_init_file(registry, code) {
        return Ok(srs);
    }

    match primary {
        Err(e) => Err(e),
        Ok(_) => Err(SrsError::NotFound(format!("EPSG:{}", code))),
    }
}

fn resolve_from_tables(registry: &Registry, code: u32) -> SrsResult<Option<SpatialReference>> {
    if let Some(srs) = resolve_geographic(registry, code)? {
        return Ok(Some(srs));
    }
    resolve_projected(registry, code)
}

/// Looks a code up in an optional override table, then the required table
fn find_row(registry: &Registry, override_file: &str, file: &str, code: u32) -> SrsResult<Option<(Row, Arc<Table>)>> {
    let key = code.to_string();
    if let Some(table) = registry.find_table(override_file) {
        if let Some(row) = table.scan("COORD_REF_SYS_CODE", &key, CompareMode::Integer) {
            debug!("EPSG:{} taken from {}", code, override_file);
            return Ok(Some((row, table)));
        }
    }
    let table = registry.table(file)?;
    Ok(table.scan("COORD_REF_SYS_CODE", &key, CompareMode::Integer).map(|row| (row, table.clone())))
}

fn field_code(table: &Table, row: &Row, column: &str) -> u32 {
    u32::try_from(atoi(table.field(row, column))).unwrap_or(0)
}

// ---- geographic ---------------------------------------------------------

fn resolve_geographic(registry: &Registry, code: u32) -> SrsResult<Option<SpatialReference>> {
    let (row, table) = match find_row(registry, files::GCS_OVERRIDE, files::GCS, code)? {
        Some(found) => found,
        None => return Ok(None),
    };

    let name = table.field(&row, "COORD_REF_SYS_NAME").to_string();
    let datum_code = field_code(&table, &row, "DATUM_CODE");
    let ellipsoid_code = field_code(&table, &row, "ELLIPSOID_CODE");
    let pm_code = field_code(&table, &row, "PRIME_MERIDIAN_CODE");
    let uom_code = field_code(&table, &row, "UOM_CODE");
    let cs_code = field_code(&table, &row, "COORD_SYS_CODE");

    let datum_name = match table.field(&row, "DATUM_NAME") {
        "" => datum_name(registry, datum_code)?,
        named => massage_name(named),
    };
    let (spheroid, semi_major, inv_flattening) = ellipsoid(registry, ellipsoid_code)?;
    let (pm_name, pm_offset) = prime_meridian(registry, pm_code)?;
    let (angular_name, angular_conv) = units::angular_unit(registry, uom_code)
        .ok_or_else(|| SrsError::NotFound(format!("angular unit {} of EPSG:{}", uom_code, code)))?;

    let mut srs = SpatialReference::new();
    srs.set_geog_cs(
        &GeogCsDef::new(&name, &datum_name, &spheroid, semi_major, inv_flattening)
            .with_prime_meridian(&pm_name, pm_offset)
            .with_angular_unit(&angular_name, angular_conv),
    )?;

    if let Some(towgs84) = bursa_wolf(&table, &row) {
        srs.set_towgs84(towgs84)?;
    }

    srs.set_authority(nodes::SPHEROID, "EPSG", ellipsoid_code)?;
    srs.set_authority(nodes::DATUM, "EPSG", datum_code)?;
    srs.set_authority(nodes::PRIMEM, "EPSG", pm_code)?;
    srs.set_authority("GEOGCS|UNIT", "EPSG", uom_code)?;

    if let Some((first, second)) = axes(registry, cs_code) {
        srs.set_axes(nodes::GEOGCS, (&first.0, &first.1), (&second.0, &second.1))?;
    }
    srs.set_authority(nodes::GEOGCS, "EPSG", code)?;

    info!("Resolved EPSG:{} ({})", code, name);
    Ok(Some(srs))
}

/// Seven Bursa-Wolf terms of a `gcs.csv` row; missing rotations and scale
/// count as zero. `None` when no translation is given.
fn bursa_wolf(table: &Table, row: &Row) -> Option<[f64; 7]> {
    if table.field(row, "DX").trim().is_empty() {
        return None;
    }
    let mut values = [0.0; 7];
    for (slot, column) in values.iter_mut().zip(["DX", "DY", "DZ", "RX", "RY", "RZ", "DS"]) {
        *slot = atof(table.field(row, column));
    }
    Some(values)
}

/// Bursa-Wolf terms registered for a datum code
pub fn towgs84_for_datum(registry: &Registry, datum_code: u32) -> Option<[f64; 7]> {
    let table = registry.find_table(files::GCS)?;
    let row = table.scan("DATUM_CODE", &datum_code.to_string(), CompareMode::Integer)?;
    bursa_wolf(&table, &row)
}

fn datum_name(registry: &Registry, datum_code: u32) -> SrsResult<String> {
    let table = registry.table(files::DATUM)?;
    let row = table
        .scan("DATUM_CODE", &datum_code.to_string(), CompareMode::Integer)
        .ok_or_else(|| SrsError::NotFound(format!("datum {}", datum_code)))?;
    Ok(massage_name(table.field(&row, "DATUM_NAME")))
}

/// Name, semi-major axis in meters and inverse flattening of an ellipsoid
fn ellipsoid(registry: &Registry, code: u32) -> SrsResult<(String, f64, f64)> {
    let table = registry.table(files::ELLIPSOID)?;
    let row = table
        .scan("ELLIPSOID_CODE", &code.to_string(), CompareMode::Integer)
        .ok_or_else(|| SrsError::NotFound(format!("ellipsoid {}", code)))?;

    let uom = field_code(&table, &row, "UOM_CODE");
    let semi_major = units::length_to_meters(registry, table.field(&row, "SEMI_MAJOR_AXIS"), uom);

    let inv_flattening = match table.field(&row, "INV_FLATTENING").trim() {
        "" => {
            let semi_minor = units::length_to_meters(registry, table.field(&row, "SEMI_MINOR_AXIS"), uom);
            if semi_minor == 0.0 || semi_major == semi_minor {
                0.0
            } else {
                semi_major / (semi_major - semi_minor)
            }
        },
        text => atof(text),
    };
    Ok((table.field(&row, "ELLIPSOID_NAME").to_string(), semi_major, inv_flattening))
}

/// Name and offset in degrees of a prime meridian
fn prime_meridian(registry: &Registry, code: u32) -> SrsResult<(String, f64)> {
    if code == GREENWICH {
        return Ok(("Greenwich".to_string(), 0.0));
    }
    let table = registry.table(files::PRIME_MERIDIAN)?;
    let row = table
        .scan("PRIME_MERIDIAN_CODE", &code.to_string(), CompareMode::Integer)
        .ok_or_else(|| SrsError::NotFound(format!("prime meridian {}", code)))?;
    let uom = field_code(&table, &row, "UOM_CODE");
    Ok((
        table.field(&row, "PRIME_MERIDIAN_NAME").to_string(),
        units::angle_to_degrees(registry, table.field(&row, "GREENWICH_LONGITUDE"), uom),
    ))
}

type Axis = (String, String);

/// Axis pair of a coordinate system code.
///
/// Geographic (64xx) and projected (44xx) codes are answered without the
/// table; others read two adjacent rows ordered by `COORD_AXIS_ORDER`.
fn axes(registry: &Registry, cs_code: u32) -> Option<(Axis, Axis)> {
    let pair = |a: &str, ao: &str, b: &str, bo: &str| {
        Some(((a.to_string(), ao.to_string()), (b.to_string(), bo.to_string())))
    };
    match cs_code {
        0 => None,
        6400..=6499 => pair("Lat", "NORTH", "Long", "EAST"),
        4400..=4499 => pair("Easting", "EAST", "Northing", "NORTH"),
        _ => {
            let table = registry.find_table(files::COORDINATE_AXIS)?;
            let key = cs_code.to_string();
            let first = table.scan("COORD_SYS_CODE", &key, CompareMode::Integer)?;
            let second = table.next_line()?;
            if atoi(table.field(&second, "COORD_SYS_CODE")) != i64::from(cs_code) {
                debug!("Coordinate system {} has a single axis row", cs_code);
                return None;
            }

            let axis = |row: &Row| (
                table.field(row, "COORD_AXIS_NAME").to_string(),
                table.field(row, "COORD_AXIS_ORIENTATION").to_ascii_uppercase(),
            );
            let order = |row: &Row| atoi(table.field(row, "COORD_AXIS_ORDER"));
            if order(&first) <= order(&second) {
                Some((axis(&first), axis(&second)))
            } else {
                Some((axis(&second), axis(&first)))
            }
        },
    }
}

// ---- projected ----------------------------------------------------------

fn resolve_projected(registry: &Registry, code: u32) -> SrsResult<Option<SpatialReference>> {
    let (row, table) = match find_row(registry, files::PCS_OVERRIDE, files::PCS, code)? {
        Some(found) => found,
        None => return Ok(None),
    };

    let name = table.field(&row, "COORD_REF_SYS_NAME").to_string();
    let source_code = field_code(&table, &row, "SOURCE_GEOGCRS_CODE");
    let uom_code = field_code(&table, &row, "UOM_CODE");
    let method_code = field_code(&table, &row, "COORD_OP_METHOD_CODE");
    let cs_code = field_code(&table, &row, "COORD_SYS_CODE");

    let geog = resolve(registry, source_code)?;
    if !geog.is_geographic() {
        return Err(SrsError::UnsupportedFormat(format!(
            "source system EPSG:{} of EPSG:{} is not geographic", source_code, code
        )));
    }

    let slots = parameter_slots(registry, &table, &row);
    let value = |param: u32, default: f64| slots.get(&param).copied().unwrap_or(default);
    let projection = projection_for_method(method_code, &value).ok_or_else(|| {
        SrsError::UnsupportedFormat(format!("operation method {} of EPSG:{}", method_code, code))
    })?;

    let mut srs = SpatialReference::new();
    srs.set_proj_cs(&name)?;
    srs.copy_geog_cs_from(&geog)?;

    let (unit_name, to_meters) = units::linear_unit(registry, uom_code)
        .unwrap_or_else(|| (unit_names::METRE.to_string(), 1.0));
    srs.set_linear_units(&unit_name, to_meters)?;
    srs.set_projection(&projection)?;
    srs.set_authority("PROJCS|UNIT", "EPSG", uom_code)?;

    if let Some((first, second)) = axes(registry, cs_code) {
        srs.set_axes(nodes::PROJCS, (&first.0, &first.1), (&second.0, &second.1))?;
    }
    srs.set_authority(nodes::PROJCS, "EPSG", code)?;
    srs.fixup_ordering();

    info!("Resolved EPSG:{} ({})", code, name);
    Ok(Some(srs))
}

/// Normalized parameter values keyed by parameter code
fn parameter_slots(registry: &Registry, table: &Table, row: &Row) -> HashMap<u32, f64> {
    let mut slots = HashMap::new();
    for n in 1..=PARAMETER_SLOTS {
        let param = field_code(table, row, &format!("PARAMETER_CODE_{}", n));
        if param == 0 {
            continue;
        }
        let text = table.field(row, &format!("PARAMETER_VALUE_{}", n));
        let uom = field_code(table, row, &format!("PARAMETER_UOM_{}", n));

        let value = match UnitFamily::of(uom) {
            UnitFamily::Angular => units::angle_to_degrees(registry, text, uom),
            UnitFamily::Linear => units::length_to_meters(registry, text, uom),
            UnitFamily::Scale | UnitFamily::Other => atof(text),
        };
        slots.insert(param, value);
    }
    slots
}

// ---- fallbacks ----------------------------------------------------------

fn resolve_from_dictionary(registry: &Registry, code: u32) -> Option<SpatialReference> {
    let wkt = registry.dictionary_wkt(code)?;
    match SpatialReference::from_wkt(&wkt) {
        Ok(mut srs) => {
            debug!("EPSG:{} resolved from WKT dictionary", code);
            attach_root_authority(&mut srs, code);
            Some(srs)
        },
        Err(e) => {
            warn!("Dictionary entry for EPSG:{} is not valid WKT: {}", code, e);
            None
        },
    }
}

fn resolve_from_init_file(registry: &Registry, code: u32) -> Option<SpatialReference> {
    let params = registry.proj4_init(code)?;
    match crate::proj4::decode_params(&params) {
        Ok(mut srs) => {
            debug!("EPSG:{} resolved from Proj4 init file", code);
            attach_root_authority(&mut srs, code);
            Some(srs)
        },
        Err(e) => {
            warn!("Init entry for EPSG:{} could not be decoded: {}", code, e);
            None
        },
    }
}

fn attach_root_authority(srs: &mut SpatialReference, code: u32) {
    if srs.authority_code(None).is_some() {
        return;
    }
    let kind = match srs.root() {
        Some(root) => root.value().to_string(),
        None => return,
    };
    if let Err(e) = srs.set_authority(&kind, "EPSG", code) {
        warn!("Unable to attach authority to EPSG:{}: {}", code, e);
    }
}
