//! Proj4 string decoding

use log::{debug, info, warn};

use crate::proj4::dms::parse_dms;
use crate::proj4::tables;
use crate::registry::Registry;
use crate::srs::constants::{nodes, units, UNKNOWN, UNNAMED};
use crate::srs::errors::{SrsError, SrsResult};
use crate::srs::{GeogCsDef, SpatialReference};
use crate::utils::format_utils::{atof, atoi, format_number};
use crate::utils::string_utils::strip_control_chars;

/// Marker of an EPSG init reference inside a Proj4 string
const INIT_EPSG: &str = "init=epsg:";

/// `key=value` pairs of a Proj4 string in order of appearance
#[derive(Debug, Clone, Default)]
pub struct Proj4Params {
    pairs: Vec<(String, String)>,
}

impl Proj4Params {
    /// Splits on `+` and whitespace; a bare flag becomes `flag=yes`
    pub fn parse(text: &str) -> Self {
        let pairs = text
            .split(|c: char| c == '+' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (token.to_string(), "yes".to_string()),
            })
            .collect();
        Proj4Params { pairs }
    }

    /// First value given for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Plain number, or `default` when absent
    pub fn number(&self, key: &str, default: f64) -> f64 {
        self.get(key).map(atof).unwrap_or(default)
    }

    /// Angle in decimal degrees, accepting DMS notation
    pub fn angle(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(text) => parse_dms(text).unwrap_or_else(|| atof(text)),
            None => default,
        }
    }

    /// Scale factor from `k` or `k_0`
    fn scale(&self) -> f64 {
        self.get("k")
            .or_else(|| self.get("k_0"))
            .map(atof)
            .unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Decodes a Proj4 string, following `+init=epsg:<code>` references
pub fn decode(text: &str) -> SrsResult<SpatialReference> {
    let clean = strip_control_chars(text);

    if let Some(position) = clean.to_ascii_lowercase().find(INIT_EPSG) {
        let code = atoi(&clean[position + INIT_EPSG.len()..]);
        let code = u32::try_from(code)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| SrsError::malformed(format!("invalid init reference in '{}'", clean.trim())))?;
        debug!("Proj4 string refers to EPSG:{}", code);
        return crate::epsg::resolve(&Registry::global(), code);
    }

    decode_params(&clean)
}

/// Decodes a Proj4 parameter list without `+init` handling
pub fn decode_params(text: &str) -> SrsResult<SpatialReference> {
    let params = Proj4Params::parse(text);
    let proj = params
        .get("proj")
        .ok_or_else(|| SrsError::malformed(format!("no +proj in '{}'", text.trim())))?;

    let mut srs = SpatialReference::new();
    let projected = set_projection(&mut srs, proj, &params)?;

    set_geographic(&mut srs, &params)?;

    if let Some(text) = params.get("pm") {
        set_prime_meridian(&mut srs, text)?;
    }
    if let Some(text) = params.get("towgs84") {
        srs.set_towgs84(parse_towgs84(text)?)?;
    }
    if projected {
        set_units(&mut srs, &params)?;
    }

    srs.fixup_ordering();
    info!("Decoded Proj4 definition (+proj={})", proj);
    Ok(srs)
}

/// Installs the projection named by `+proj`; `false` for geographic systems
fn set_projection(srs: &mut SpatialReference, proj: &str, p: &Proj4Params) -> SrsResult<bool> {
    let lat_0 = p.angle("lat_0", 0.0);
    let lon_0 = p.angle("lon_0", 0.0);
    let x_0 = p.number("x_0", 0.0);
    let y_0 = p.number("y_0", 0.0);

    match proj {
        "longlat" | "latlong" | "lonlat" | "latlon" => return Ok(false),
        "utm" => {
            let zone = u32::try_from(atoi(p.get("zone").unwrap_or(""))).unwrap_or(0);
            srs.set_utm(zone, !p.has("south"))?;
        },
        "tmerc" | "etmerc" => {
            if p.get("axis") == Some("wsu") {
                srs.set_tmso(lat_0, lon_0, p.scale(), x_0, y_0)?;
            } else {
                srs.set_tm(lat_0, lon_0, p.scale(), x_0, y_0)?;
            }
        },
        "merc" => match p.get("lat_ts") {
            Some(_) => srs.set_mercator_2sp(p.angle("lat_ts", 0.0), lat_0, lon_0, x_0, y_0)?,
            None => srs.set_mercator(lat_0, lon_0, p.scale(), x_0, y_0)?,
        },
        "stere" if (lat_0.abs() - 90.0).abs() < 1e-8 => {
            srs.set_ps(p.angle("lat_ts", lat_0), lon_0, p.scale(), x_0, y_0)?;
        },
        "stere" => srs.set_stereographic(lat_0, lon_0, p.scale(), x_0, y_0)?,
        "sterea" => srs.set_os(lat_0, lon_0, p.scale(), x_0, y_0)?,
        "lcc" => {
            // 1SP is written as lat_1 == lat_0 with no lat_2
            let lat_1 = p.angle("lat_1", lat_0);
            if !p.has("lat_2") && lat_1 == lat_0 {
                srs.set_lcc_1sp(lat_0, lon_0, p.scale(), x_0, y_0)?;
            } else {
                srs.set_lcc(lat_1, p.angle("lat_2", lat_1), lat_0, lon_0, x_0, y_0)?;
            }
        },
        "aea" => srs.set_acea(p.angle("lat_1", 0.0), p.angle("lat_2", 0.0), lat_0, lon_0, x_0, y_0)?,
        "eqdc" => srs.set_ec(p.angle("lat_1", 0.0), p.angle("lat_2", 0.0), lat_0, lon_0, x_0, y_0)?,
        "aeqd" => srs.set_ae(lat_0, lon_0, x_0, y_0)?,
        "bonne" => srs.set_bonne(p.angle("lat_1", 0.0), lon_0, x_0, y_0)?,
        "cass" => srs.set_cs(lat_0, lon_0, x_0, y_0)?,
        "cea" => srs.set_cea(p.angle("lat_ts", 0.0), lon_0, x_0, y_0)?,
        "eck4" => srs.set_eckert_iv(lon_0, x_0, y_0)?,
        "eck6" => srs.set_eckert_vi(lon_0, x_0, y_0)?,
        "eqc" => srs.set_equirectangular(lat_0, lon_0, p.angle("lat_ts", 0.0), x_0, y_0)?,
        "gall" => srs.set_gs(lon_0, x_0, y_0)?,
        "gstmerc" => srs.set_gauss_schreiber_tm(lat_0, lon_0, p.scale(), x_0, y_0)?,
        "geos" => srs.set_geos(lon_0, p.number("h", 35785831.0), x_0, y_0)?,
        "gnom" => srs.set_gnomonic(lat_0, lon_0, x_0, y_0)?,
        "goode" => srs.set_goode_homolosine(lon_0, x_0, y_0)?,
        "omerc" if p.has("lat_1") && p.has("lon_1") && p.has("lat_2") && p.has("lon_2") => {
            srs.set_hom_2pno(
                lat_0,
                p.angle("lat_1", 0.0),
                p.angle("lon_1", 0.0),
                p.angle("lat_2", 0.0),
                p.angle("lon_2", 0.0),
                p.scale(),
                x_0,
                y_0,
            )?;
        },
        "omerc" => {
            let lonc = p.angle("lonc", 0.0);
            let alpha = p.angle("alpha", 0.0);
            let gamma = p.angle("gamma", alpha);
            if p.has("no_uoff") {
                srs.set_hom(lat_0, lonc, alpha, gamma, p.scale(), x_0, y_0)?;
            } else {
                srs.set_hom_azimuth_center(lat_0, lonc, alpha, gamma, p.scale(), x_0, y_0)?;
            }
        },
        "iwm_p" => srs.set_iwm_polyconic(lon_0, p.angle("lat_1", 0.0), p.angle("lat_2", 0.0), x_0, y_0)?,
        "krovak" => srs.set_krovak(
            lat_0,
            lon_0,
            p.angle("alpha", 30.28813972222222),
            p.angle("lat_ts", 78.5),
            p.get("k").or_else(|| p.get("k_0")).map(atof).unwrap_or(0.9999),
            x_0,
            y_0,
        )?,
        "laea" => srs.set_laea(lat_0, lon_0, x_0, y_0)?,
        "mill" => srs.set_mc(lat_0, lon_0, x_0, y_0)?,
        "moll" => srs.set_mollweide(lon_0, x_0, y_0)?,
        "nzmg" => srs.set_nzmg(lat_0, lon_0, x_0, y_0)?,
        "ortho" => srs.set_orthographic(lat_0, lon_0, x_0, y_0)?,
        "poly" => srs.set_polyconic(lat_0, lon_0, x_0, y_0)?,
        "robin" => srs.set_robinson(lon_0, x_0, y_0)?,
        "sinu" => srs.set_sinusoidal(lon_0, x_0, y_0)?,
        "somerc" => srs.set_soc(lat_0, lon_0, x_0, y_0)?,
        "tpeqd" => srs.set_tped(
            p.angle("lat_1", 0.0),
            p.angle("lon_1", 0.0),
            p.angle("lat_2", 0.0),
            p.angle("lon_2", 0.0),
            x_0,
            y_0,
        )?,
        "vandg" => srs.set_vdg(lon_0, x_0, y_0)?,
        "wag1" | "wag2" | "wag3" | "wag4" | "wag5" | "wag6" | "wag7" => {
            let variation = proj[3..].parse::<u8>().unwrap_or(1);
            srs.set_wagner(variation, p.angle("lat_ts", 0.0), x_0, y_0)?;
        },
        other => {
            return Err(SrsError::UnsupportedFormat(format!("Proj4 projection '{}'", other)));
        },
    }
    Ok(true)
}

/// Installs the geographic system from `datum`, `ellps` or explicit axes
fn set_geographic(srs: &mut SpatialReference, p: &Proj4Params) -> SrsResult<()> {
    if let Some(datum) = p.get("datum") {
        if let Some((_, name)) = tables::WELL_KNOWN_DATUMS.iter().find(|(id, _)| id.eq_ignore_ascii_case(datum)) {
            return srs.set_well_known_geog_cs(name);
        }
        if let Some(named) = tables::named_datum(datum) {
            let resolved = crate::epsg::resolve(&Registry::global(), named.gcs_code)?;
            return srs.copy_geog_cs_from(&resolved);
        }
        warn!("Unknown Proj4 datum '{}', falling back to the ellipsoid", datum);
    }

    if let Some(id) = p.get("ellps") {
        let ellipsoid = tables::ellipsoid_by_id(id)
            .ok_or_else(|| SrsError::NotFound(format!("Proj4 ellipsoid '{}'", id)))?;
        return srs.set_geog_cs(&GeogCsDef::new(
            UNNAMED,
            UNKNOWN,
            ellipsoid.description,
            ellipsoid.semi_major,
            ellipsoid.inv_flattening,
        ));
    }

    if let Some(radius) = p.get("R") {
        return srs.set_geog_cs(&GeogCsDef::new(UNNAMED, UNKNOWN, UNNAMED, atof(radius), 0.0));
    }

    if let Some(a) = p.get("a") {
        let semi_major = atof(a);
        let inv_flattening = match (p.get("b"), p.get("rf")) {
            (_, Some(rf)) => atof(rf),
            (Some(b), None) => {
                let semi_minor = atof(b);
                if semi_minor == semi_major { 0.0 } else { semi_major / (semi_major - semi_minor) }
            },
            (None, None) => {
                return Err(SrsError::malformed("+a given without +b or +rf"));
            },
        };
        return srs.set_geog_cs(&GeogCsDef::new(UNNAMED, UNKNOWN, UNNAMED, semi_major, inv_flattening));
    }

    debug!("No ellipsoid in Proj4 string, assuming WGS84");
    srs.set_well_known_geog_cs("WGS84")
}

/// Rewrites the `PRIMEM` from a meridian name or a literal offset
fn set_prime_meridian(srs: &mut SpatialReference, text: &str) -> SrsResult<()> {
    let (name, offset) = match tables::prime_meridian_offset(text) {
        Some(dms) => (capitalize(text), parse_dms(dms).unwrap_or(0.0)),
        None => {
            let offset = parse_dms(text)
                .ok_or_else(|| SrsError::malformed(format!("invalid prime meridian '{}'", text)))?;
            (UNNAMED.to_string(), offset)
        },
    };

    let primem = srs
        .get_attr_node_mut(nodes::PRIMEM)
        .ok_or_else(|| SrsError::NotFound("definition has no prime meridian".to_string()))?;
    if let Some(leaf) = primem.child_mut(0) {
        leaf.set_value(name);
    }
    if let Some(leaf) = primem.child_mut(1) {
        leaf.set_value(format_number(offset));
    }
    Ok(())
}

fn capitalize(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Three or seven comma-separated Bursa-Wolf terms
fn parse_towgs84(text: &str) -> SrsResult<[f64; 7]> {
    let terms: Vec<f64> = text.split(',').map(atof).collect();
    if terms.len() != 3 && terms.len() != 7 {
        return Err(SrsError::malformed(format!(
            "+towgs84 needs 3 or 7 terms, got {}", terms.len()
        )));
    }
    let mut values = [0.0; 7];
    values[..terms.len()].copy_from_slice(&terms);
    Ok(values)
}

/// Applies `+to_meter` or `+units`, rescaling linear parameters
fn set_units(srs: &mut SpatialReference, p: &Proj4Params) -> SrsResult<()> {
    let (name, factor) = if let Some(text) = p.get("to_meter") {
        let factor = atof(text);
        let name = tables::linear_unit_by_factor(factor)
            .map(|(_, name)| name)
            .unwrap_or(UNKNOWN);
        (name, factor)
    } else if let Some(id) = p.get("units") {
        match tables::linear_unit_by_id(id) {
            Some(unit) => unit,
            None => {
                warn!("Unknown Proj4 unit '{}', keeping meters", id);
                (units::METRE, 1.0)
            },
        }
    } else {
        (units::METRE, 1.0)
    };
    srs.set_linear_units_and_update_parameters(name, factor)
}
