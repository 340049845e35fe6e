//! Proj4 string encoding

use log::{info, warn};

use crate::epsg::towgs84_for_datum;
use crate::proj4::dms::parse_dms;
use crate::proj4::tables;
use crate::registry::Registry;
use crate::srs::constants::{datums, nodes};
use crate::srs::errors::{SrsError, SrsResult};
use crate::srs::{Projection, SpatialReference};
use crate::utils::format_utils::{atoi, format_number};

/// Accumulates `+key=value` tokens
#[derive(Debug, Default)]
struct Proj4Writer {
    tokens: Vec<String>,
}

impl Proj4Writer {
    fn text(&mut self, key: &str, value: &str) -> &mut Self {
        self.tokens.push(format!("+{}={}", key, value));
        self
    }

    fn num(&mut self, key: &str, value: f64) -> &mut Self {
        self.text(key, &format_number(value))
    }

    fn flag(&mut self, key: &str) -> &mut Self {
        self.tokens.push(format!("+{}", key));
        self
    }

    fn offsets(&mut self, false_easting: f64, false_northing: f64) -> &mut Self {
        self.num("x_0", false_easting).num("y_0", false_northing)
    }

    fn finish(self) -> String {
        self.tokens.join(" ")
    }
}

/// Encodes a definition as a Proj4 string.
///
/// Local systems and projections without a Proj4 equivalent produce an
/// empty string rather than an error.
pub fn encode(srs: &SpatialReference) -> SrsResult<String> {
    if srs.is_empty() {
        return Err(SrsError::NotFound("no definition to encode".to_string()));
    }
    if srs.is_local() {
        warn!("Local coordinate systems have no Proj4 form");
        return Ok(String::new());
    }

    let mut out = Proj4Writer::default();
    if srs.is_projected() {
        let projection = match srs.projection() {
            Some(p) => p,
            None => {
                warn!(
                    "Projection '{}' has no Proj4 form",
                    srs.projection_name().unwrap_or("<none>")
                );
                return Ok(String::new());
            },
        };
        write_projection(&mut out, srs, &projection);
    } else if srs.is_geographic() {
        out.text("proj", "longlat");
    } else {
        warn!("Unsupported definition kind for Proj4 export");
        return Ok(String::new());
    }

    write_datum(&mut out, srs);
    write_prime_meridian(&mut out, srs);
    if srs.is_projected() {
        write_units(&mut out, srs);
    }
    out.flag("no_defs");

    let text = out.finish();
    info!("Encoded Proj4 definition: {}", text);
    Ok(text)
}

fn write_projection(out: &mut Proj4Writer, srs: &SpatialReference, projection: &Projection) {
    use Projection::*;

    match *projection {
        TransverseMercator { center_lat, central_meridian, scale, false_easting, false_northing } => {
            match srs.utm_zone() {
                Some((zone, north)) => {
                    out.text("proj", "utm").text("zone", &zone.to_string());
                    if !north {
                        out.flag("south");
                    }
                },
                None => {
                    out.text("proj", "tmerc")
                        .num("lat_0", center_lat)
                        .num("lon_0", central_meridian)
                        .num("k", scale)
                        .offsets(false_easting, false_northing);
                },
            }
        },
        TransverseMercatorSouthOriented { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "tmerc")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k", scale)
                .offsets(false_easting, false_northing)
                .text("axis", "wsu");
        },
        GaussSchreiberTransverseMercator { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "gstmerc")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k_0", scale)
                .offsets(false_easting, false_northing);
        },
        Mercator1SP { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "merc")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        Mercator2SP { std_parallel_1, center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "merc")
                .num("lat_ts", std_parallel_1)
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        PolarStereographic { center_lat, central_meridian, scale, false_easting, false_northing } => {
            let pole = if center_lat < 0.0 { -90.0 } else { 90.0 };
            out.text("proj", "stere")
                .num("lat_0", pole)
                .num("lat_ts", center_lat)
                .num("lon_0", central_meridian)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        Stereographic { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "stere")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        ObliqueStereographic { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "sterea")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        LambertConformalConic1SP { center_lat, central_meridian, scale, false_easting, false_northing } => {
            out.text("proj", "lcc")
                .num("lat_1", center_lat)
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .num("k_0", scale)
                .offsets(false_easting, false_northing);
        },
        LambertConformalConic2SP { std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "lcc")
                .num("lat_1", std_parallel_1)
                .num("lat_2", std_parallel_2)
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        LambertConformalConic2SPBelgium { std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing } => {
            warn!("Belgian Lambert conformal conic is written as the plain 2SP variant");
            out.text("proj", "lcc")
                .num("lat_1", std_parallel_1)
                .num("lat_2", std_parallel_2)
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        AlbersConicEqualArea { std_parallel_1, std_parallel_2, center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "aea")
                .num("lat_1", std_parallel_1)
                .num("lat_2", std_parallel_2)
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        EquidistantConic { std_parallel_1, std_parallel_2, center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "eqdc")
                .num("lat_1", std_parallel_1)
                .num("lat_2", std_parallel_2)
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        AzimuthalEquidistant { center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "aeqd")
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        Bonne { std_parallel_1, central_meridian, false_easting, false_northing } => {
            out.text("proj", "bonne")
                .num("lat_1", std_parallel_1)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        CassiniSoldner { center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "cass")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        CylindricalEqualArea { std_parallel_1, central_meridian, false_easting, false_northing } => {
            out.text("proj", "cea")
                .num("lon_0", central_meridian)
                .num("lat_ts", std_parallel_1)
                .offsets(false_easting, false_northing);
        },
        EckertIV { central_meridian, false_easting, false_northing } => {
            out.text("proj", "eck4").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        EckertVI { central_meridian, false_easting, false_northing } => {
            out.text("proj", "eck6").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        Equirectangular { center_lat, central_meridian, std_parallel_1, false_easting, false_northing } => {
            out.text("proj", "eqc")
                .num("lat_ts", std_parallel_1)
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        GallStereographic { central_meridian, false_easting, false_northing } => {
            out.text("proj", "gall").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        GeostationarySatellite { central_meridian, satellite_height, false_easting, false_northing } => {
            out.text("proj", "geos")
                .num("lon_0", central_meridian)
                .num("h", satellite_height)
                .offsets(false_easting, false_northing);
        },
        Gnomonic { center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "gnom")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        GoodeHomolosine { central_meridian, false_easting, false_northing } => {
            out.text("proj", "goode").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        HotineObliqueMercator { center_lat, center_long, azimuth, rectified_grid_angle, scale, false_easting, false_northing } => {
            out.text("proj", "omerc")
                .num("lat_0", center_lat)
                .num("lonc", center_long)
                .num("alpha", azimuth)
                .num("gamma", rectified_grid_angle)
                .num("k", scale)
                .offsets(false_easting, false_northing)
                .flag("no_uoff");
        },
        HotineObliqueMercatorAzimuthCenter { center_lat, center_long, azimuth, rectified_grid_angle, scale, false_easting, false_northing } => {
            out.text("proj", "omerc")
                .num("lat_0", center_lat)
                .num("lonc", center_long)
                .num("alpha", azimuth)
                .num("gamma", rectified_grid_angle)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        HotineObliqueMercatorTwoPoint { center_lat, lat_point_1, long_point_1, lat_point_2, long_point_2, scale, false_easting, false_northing } => {
            out.text("proj", "omerc")
                .num("lat_0", center_lat)
                .num("lat_1", lat_point_1)
                .num("lon_1", long_point_1)
                .num("lat_2", lat_point_2)
                .num("lon_2", long_point_2)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        InternationalMapWorldPolyconic { central_meridian, std_parallel_1, std_parallel_2, false_easting, false_northing } => {
            out.text("proj", "iwm_p")
                .num("lat_1", std_parallel_1)
                .num("lat_2", std_parallel_2)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        Krovak { center_lat, center_long, azimuth, pseudo_std_parallel_1, scale, false_easting, false_northing } => {
            out.text("proj", "krovak")
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .num("alpha", azimuth)
                .num("lat_ts", pseudo_std_parallel_1)
                .num("k", scale)
                .offsets(false_easting, false_northing);
        },
        LambertAzimuthalEqualArea { center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "laea")
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        MillerCylindrical { center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "mill")
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        Mollweide { central_meridian, false_easting, false_northing } => {
            out.text("proj", "moll").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        NewZealandMapGrid { center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "nzmg")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        Orthographic { center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "ortho")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        Polyconic { center_lat, central_meridian, false_easting, false_northing } => {
            out.text("proj", "poly")
                .num("lat_0", center_lat)
                .num("lon_0", central_meridian)
                .offsets(false_easting, false_northing);
        },
        Robinson { center_long, false_easting, false_northing } => {
            out.text("proj", "robin").num("lon_0", center_long).offsets(false_easting, false_northing);
        },
        Sinusoidal { center_long, false_easting, false_northing } => {
            out.text("proj", "sinu").num("lon_0", center_long).offsets(false_easting, false_northing);
        },
        SwissObliqueCylindrical { center_lat, center_long, false_easting, false_northing } => {
            out.text("proj", "somerc")
                .num("lat_0", center_lat)
                .num("lon_0", center_long)
                .offsets(false_easting, false_northing);
        },
        TwoPointEquidistant { lat_point_1, long_point_1, lat_point_2, long_point_2, false_easting, false_northing } => {
            out.text("proj", "tpeqd")
                .num("lat_1", lat_point_1)
                .num("lon_1", long_point_1)
                .num("lat_2", lat_point_2)
                .num("lon_2", long_point_2)
                .offsets(false_easting, false_northing);
        },
        VanDerGrinten { central_meridian, false_easting, false_northing } => {
            out.text("proj", "vandg").num("lon_0", central_meridian).offsets(false_easting, false_northing);
        },
        WagnerI { false_easting, false_northing } => {
            out.text("proj", "wag1").offsets(false_easting, false_northing);
        },
        WagnerII { false_easting, false_northing } => {
            out.text("proj", "wag2").offsets(false_easting, false_northing);
        },
        WagnerIII { center_lat, false_easting, false_northing } => {
            out.text("proj", "wag3").num("lat_ts", center_lat).offsets(false_easting, false_northing);
        },
        WagnerIV { false_easting, false_northing } => {
            out.text("proj", "wag4").offsets(false_easting, false_northing);
        },
        WagnerV { false_easting, false_northing } => {
            out.text("proj", "wag5").offsets(false_easting, false_northing);
        },
        WagnerVI { false_easting, false_northing } => {
            out.text("proj", "wag6").offsets(false_easting, false_northing);
        },
        WagnerVII { false_easting, false_northing } => {
            out.text("proj", "wag7").offsets(false_easting, false_northing);
        },
    }
}

/// Writes `+datum` for known datums, else the ellipsoid and any shift
fn write_datum(out: &mut Proj4Writer, srs: &SpatialReference) {
    let datum = srs.datum_name().unwrap_or("");
    let well_known = [
        (datums::WGS84, "WGS84"),
        (datums::NAD27, "NAD27"),
        (datums::NAD83, "NAD83"),
    ];
    if let Some((_, id)) = well_known.iter().find(|(name, _)| name.eq_ignore_ascii_case(datum)) {
        out.text("datum", id);
        return;
    }

    let datum_code = srs
        .authority_code(Some(nodes::DATUM))
        .and_then(|code| u32::try_from(atoi(code)).ok())
        .unwrap_or(0);
    if let Some(named) = tables::named_datum_by_code(datum_code) {
        out.text("datum", named.id);
        return;
    }

    let semi_major = srs.semi_major();
    let inv_flattening = srs.inv_flattening();
    match tables::match_ellipsoid(semi_major, inv_flattening) {
        Some(ellipsoid) => {
            out.text("ellps", ellipsoid.id);
        },
        None => {
            out.num("a", semi_major).num("b", srs.semi_minor());
        },
    }

    let shift = srs.towgs84().or_else(|| {
        if datum_code == 0 {
            None
        } else {
            towgs84_for_datum(&Registry::global(), datum_code)
        }
    });
    if let Some(terms) = shift {
        let count = if terms[3..].iter().all(|t| *t == 0.0) { 3 } else { 7 };
        let joined: Vec<String> = terms[..count].iter().map(|t| format_number(*t)).collect();
        out.text("towgs84", &joined.join(","));
    }
}

fn write_prime_meridian(out: &mut Proj4Writer, srs: &SpatialReference) {
    let (name, offset) = srs.prime_meridian();
    if offset == 0.0 {
        return;
    }
    let named = tables::PRIME_MERIDIANS.iter().find(|(id, dms)| {
        id.eq_ignore_ascii_case(&name)
            || parse_dms(dms).map(|v| (v - offset).abs() < 1e-7).unwrap_or(false)
    });
    match named {
        Some((id, _)) => out.text("pm", id),
        None => out.num("pm", offset),
    };
}

fn write_units(out: &mut Proj4Writer, srs: &SpatialReference) {
    let (_, factor) = srs.linear_units();
    match tables::linear_unit_by_factor(factor) {
        Some((id, _)) => out.text("units", id),
        None => out.num("to_meter", factor),
    };
}
