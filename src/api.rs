use std::fmt;
use std::path::Path;
use std::str::FromStr;
use log::info;

use crate::registry::{self, Config};
use crate::srs::{SpatialReference, SrsError, SrsResult};
use crate::srs::read_definition_file;
use crate::utils::logger::Logger;

/// Notation of an input definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Guess from the text (see [`SpatialReference::from_user_input`])
    Auto,
    Wkt,
    Proj4,
    Epsg,
    Esri,
}

/// Notation a definition is written out in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Wkt,
    /// Indented multi-line WKT
    Pretty,
    Proj4,
    Esri,
}

impl FromStr for InputFormat {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "wkt" => Ok(InputFormat::Wkt),
            "proj4" | "proj" => Ok(InputFormat::Proj4),
            "epsg" => Ok(InputFormat::Epsg),
            "esri" => Ok(InputFormat::Esri),
            other => Err(SrsError::UnsupportedFormat(format!("unknown input format '{}'", other))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wkt" => Ok(OutputFormat::Wkt),
            "pretty" => Ok(OutputFormat::Pretty),
            "proj4" | "proj" => Ok(OutputFormat::Proj4),
            "esri" => Ok(OutputFormat::Esri),
            other => Err(SrsError::UnsupportedFormat(format!("unknown output format '{}'", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Wkt => "wkt",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Proj4 => "proj4",
            OutputFormat::Esri => "esri",
        };
        f.write_str(name)
    }
}

/// Reads a definition written in `format`.
///
/// An input starting with `@` names a file holding the definition, for every
/// format.
pub fn parse_input(input: &str, format: InputFormat) -> SrsResult<SpatialReference> {
    let text = input.trim();
    if let Some(path) = text.strip_prefix('@') {
        return parse_input(&read_definition_file(path)?, format);
    }

    match format {
        InputFormat::Auto => SpatialReference::from_user_input(text),
        InputFormat::Wkt => SpatialReference::from_wkt(text),
        InputFormat::Proj4 => SpatialReference::from_proj4(text),
        InputFormat::Esri => SpatialReference::from_esri_wkt(text),
        InputFormat::Epsg => {
            let digits = text
                .get(..5)
                .filter(|p| p.eq_ignore_ascii_case("EPSG:"))
                .map(|_| &text[5..])
                .unwrap_or(text);
            let code = digits
                .trim()
                .parse::<u32>()
                .map_err(|_| SrsError::malformed(format!("invalid EPSG code: {}", text)))?;
            SpatialReference::from_epsg(code)
        },
    }
}

/// Writes a definition out in `format`.
///
/// Proj4 output may legitimately be empty for definitions Proj4 cannot
/// express (local systems, unknown methods).
pub fn render(srs: &SpatialReference, format: OutputFormat) -> SrsResult<String> {
    match format {
        OutputFormat::Wkt => Ok(srs.to_wkt()),
        OutputFormat::Pretty => Ok(srs.to_pretty_wkt()),
        OutputFormat::Proj4 => srs.to_proj4(),
        OutputFormat::Esri => srs.to_esri_wkt(),
    }
}

/// Human readable summary of a definition
pub fn describe(srs: &SpatialReference) -> String {
    let kind = if srs.is_projected() {
        "Projected"
    } else if srs.is_geographic() {
        "Geographic"
    } else if srs.is_local() {
        "Local"
    } else if srs.is_empty() {
        "Empty"
    } else {
        "Other"
    };

    let mut result = String::from("Coordinate System:\n");
    result.push_str(&format!("  Kind: {}\n", kind));
    if let Some(name) = srs.name() {
        result.push_str(&format!("  Name: {}\n", name));
    }
    if let Some(code) = srs.authority_code(None) {
        result.push_str(&format!("  Authority: {}:{}\n", srs.authority_name(None).unwrap_or("?"), code));
    }

    if srs.is_projected() || srs.is_geographic() {
        if let Some(datum) = srs.datum_name() {
            result.push_str(&format!("  Datum: {}\n", datum));
        }
        result.push_str(&format!(
            "  Ellipsoid: {} (a={}, 1/f={})\n",
            srs.get_attr_value("SPHEROID", 0).unwrap_or("unknown"),
            srs.semi_major(),
            srs.inv_flattening()
        ));
        let (meridian, offset) = srs.prime_meridian();
        result.push_str(&format!("  Prime meridian: {} ({})\n", meridian, offset));
        let (angular, radians) = srs.angular_units();
        result.push_str(&format!("  Angular unit: {} ({})\n", angular, radians));
    }

    if srs.is_projected() || srs.is_local() {
        let (linear, meters) = srs.linear_units();
        result.push_str(&format!("  Linear unit: {} ({})\n", linear, meters));
    }

    if let Some(projection) = srs.projection_name() {
        result.push_str(&format!("  Projection: {}\n", projection));
        for name in srs.proj_parm_names() {
            result.push_str(&format!("    {} = {}\n", name, srs.get_norm_proj_parm(&name, 0.0)));
        }
    }
    if let Some((zone, north)) = srs.utm_zone() {
        result.push_str(&format!("  UTM zone: {}{}\n", zone, if north { "N" } else { "S" }));
    }
    result
}

/// Main interface to the CrsKit library
pub struct CrsKit {
    logger: Logger,
}

impl CrsKit {
    /// Create a new CrsKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path of a file recording every conversion
    ///
    /// # Returns
    /// A CrsKit instance or an error if the log file cannot be created
    pub fn new(log_file: Option<&str>) -> SrsResult<Self> {
        let logger = match log_file {
            Some(path) => Logger::new(path)?,
            None => Logger::disabled(),
        };
        Ok(CrsKit { logger })
    }

    /// Use `dir` as the registry folder for all later lookups
    pub fn with_registry_dir(self, dir: impl AsRef<Path>) -> Self {
        registry::set_registry_dir(dir.as_ref());
        self
    }

    /// Apply a TOML configuration file (registry folder)
    pub fn with_config_file(self, path: impl AsRef<Path>) -> SrsResult<Self> {
        Config::from_file(path.as_ref())?.apply();
        Ok(self)
    }

    /// Parse a definition
    ///
    /// # Arguments
    /// * `input` - Definition text, or `@path` to read it from a file
    /// * `format` - Notation of `input`
    pub fn parse(&self, input: &str, format: InputFormat) -> SrsResult<SpatialReference> {
        parse_input(input, format)
    }

    /// Convert a definition from one notation to another
    ///
    /// # Arguments
    /// * `input` - Definition text, or `@path` to read it from a file
    /// * `from` - Notation of `input`
    /// * `to` - Notation of the result
    ///
    /// # Returns
    /// The converted text, which is empty for Proj4 output of definitions
    /// Proj4 cannot express
    pub fn convert(&self, input: &str, from: InputFormat, to: OutputFormat) -> SrsResult<String> {
        let srs = parse_input(input, from)?;
        let output = render(&srs, to)?;
        info!("Converted definition to {}", to);
        self.logger.log_conversion(input, &to.to_string(), &output)?;
        Ok(output)
    }

    /// Summarize a definition: kind, names, units, projection and
    /// authority
    pub fn describe(&self, input: &str, from: InputFormat) -> SrsResult<String> {
        let srs = parse_input(input, from)?;
        Ok(describe(&srs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!("PROJ4".parse::<InputFormat>().unwrap(), InputFormat::Proj4);
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("gml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Esri.to_string(), "esri");
    }

    #[test]
    fn test_convert_and_describe() {
        let kit = CrsKit::new(None).unwrap();
        let proj4 = kit.convert("EPSG:4326", InputFormat::Auto, OutputFormat::Proj4).unwrap();
        assert_eq!(proj4, "+proj=longlat +datum=WGS84 +no_defs");

        let summary = kit.describe("+proj=utm +zone=31 +datum=WGS84", InputFormat::Proj4).unwrap();
        assert!(summary.contains("Kind: Projected"), "{}", summary);
        assert!(summary.contains("UTM zone: 31N"), "{}", summary);
        assert!(summary.contains("Datum: WGS_1984"), "{}", summary);
    }

    #[test]
    fn test_epsg_format_accepts_prefix() {
        let srs = parse_input("epsg:4269", InputFormat::Epsg).unwrap();
        assert_eq!(srs.datum_name(), Some("North_American_Datum_1983"));
        assert!(parse_input("EPSG:x", InputFormat::Epsg).is_err());
    }

    #[test]
    fn test_file_input_is_not_followed_twice() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.prj");
        let second = dir.path().join("second.prj");
        std::fs::write(&first, format!("@{}", second.display())).unwrap();
        std::fs::write(&second, format!("@{}", first.display())).unwrap();

        for format in [InputFormat::Auto, InputFormat::Wkt, InputFormat::Proj4] {
            let result = parse_input(&format!("@{}", first.display()), format);
            assert!(matches!(result, Err(SrsError::MalformedInput { .. })), "{:?}", format);
        }
    }

    #[test]
    fn test_file_input_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let definition = dir.path().join("def.wkt");
        std::fs::write(&definition, "LOCAL_CS[\"site grid\",UNIT[\"metre\",1]]").unwrap();
        let log = dir.path().join("conversions.log");

        let kit = CrsKit::new(log.to_str()).unwrap();
        let input = format!("@{}", definition.display());
        assert_eq!(kit.convert(&input, InputFormat::Wkt, OutputFormat::Proj4).unwrap(), "");

        let logged = std::fs::read_to_string(&log).unwrap();
        assert!(logged.contains("Converted to proj4"), "{}", logged);
    }
}
