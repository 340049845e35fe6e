//! Degrees-minutes-seconds parsing
//!
//! Proj4 angles may be written as plain decimals (`-62.5`) or as DMS text
//! (`2d20'14.025"E`), with an optional hemisphere letter.

use lazy_static::lazy_static;
use log::error;
use regex::Regex;

const DMS_REGEX: &str =
    r#"^([+-])?(\d+(?:\.\d*)?|\.\d+)(?:[dD°](?:(\d+(?:\.\d*)?)')?(?:(\d+(?:\.\d*)?)")?)?([NSEWnsew])?$"#;

lazy_static! {
    // None only if the pattern fails to compile; every angle is then rejected
    static ref DMS_PATTERN: Option<Regex> = match Regex::new(DMS_REGEX) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            error!("Invalid DMS pattern: {}", e);
            None
        },
    };
}

/// Parses a DMS or decimal angle into decimal degrees
pub fn parse_dms(text: &str) -> Option<f64> {
    let caps = DMS_PATTERN.as_ref()?.captures(text.trim())?;
    let number = |i: usize| -> f64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    let value = number(2) + number(3) / 60.0 + number(4) / 3600.0;

    let negative_sign = caps.get(1).map(|m| m.as_str() == "-").unwrap_or(false);
    let southern_or_western = caps
        .get(5)
        .map(|m| matches!(m.as_str(), "S" | "s" | "W" | "w"))
        .unwrap_or(false);

    if negative_sign != southern_or_western { Some(-value) } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_decimal_values() {
        assert_close(parse_dms("-62").unwrap(), -62.0);
        assert_close(parse_dms("2.337229167").unwrap(), 2.337229167);
        assert_close(parse_dms("+.5").unwrap(), 0.5);
    }

    #[test]
    fn test_dms_values() {
        assert_close(parse_dms("2d20'14.025\"E").unwrap(), 2.337229166666667);
        assert_close(parse_dms("9d07'54.862\"W").unwrap(), -9.131906111111111);
        assert_close(parse_dms("17d40'W").unwrap(), -17.666666666666668);
        assert_close(parse_dms("0dE").unwrap(), 0.0);
        assert_close(parse_dms("-3d30'").unwrap(), -3.5);
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(DMS_PATTERN.is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_dms("paris").is_none());
        assert!(parse_dms("").is_none());
        assert!(parse_dms("1d2'3\"Q").is_none());
    }
}
