//! Number formatting and lenient parsing utilities
//!
//! Definitions carry their numbers as text, so every numeric value written
//! into a tree or a Proj4 string goes through the same formatter.

/// Formats a value with at most `significant` significant digits, using the
/// shortest representation of the rounded value (the `%.Ng` convention).
pub fn format_significant(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = significant.max(1) - 1;
    let rounded: f64 = format!("{:.*e}", digits, value)
        .parse()
        .unwrap_or(value);

    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Formats a value the way definitions store numbers (16 significant digits)
pub fn format_number(value: f64) -> String {
    format_significant(value, 16)
}

/// Parses the leading numeric prefix of a string, returning 0.0 when there is none
pub fn atof(text: &str) -> f64 {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return v;
    }

    let end = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    // Shrink until the prefix parses ("12e" or "1.5-" are not numbers)
    let mut candidate = &trimmed[..end];
    while !candidate.is_empty() {
        if let Ok(v) = candidate.parse::<f64>() {
            return v;
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    0.0
}

/// Parses the leading integer of a string, returning 0 when there is none
pub fn atoi(text: &str) -> i64 {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && matches!(c, '-' | '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    trimmed[..end].parse().unwrap_or(0)
}

/// Whether two values agree within an absolute tolerance
pub fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_significant_trims_noise() {
        assert_eq!(format_number(0.0174532925199433), "0.0174532925199433");
        assert_eq!(format_number(6378137.0), "6378137");
        assert_eq!(format_number(298.257223563), "298.257223563");
        assert_eq!(format_number(15.000000000000002), "15");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.9996), "0.9996");
    }

    #[test]
    fn test_atof_prefix() {
        assert_eq!(atof("12.5"), 12.5);
        assert_eq!(atof(" 3e2 "), 300.0);
        assert_eq!(atof("42abc"), 42.0);
        assert_eq!(atof("12e"), 12.0);
        assert_eq!(atof("north"), 0.0);
    }

    #[test]
    fn test_atoi_prefix() {
        assert_eq!(atoi("4326"), 4326);
        assert_eq!(atoi("-12x"), -12);
        assert_eq!(atoi(""), 0);
    }
}
