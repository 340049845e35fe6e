//! String utility functions
//!
//! Utilities for comparing and normalizing definition names.

/// Case-insensitive prefix test
pub fn starts_with_ci(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Rewrites a registry name into identifier form: every run of characters
/// other than ASCII letters, digits and `+` becomes one underscore, and
/// trailing underscores are dropped ("OSGB 1936" -> "OSGB_1936").
pub fn massage_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '+' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Removes ASCII control characters (newlines, tabs, ...) replacing them with spaces
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_massage_name() {
        assert_eq!(massage_name("OSGB 1936"), "OSGB_1936");
        assert_eq!(massage_name("Deutsches Hauptdreiecksnetz"), "Deutsches_Hauptdreiecksnetz");
        assert_eq!(massage_name("NTF (Paris)"), "NTF_Paris");
        assert_eq!(massage_name("a  - b"), "a_b");
    }

    #[test]
    fn test_starts_with_ci() {
        assert!(starts_with_ci("Latitude_Of_Origin", "lati"));
        assert!(!starts_with_ci("la", "lati"));
    }
}
