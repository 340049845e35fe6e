//! Lookup tables used to rename tree values
//!
//! A table is an ordered list of `(wkt, other)` name pairs. Lookups scan the
//! list front to back and the first matching entry wins, so the order in
//! which entries are declared is significant.

/// How a tree value is compared against a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Whole value, ASCII case-insensitive
    ExactIgnoreCase,
    /// Whole value, case-sensitive
    Exact,
    /// Leading part of the value, ASCII case-insensitive; the matched prefix
    /// is replaced and the remainder kept
    PrefixIgnoreCase,
}

/// Which column of the table is matched and which one is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapDirection {
    /// Match the WKT column, write the other column
    FromWkt,
    /// Match the other column, write the WKT column
    ToWkt,
}

/// One pair of equivalent names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapEntry {
    pub wkt: String,
    pub other: String,
}

/// Ordered name translation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    entries: Vec<RemapEntry>,
    mode: MatchMode,
}

impl RemapTable {
    /// Builds a table from `(wkt, other)` pairs
    pub fn from_pairs(pairs: &[(&str, &str)], mode: MatchMode) -> Self {
        RemapTable {
            entries: pairs
                .iter()
                .map(|(wkt, other)| RemapEntry {
                    wkt: wkt.to_string(),
                    other: other.to_string(),
                })
                .collect(),
            mode,
        }
    }

    /// Builds a table from owned entries
    pub fn from_entries(entries: Vec<RemapEntry>, mode: MatchMode) -> Self {
        RemapTable { entries, mode }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RemapEntry] {
        &self.entries
    }

    /// Returns the replacement for `value`, if any entry matches
    pub fn lookup(&self, value: &str, direction: RemapDirection) -> Option<String> {
        for entry in &self.entries {
            let (source, target) = match direction {
                RemapDirection::FromWkt => (&entry.wkt, &entry.other),
                RemapDirection::ToWkt => (&entry.other, &entry.wkt),
            };

            match self.mode {
                MatchMode::ExactIgnoreCase if value.eq_ignore_ascii_case(source) => {
                    return Some(target.clone());
                },
                MatchMode::Exact if value == source => {
                    return Some(target.clone());
                },
                MatchMode::PrefixIgnoreCase
                    if crate::utils::string_utils::starts_with_ci(value, source) =>
                {
                    return Some(format!("{}{}", target, &value[source.len()..]));
                },
                _ => {},
            }
        }
        None
    }
}
