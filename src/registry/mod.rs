//! Tabular registry reader
//!
//! Registry tables (geodetic datums, ellipsoids, prime meridians, units,
//! coordinate systems) are plain delimited files in one folder. They are
//! read synchronously and cached for the lifetime of the process.

mod cache;
pub mod config;
pub mod dictionary;
mod table;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::debug;

use crate::srs::errors::SrsResult;

pub use self::cache::{cached_table_count, reset_cache};
pub use self::config::{clear_registry_dir, registry_dir, set_registry_dir, Config};
pub use self::table::{CompareMode, Row, Table};

/// Registry file names
pub mod files {
    pub const GCS: &str = "gcs.csv";
    pub const GCS_OVERRIDE: &str = "gcs.override.csv";
    pub const PCS: &str = "pcs.csv";
    pub const PCS_OVERRIDE: &str = "pcs.override.csv";
    pub const DATUM: &str = "datum.csv";
    pub const GDAL_DATUM: &str = "gdal_datum.csv";
    pub const ELLIPSOID: &str = "ellipsoid.csv";
    pub const PRIME_MERIDIAN: &str = "prime_meridian.csv";
    pub const UNIT_OF_MEASURE: &str = "unit_of_measure.csv";
    pub const COORDINATE_AXIS: &str = "coordinate_axis.csv";
    pub const WKT_DICTIONARY: &str = "epsg.wkt";
    pub const PROJ4_INIT: &str = "epsg";
}

/// Handle on one registry folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    dir: PathBuf,
}

impl Registry {
    /// Registry rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Registry { dir: dir.into() }
    }

    /// Registry at the currently configured folder
    pub fn global() -> Self {
        Registry::new(registry_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn has_file(&self, file: &str) -> bool {
        self.path(file).is_file()
    }

    /// Opens a table that must exist
    pub fn table(&self, file: &str) -> SrsResult<Arc<Table>> {
        cache::get_or_load(&self.path(file))
    }

    /// Opens a table that may be absent
    pub fn find_table(&self, file: &str) -> Option<Arc<Table>> {
        match self.table(file) {
            Ok(table) => Some(table),
            Err(e) => {
                debug!("Optional registry table {} unavailable: {}", file, e);
                None
            },
        }
    }

    /// Scans a table for the first matching row; a missing file is a miss
    pub fn scan(&self, file: &str, key_column: &str, value: &str, mode: CompareMode) -> Option<Row> {
        self.find_table(file)?.scan(key_column, value, mode)
    }

    /// Scans a table and projects one column; empty when nothing matches
    pub fn get_field(&self, file: &str, key_column: &str, value: &str, mode: CompareMode, target_column: &str) -> String {
        match self.find_table(file) {
            Some(table) => table.get_field(key_column, value, mode, target_column),
            None => String::new(),
        }
    }

    /// WKT text for `code` from the dictionary file
    pub fn dictionary_wkt(&self, code: u32) -> Option<String> {
        dictionary::lookup_wkt(&self.dir, files::WKT_DICTIONARY, &code.to_string())
    }

    /// Proj4 parameters for `code` from the init file
    pub fn proj4_init(&self, code: u32) -> Option<String> {
        dictionary::lookup_init(&self.dir, files::PROJ4_INIT, &code.to_string())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srs::errors::SrsError;
    use std::fs;

    #[test]
    fn test_missing_file_is_soft_for_scans_and_hard_for_tables() {
        let dir = tempfile::tempdir().unwrap();
        let registry = Registry::new(dir.path());
        assert!(registry.scan("nothing.csv", "A", "1", CompareMode::Integer).is_none());
        assert_eq!(registry.get_field("nothing.csv", "A", "1", CompareMode::Integer, "B"), "");
        assert!(matches!(registry.table("nothing.csv"), Err(SrsError::MissingRegistryFile(_))));
    }

    #[test]
    fn test_table_is_cached_after_first_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.csv"), "A,B\n1,one\n").unwrap();
        let registry = Registry::new(dir.path());

        assert_eq!(registry.get_field("t.csv", "A", "1", CompareMode::Integer, "B"), "one");

        // Later edits are not seen: the table is loaded once per process
        fs::write(dir.path().join("t.csv"), "A,B\n1,changed\n").unwrap();
        assert_eq!(registry.get_field("t.csv", "A", "1", CompareMode::Integer, "B"), "one");
        let first = registry.table("t.csv").unwrap();
        let second = registry.table("t.csv").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
