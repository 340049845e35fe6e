//! Process-wide cache of loaded registry tables
//!
//! Tables are keyed by their full path and loaded at most once per process.
//! The map sits behind a mutex and loading happens while the lock is held,
//! so concurrent first use from several threads performs a single load.
//! Failed loads are not cached.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use lazy_static::lazy_static;
use log::debug;

use crate::registry::table::Table;
use crate::srs::errors::{SrsError, SrsResult};

lazy_static! {
    static ref TABLE_CACHE: Mutex<HashMap<PathBuf, Arc<Table>>> = Mutex::new(HashMap::new());
}

/// Returns the cached table for `path`, loading it on first use
pub fn get_or_load(path: &Path) -> SrsResult<Arc<Table>> {
    let mut cache = TABLE_CACHE
        .lock()
        .map_err(|_| SrsError::GenericError("registry cache lock poisoned".to_string()))?;

    if let Some(table) = cache.get(path) {
        return Ok(Arc::clone(table));
    }

    let table = Arc::new(Table::load(path)?);
    cache.insert(path.to_path_buf(), Arc::clone(&table));
    Ok(table)
}

/// Number of tables currently cached
pub fn cached_table_count() -> usize {
    TABLE_CACHE.lock().map(|c| c.len()).unwrap_or(0)
}

/// Drops every cached table so the next lookup reloads from disk
pub fn reset_cache() {
    if let Ok(mut cache) = TABLE_CACHE.lock() {
        debug!("Clearing {} cached registry tables", cache.len());
        cache.clear();
    }
}
