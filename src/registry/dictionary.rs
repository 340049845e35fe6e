//! Line-oriented definition dictionaries
//!
//! Two formats are read here. The WKT dictionary holds `<code>,<wkt>` lines
//! and may pull in other files with `include <file>`. The Proj4 init file
//! holds `<code> +param ... <>` lines.

use std::fs;
use std::path::Path;
use log::debug;

/// Maximum nesting of `include` directives
const MAX_INCLUDE_DEPTH: usize = 8;

/// Finds the WKT text registered for `code` in a dictionary file
pub fn lookup_wkt(dir: &Path, file: &str, code: &str) -> Option<String> {
    lookup_wkt_inner(dir, file, code.trim(), 0)
}

fn lookup_wkt_inner(dir: &Path, file: &str, code: &str, depth: usize) -> Option<String> {
    if depth > MAX_INCLUDE_DEPTH {
        debug!("Include depth exceeded at {}", file);
        return None;
    }

    let path = dir.join(file);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => {
            debug!("Dictionary file {} not available", path.display());
            return None;
        },
    };

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(included) = line.strip_prefix("include ") {
            if let Some(found) = lookup_wkt_inner(dir, included.trim(), code, depth + 1) {
                return Some(found);
            }
            continue;
        }

        if let Some((key, wkt)) = line.split_once(',') {
            if key.trim() == code {
                return Some(wkt.trim().to_string());
            }
        }
    }
    None
}

/// Finds the Proj4 parameters registered for `code` in an init file
pub fn lookup_init(dir: &Path, file: &str, code: &str) -> Option<String> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).ok()?;
    let key = format!("<{}>", code.trim());

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix(&key) {
            let params = rest.trim().trim_end_matches("<>").trim();
            return Some(params.to_string());
        }
    }
    None
}
