//! Delimited registry tables
//!
//! Registry files are comma separated with a header line. Fields may be
//! quoted, and a quoted field may run over several physical lines.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use log::debug;

use crate::srs::errors::{SrsError, SrsResult};
use crate::utils::format_utils::atoi;

/// One record of a registry table
pub type Row = Vec<String>;

/// First-field value marking an illustrative row that is not registry data
const EXAMPLE_SENTINEL: &str = "Example";

/// How a key column is compared during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// The field contains the value
    Substring,
    /// ASCII case-insensitive equality
    IgnoreCase,
    /// Both sides parse to the same integer
    Integer,
}

/// An in-memory registry table
#[derive(Debug)]
pub struct Table {
    name: String,
    header: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Row>,
    /// Index of the row most recently matched or read
    current_index: AtomicUsize,
}

impl Table {
    /// Loads a table from disk
    pub fn load(path: &Path) -> SrsResult<Table> {
        let content = fs::read_to_string(path).map_err(|e| {
            debug!("Unable to read registry table {}: {}", path.display(), e);
            SrsError::MissingRegistryFile(path.display().to_string())
        })?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Table::from_str(&name, &content)
    }

    /// Parses table text; the first record is the header
    pub fn from_str(name: &str, content: &str) -> SrsResult<Table> {
        let mut records = logical_records(content).into_iter();

        let header = match records.next() {
            Some(line) => split_fields(&line),
            None => return Err(SrsError::malformed(format!("registry table {} is empty", name))),
        };

        let columns = header
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        let rows: Vec<Row> = records
            .map(|line| split_fields(&line))
            .filter(|fields| fields.first().map(|f| f != EXAMPLE_SENTINEL).unwrap_or(false))
            .collect();

        debug!("Loaded registry table {} ({} columns, {} rows)", name, header.len(), rows.len());

        Ok(Table {
            name: name.to_string(),
            header,
            columns,
            rows,
            current_index: AtomicUsize::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Index of a header column (case-sensitive)
    pub fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// Field `column` of `row`, or an empty string
    pub fn field<'r>(&self, row: &'r Row, column: &str) -> &'r str {
        self.column(column)
            .and_then(|i| row.get(i))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Index of the row most recently matched by [`Table::scan`] or read by
    /// [`Table::next_line`]
    pub fn current_index(&self) -> usize {
        self.current_index.load(Ordering::SeqCst)
    }

    /// Finds the first row whose `key_column` matches `value`.
    ///
    /// On a hit the read cursor is moved to that row, so [`Table::next_line`]
    /// returns the row physically following it.
    pub fn scan(&self, key_column: &str, value: &str, mode: CompareMode) -> Option<Row> {
        let column = self.column(key_column)?;
        let int_value = if mode == CompareMode::Integer { Some(atoi(value)) } else { None };

        for (index, row) in self.rows.iter().enumerate() {
            let field = match row.get(column) {
                Some(f) => f,
                None => continue,
            };

            let hit = match mode {
                CompareMode::Substring => field.contains(value),
                CompareMode::IgnoreCase => field.eq_ignore_ascii_case(value),
                CompareMode::Integer => !field.trim().is_empty() && Some(atoi(field)) == int_value,
            };

            if hit {
                self.current_index.store(index, Ordering::SeqCst);
                return Some(row.clone());
            }
        }
        None
    }

    /// Reads the row after the cursor and advances the cursor
    pub fn next_line(&self) -> Option<Row> {
        let next = self.current_index.load(Ordering::SeqCst) + 1;
        let row = self.rows.get(next)?;
        self.current_index.store(next, Ordering::SeqCst);
        Some(row.clone())
    }

    /// Scans for a row and projects one of its columns; empty when missing
    pub fn get_field(&self, key_column: &str, value: &str, mode: CompareMode, target_column: &str) -> String {
        match self.scan(key_column, value, mode) {
            Some(row) => self.field(&row, target_column).to_string(),
            None => String::new(),
        }
    }
}

/// Joins physical lines into logical records.
///
/// A trailing backslash always continues a line. Otherwise the next line is
/// appended while the record holds an unbalanced quote and does not yet end
/// in `,` or `"`. This is a heuristic rather than a CSV grammar.
fn logical_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut lines = content.lines();

    while let Some(first) = lines.next() {
        let trimmed = first.trim_end_matches('\r');
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut record = trimmed.to_string();
        loop {
            let explicit = record.ends_with('\\');
            let open_quote = record.matches('"').count() % 2 == 1
                && !record.ends_with(',')
                && !record.ends_with('"');

            if !explicit && !open_quote {
                break;
            }
            match lines.next() {
                Some(next) => {
                    if explicit {
                        record.pop();
                    } else {
                        record.push('\n');
                    }
                    record.push_str(next.trim_end_matches('\r'));
                },
                None => break,
            }
        }
        records.push(record);
    }
    records
}

/// Splits a record into fields, honouring quotes and doubled quotes
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            },
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
