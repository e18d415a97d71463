use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use itertools::Itertools;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::record::GEAR_NONE;

pub const GEAR_COLUMN: &str = "gear";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabulateOptions {
    /// Rewrite absent, non-string or blank `gear` values to "None".
    pub normalize_gear: bool,
}

impl Default for TabulateOptions {
    fn default() -> Self {
        TabulateOptions { normalize_gear: true }
    }
}

/// `records.json` -> `records.csv`.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("csv")
}

/// Load a top-level JSON array whose elements are all objects.
pub fn load_rows(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(Error::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(Error::NotAnObject {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect()
}

pub fn normalize_gear(row: &mut Map<String, Value>) {
    let blank = match row.get(GEAR_COLUMN) {
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => true,
    };
    if blank {
        row.insert(GEAR_COLUMN.to_string(), Value::String(GEAR_NONE.to_string()));
    }
}

/// Union of keys, alphabetical, with `gear` moved to the end.
pub fn columns(rows: &[Map<String, Value>]) -> Vec<String> {
    let (mut cols, gear): (Vec<String>, Vec<String>) = rows
        .iter()
        .flat_map(|row| row.keys())
        .unique()
        .sorted()
        .cloned()
        .partition(|k| k != GEAR_COLUMN);
    cols.extend(gear);
    cols
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render rows as CSV bytes: header, then one line per row, `\n` terminated.
pub fn to_csv(rows: &[Map<String, Value>]) -> Result<Vec<u8>> {
    let cols = columns(rows);
    if cols.is_empty() {
        return Ok(Vec::new());
    }
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(&cols)?;
    for row in rows {
        wtr.write_record(cols.iter().map(|c| cell(row.get(c))))?;
    }
    wtr.into_inner()
        .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}

/// Convert `input` to CSV at `output`. Returns the number of data rows written,
/// which is zero when there are no columns.
pub fn json_to_csv(input: &Path, output: &Path, opts: TabulateOptions) -> Result<usize> {
    let mut rows = load_rows(input)?;
    if opts.normalize_gear {
        rows.iter_mut().for_each(normalize_gear);
    }
    let bytes = to_csv(&rows)?;
    let written = if bytes.is_empty() { 0 } else { rows.len() };
    std::fs::write(output, bytes).map_err(|e| Error::io(output, e))?;
    Ok(written)
}
