//! CSV dataset loading.
//!
//! One CSV row becomes one [`Record`]. Column names vary across the source
//! datasets (`Country`/`Year`/`Value` being the common case), so the header
//! mapping is explicit and overridable. Coercion rules:
//!
//! - `year`: integer like `2019`, or a date cell like `2019-01-01` (parsed
//!   with chrono, the year is kept). Anything else is a fatal error.
//! - `value`: `f64`; an empty, non-numeric, or non-finite cell coerces to
//!   `None` and is logged, never fatal.

use crate::models::Record;
use chrono::{Datelike, NaiveDate};
use log::warn;
use std::path::Path;
use thiserror::Error;

/// Fatal loader errors. A chart must not render from a dataset that failed
/// to load; partial data would be misleading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("missing required column `{0}` in CSV header")]
    MissingColumn(String),
    #[error("row {row}: invalid year `{cell}`")]
    Year { row: usize, cell: String },
    #[error("no usable rows in {path}")]
    Empty { path: String },
}

/// Maps Record attributes onto CSV header names.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub country: String,
    pub year: String,
    pub value: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            country: "Country".into(),
            year: "Year".into(),
            value: "Value".into(),
        }
    }
}

/// Load records with the default `Country`/`Year`/`Value` header mapping.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, LoadError> {
    load_csv_with(path, &ColumnMap::default())
}

/// Load records with an explicit header mapping.
pub fn load_csv_with<P: AsRef<Path>>(path: P, cols: &ColumnMap) -> Result<Vec<Record>, LoadError> {
    let path_str = path.as_ref().to_string_lossy().into_owned();
    let file = std::fs::File::open(path.as_ref()).map_err(|e| LoadError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr.headers().map_err(|e| LoadError::Csv {
        path: path_str.clone(),
        source: e,
    })?;
    let col = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let (ci, yi, vi) = (col(&cols.country)?, col(&cols.year)?, col(&cols.value)?);

    let mut out = Vec::new();
    let mut coerced = 0usize;
    for (idx, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| LoadError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
        // Header is line 1; first data row is line 2.
        let line = idx + 2;
        let country = row.get(ci).unwrap_or("").to_string();
        let year_cell = row.get(yi).unwrap_or("");
        let year = parse_year(year_cell).ok_or_else(|| LoadError::Year {
            row: line,
            cell: year_cell.to_string(),
        })?;
        let value_cell = row.get(vi).unwrap_or("");
        let value = match value_cell.parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                coerced += 1;
                None
            }
        };
        out.push(Record {
            country,
            year,
            value,
        });
    }

    if coerced > 0 {
        warn!(
            "{}: {} row(s) with missing or non-numeric value (kept, excluded from extents)",
            path_str, coerced
        );
    }
    if out.is_empty() {
        return Err(LoadError::Empty { path: path_str });
    }
    Ok(out)
}

/// Parse a year cell: plain integer, or a date in a couple of common layouts.
fn parse_year(cell: &str) -> Option<i32> {
    if let Ok(y) = cell.parse::<i32>() {
        return Some(y);
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(cell, fmt) {
            return Some(d.year());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_cells_parse_plain_and_dated() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year("2019-01-01"), Some(2019));
        assert_eq!(parse_year("31/12/2019"), Some(2019));
        assert_eq!(parse_year("next year"), None);
    }
}
