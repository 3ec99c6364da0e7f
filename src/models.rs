use serde::{Deserialize, Serialize};

/// Tidy structure used by this crate (one row = one observation).
///
/// `value` is `None` when the source cell was missing or non-numeric; such
/// rows survive loading but are excluded from extents and rendered shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl Record {
    pub fn new(country: impl Into<String>, year: i32, value: Option<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            value,
        }
    }

    /// The finite measurement, if the row carries one.
    pub fn finite_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Grouping key used in stats and plotting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub country: String,
}

/// Direction of a value sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Distinct countries in first-occurrence order.
pub fn distinct_countries(records: &[Record]) -> Vec<String> {
    let mut seen: ahash::AHashSet<&str> = ahash::AHashSet::new();
    let mut out = Vec::new();
    for r in records {
        if seen.insert(r.country.as_str()) {
            out.push(r.country.clone());
        }
    }
    out
}

/// Distinct years, ascending.
pub fn distinct_years_sorted(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Inclusive (min, max) year bounds, or `None` for an empty dataset.
pub fn year_bounds(records: &[Record]) -> Option<(i32, i32)> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some((min, max))
}

/// Maximum finite value over the full dataset.
///
/// Missing and non-finite values never participate, so they cannot poison
/// the extent.
pub fn global_value_max(records: &[Record]) -> Option<f64> {
    records
        .iter()
        .filter_map(Record::finite_value)
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}
