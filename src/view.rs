//! Pure view construction.
//!
//! `flat_view` and `series_view` derive the rendered subset of a dataset
//! from a [`FilterState`]. Both are free of side effects and deterministic:
//! identical inputs yield identical output, record for record, in the same
//! order. Rows without a finite value are dropped here, so downstream
//! extents and sorts only ever see real numbers.

use crate::filter::{CountryFilter, FilterState};
use crate::models::{Record, SortOrder};
use ahash::AHashMap;

/// One country's ordered sub-sequence, ready for a line path.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub country: String,
    /// (year, value) ascending by year.
    pub points: Vec<(i32, f64)>,
}

impl Series {
    /// The series' own last available point (used for end-of-line labels).
    pub fn last_point(&self) -> Option<(i32, f64)> {
        self.points.last().copied()
    }
}

/// Filtered (and possibly sorted/limited) flat sequence of records.
///
/// Steps, in order: country filter, year ceiling, drop rows without a
/// finite value, stable value sort, limit. Ties in the sort keep dataset
/// order.
pub fn flat_view(records: &[Record], state: &FilterState) -> Vec<Record> {
    let mut view: Vec<Record> = records
        .iter()
        .filter(|r| match &state.country {
            CountryFilter::All => true,
            CountryFilter::Only(c) => &r.country == c,
        })
        .filter(|r| state.year_ceiling.is_none_or(|t| r.year <= t))
        .filter(|r| r.finite_value().is_some())
        .cloned()
        .collect();

    if let Some(sort) = state.sort {
        // Values are finite by construction, so total_cmp is a total order
        // consistent with the numeric order.
        match sort.order {
            SortOrder::Ascending => {
                view.sort_by(|a, b| a.value.unwrap_or(0.0).total_cmp(&b.value.unwrap_or(0.0)));
            }
            SortOrder::Descending => {
                view.sort_by(|a, b| b.value.unwrap_or(0.0).total_cmp(&a.value.unwrap_or(0.0)));
            }
        }
        if let Some(n) = sort.limit {
            view.truncate(n);
        }
    }
    view
}

/// Group the flat view by country for line-chart consumption.
///
/// Group order is first occurrence in the (possibly sorted) flat view;
/// within each group points are re-sorted ascending by year regardless of
/// any active value sort.
pub fn series_view(records: &[Record], state: &FilterState) -> Vec<Series> {
    let flat = flat_view(records, state);
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut groups: Vec<Series> = Vec::new();
    for r in &flat {
        let v = match r.finite_value() {
            Some(v) => v,
            None => continue,
        };
        let idx = *index.entry(r.country.clone()).or_insert_with(|| {
            groups.push(Series {
                country: r.country.clone(),
                points: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].points.push((r.year, v));
    }
    for s in &mut groups {
        s.points.sort_by_key(|(y, _)| *y);
    }
    groups
}

/// (min, max) of the finite values in a view. `None` for an empty view.
pub fn value_extent(records: &[Record]) -> Option<(f64, f64)> {
    let mut it = records.iter().filter_map(Record::finite_value);
    let first = it.next()?;
    let (mut lo, mut hi) = (first, first);
    for v in it {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    Some((lo, hi))
}

/// (min, max) year of a view.
pub fn year_extent(records: &[Record]) -> Option<(i32, i32)> {
    crate::models::year_bounds(records)
}
