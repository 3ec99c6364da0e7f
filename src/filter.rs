//! Filter/sort state.
//!
//! One instance of [`FilterState`] fully determines the derived view: the
//! view builder is a pure function of (dataset, state). The state is owned
//! and passed explicitly; there is no ambient singleton. Every operation
//! here is synchronous and idempotent under repeated identical input, and
//! none of them touch the dataset itself.

use crate::models::SortOrder;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Country selection: everything, or a single country.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountryFilter {
    #[default]
    All,
    Only(String),
}

/// An active value sort: direction plus an optional take-first-N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub order: SortOrder,
    pub limit: Option<usize>,
}

/// Mutable filter/sort state for one chart instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub country: CountryFilter,
    /// Inclusive upper bound on `year`; records above it are excluded.
    pub year_ceiling: Option<i32>,
    pub sort: Option<SortSpec>,
    /// Presentation-only: hidden countries keep their shapes at opacity 0.
    /// Never consulted by the view builder.
    hidden: AHashSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a single country, or `CountryFilter::All`. Clears nothing else.
    pub fn set_country_filter(&mut self, filter: CountryFilter) {
        self.country = filter;
    }

    /// Set the inclusive year ceiling. Callers with access to the dataset
    /// bounds should clamp first (the event layer does).
    pub fn set_year_ceiling(&mut self, year: i32) {
        self.year_ceiling = Some(year);
    }

    pub fn clear_year_ceiling(&mut self) {
        self.year_ceiling = None;
    }

    /// Activate a stable value sort with an optional limit.
    pub fn apply_sort(&mut self, order: SortOrder, limit: Option<usize>) {
        self.sort = Some(SortSpec { order, limit });
    }

    /// Revert to the dataset's natural order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Flip a country's visibility. Affects shape opacity only.
    pub fn toggle_country_visibility(&mut self, country: &str) {
        if !self.hidden.remove(country) {
            self.hidden.insert(country.to_string());
        }
    }

    pub fn is_hidden(&self, country: &str) -> bool {
        self.hidden.contains(country)
    }

    pub fn hidden_countries(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }
}
