//! Event handling.
//!
//! Discrete UI interactions arrive as [`UiEvent`]s and are processed
//! strictly one at a time: each mutating event updates the filter state and
//! performs exactly one redraw (scene rebuild + reconcile) before the next
//! event is looked at. `Session` owns the dataset, the filter state, and the
//! shape store exclusively, so redraws stay serialized even when the host
//! runs on multiple threads — there is simply nothing to race on.

use crate::filter::{CountryFilter, FilterState};
use crate::models::{self, Record, SortOrder};
use crate::scene::{self, ChartKind, LegendSpec, ReconcileStats, Scene, ShapeStore};
use anyhow::{Result, bail};
use log::debug;
use std::collections::VecDeque;

/// One discrete interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Dropdown change; `None` selects all countries.
    CountrySelected(Option<String>),
    /// Slider input; clamped to the dataset's year bounds.
    YearSlider(i32),
    SortAscending,
    SortDescending,
    TopN(usize),
    BottomN(usize),
    ClearSort,
    /// Legend click; flips the country's shape opacity only.
    LegendToggle(String),
}

/// FIFO queue of pending interactions, drained one event at a time.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: UiEvent) {
        self.queue.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run every queued event to completion, in arrival order.
    pub fn drain_into(&mut self, session: &mut Session) -> ReconcileStats {
        let mut last = ReconcileStats::default();
        while let Some(event) = self.queue.pop_front() {
            last = session.dispatch(event);
        }
        last
    }
}

/// One chart instance: immutable dataset, filter state, keyed shape store.
#[derive(Debug)]
pub struct Session {
    dataset: Vec<Record>,
    kind: ChartKind,
    state: FilterState,
    store: ShapeStore,
    axes: scene::Axes,
    legend: LegendSpec,
    redraws: u64,
}

impl Session {
    /// Build a session and render the initial scene. An empty dataset is a
    /// fatal error: there is nothing meaningful to draw.
    pub fn new(dataset: Vec<Record>, kind: ChartKind) -> Result<Self> {
        if dataset.is_empty() {
            bail!("no data to plot");
        }
        let state = FilterState::new();
        let initial = scene::build_scene(&dataset, &state, kind);
        let mut store = ShapeStore::new();
        store.reconcile(initial.specs);
        Ok(Self {
            dataset,
            kind,
            state,
            store,
            axes: initial.axes,
            legend: initial.legend,
            redraws: 1,
        })
    }

    pub fn dataset(&self) -> &[Record] {
        &self.dataset
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn axes(&self) -> &scene::Axes {
        &self.axes
    }

    pub fn legend(&self) -> &LegendSpec {
        &self.legend
    }

    /// Redraws performed so far (one per mutating event, plus the initial).
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Handle one event to completion: mutate state, then one redraw.
    pub fn dispatch(&mut self, event: UiEvent) -> ReconcileStats {
        debug!("dispatch {:?}", event);
        match event {
            UiEvent::CountrySelected(None) => self.state.set_country_filter(CountryFilter::All),
            UiEvent::CountrySelected(Some(c)) => {
                self.state.set_country_filter(CountryFilter::Only(c))
            }
            UiEvent::YearSlider(y) => {
                // Out-of-range slider input clamps to the nearest bound.
                let clamped = match models::year_bounds(&self.dataset) {
                    Some((lo, hi)) => y.clamp(lo, hi),
                    None => y,
                };
                self.state.set_year_ceiling(clamped);
            }
            UiEvent::SortAscending => self.state.apply_sort(SortOrder::Ascending, None),
            UiEvent::SortDescending => self.state.apply_sort(SortOrder::Descending, None),
            UiEvent::TopN(n) => self.state.apply_sort(SortOrder::Descending, Some(n)),
            UiEvent::BottomN(n) => self.state.apply_sort(SortOrder::Ascending, Some(n)),
            UiEvent::ClearSort => self.state.clear_sort(),
            UiEvent::LegendToggle(c) => self.state.toggle_country_visibility(&c),
        }
        self.redraw()
    }

    /// The single redraw entry point: rebuild the scene from (dataset,
    /// state) and reconcile it into the store.
    pub fn redraw(&mut self) -> ReconcileStats {
        let Scene {
            specs,
            axes,
            legend,
        } = scene::build_scene(&self.dataset, &self.state, self.kind);
        self.axes = axes;
        self.legend = legend;
        self.redraws += 1;
        self.store.reconcile(specs)
    }

    /// Tooltip for the shape bound to (country, year), if that record is
    /// currently rendered. Read-only; never mutates dataset or state.
    pub fn tooltip(&self, country: &str, year: i32) -> Option<String> {
        let rendered = self.store.get(&scene::ShapeKey::Point(country.to_string(), year))
            .or_else(|| self.store.get(&scene::ShapeKey::Cell(country.to_string(), year)))
            .or_else(|| self.store.get(&scene::ShapeKey::Bar(country.to_string())));
        rendered?;
        self.dataset
            .iter()
            .find(|r| r.country == country && r.year == year && r.finite_value().is_some())
            .map(scene::tooltip_text)
    }
}
