//! Keyed shape scene and reconciliation.
//!
//! A scene is the set of shapes a chart kind derives from the current view,
//! each bound to a stable [`ShapeKey`]. The [`ShapeStore`] keeps rendered
//! shape identities across redraws with an upsert-by-key step: keys present
//! in the new scene are updated in place (geometry/color/opacity only, id
//! preserved), absent keys are removed, new keys are created.
//!
//! Geometry is kept in data coordinates (year/value, or band index for
//! categorical axes); the viz layer maps it through the plot backend.

use crate::filter::FilterState;
use crate::models::{self, Record};
use crate::palette::{self, Rgb};
use crate::view;
use ahash::AHashMap;
use log::debug;

/// Chart kinds supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Multi-series line chart with per-record points and end-of-line labels.
    Line,
    /// One bar per country (its latest year within the ceiling).
    Bar,
    /// Year x country grid, sequential fill from the global value extent.
    Heatmap,
}

/// Stable identity of a rendered shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    /// A country's line path.
    Series(String),
    /// One observation's marker on a line chart.
    Point(String, i32),
    /// One observation's heatmap cell.
    Cell(String, i32),
    /// A country's bar.
    Bar(String),
    /// A country's end-of-line label.
    Label(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geom {
    Path(Vec<(f64, f64)>),
    Circle { x: f64, y: f64, radius: u32 },
    Rect { x0: f64, y0: f64, x1: f64, y1: f64 },
    Text { x: f64, y: f64, text: String },
}

/// What a shape should look like on the next redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub key: ShapeKey,
    pub geom: Geom,
    pub color: Rgb,
    pub opacity: f64,
}

/// A shape currently held by the store. `id` survives updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: u64,
    pub key: ShapeKey,
    pub geom: Geom,
    pub color: Rgb,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Keyed shape storage with upsert/remove-extraneous reconciliation.
#[derive(Debug, Default)]
pub struct ShapeStore {
    next_id: u64,
    shapes: AHashMap<ShapeKey, Shape>,
    /// Draw order of the last reconciled scene.
    order: Vec<ShapeKey>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, key: &ShapeKey) -> Option<&Shape> {
        self.shapes.get(key)
    }

    /// Shapes in draw order (paths under points under labels).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|k| self.shapes.get(k))
    }

    /// Bring the store in line with `desired`: update the intersection in
    /// place, create additions, drop removals.
    pub fn reconcile(&mut self, desired: Vec<ShapeSpec>) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        let mut keep: ahash::AHashSet<ShapeKey> = ahash::AHashSet::with_capacity(desired.len());
        let mut order = Vec::with_capacity(desired.len());

        for spec in desired {
            keep.insert(spec.key.clone());
            order.push(spec.key.clone());
            match self.shapes.get_mut(&spec.key) {
                Some(existing) => {
                    existing.geom = spec.geom;
                    existing.color = spec.color;
                    existing.opacity = spec.opacity;
                    stats.updated += 1;
                }
                None => {
                    let id = self.next_id;
                    self.next_id += 1;
                    self.shapes.insert(
                        spec.key.clone(),
                        Shape {
                            id,
                            key: spec.key,
                            geom: spec.geom,
                            color: spec.color,
                            opacity: spec.opacity,
                        },
                    );
                    stats.created += 1;
                }
            }
        }

        let before = self.shapes.len();
        self.shapes.retain(|k, _| keep.contains(k));
        stats.removed = before - self.shapes.len();
        self.order = order;

        debug!(
            "reconcile: {} created, {} updated, {} removed",
            stats.created, stats.updated, stats.removed
        );
        stats
    }
}

/// Axis model handed to the viz layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    Linear { min: f64, max: f64 },
    Categorical(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x: Axis,
    pub y: Axis,
}

/// Which ramp a color bar legend samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampKind {
    YlGnBu,
    Green,
}

impl RampKind {
    pub fn sample(self, t: f64) -> Rgb {
        match self {
            RampKind::YlGnBu => palette::ylgnbu(t),
            RampKind::Green => palette::green_ramp(t),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendSpec {
    None,
    /// (label, color, hidden) per country, in series order.
    Swatches(Vec<(String, Rgb, bool)>),
    /// Vertical gradient key over [0, max].
    ColorBar { max: f64, ramp: RampKind },
}

/// Everything one redraw produces besides the shape identities.
#[derive(Debug, Clone)]
pub struct Scene {
    pub specs: Vec<ShapeSpec>,
    pub axes: Axes,
    pub legend: LegendSpec,
}

/// Derive the scene for (dataset, state) and a chart kind.
///
/// Axis/extent asymmetry by design: line axes follow the view, while
/// bar/heatmap color ramps (and the bar value axis) stay on the full
/// dataset's `[0, max]` so fills remain comparable across filters.
pub fn build_scene(dataset: &[Record], state: &FilterState, kind: ChartKind) -> Scene {
    match kind {
        ChartKind::Line => build_line_scene(dataset, state),
        ChartKind::Bar => build_bar_scene(dataset, state),
        ChartKind::Heatmap => build_heatmap_scene(dataset, state),
    }
}

/// Per-country colors are assigned by first-occurrence order over the full
/// dataset, so a country keeps its color under any filter.
fn color_index(dataset: &[Record]) -> AHashMap<String, usize> {
    models::distinct_countries(dataset)
        .into_iter()
        .enumerate()
        .map(|(i, c)| (c, i))
        .collect()
}

fn pad_equal(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn build_line_scene(dataset: &[Record], state: &FilterState) -> Scene {
    let colors = color_index(dataset);
    let series = view::series_view(dataset, state);
    let flat = view::flat_view(dataset, state);

    // View-driven axes; when the filter leaves nothing, fall back to the
    // full dataset so an empty chart still shows meaningful axes.
    let (y_min, y_max) = view::value_extent(&flat)
        .or_else(|| view::value_extent(dataset))
        .map(|(_, max)| (0.0, max))
        .unwrap_or((0.0, 1.0));
    let (x_min, x_max) = view::year_extent(&flat)
        .or_else(|| models::year_bounds(dataset))
        .map(|(a, b)| (a as f64, b as f64))
        .unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_equal(x_min, x_max);
    let (y_min, y_max) = pad_equal(y_min, y_max);

    let color_of = |country: &str| -> Rgb {
        palette::series_color(colors.get(country).copied().unwrap_or(0))
    };
    let opacity_of = |country: &str| -> f64 {
        if state.is_hidden(country) { 0.0 } else { 1.0 }
    };

    let mut specs = Vec::new();
    for s in &series {
        specs.push(ShapeSpec {
            key: ShapeKey::Series(s.country.clone()),
            geom: Geom::Path(s.points.iter().map(|(y, v)| (*y as f64, *v)).collect()),
            color: color_of(&s.country),
            opacity: opacity_of(&s.country),
        });
    }
    for r in &flat {
        if let Some(v) = r.finite_value() {
            specs.push(ShapeSpec {
                key: ShapeKey::Point(r.country.clone(), r.year),
                geom: Geom::Circle {
                    x: r.year as f64,
                    y: v,
                    radius: 3,
                },
                color: color_of(&r.country),
                opacity: opacity_of(&r.country),
            });
        }
    }
    // Labels sit at each country's own last available point, not at the
    // dataset's global last year (which a country may not reach).
    for s in &series {
        if let Some((year, value)) = s.last_point() {
            specs.push(ShapeSpec {
                key: ShapeKey::Label(s.country.clone()),
                geom: Geom::Text {
                    x: year as f64,
                    y: value,
                    text: s.country.clone(),
                },
                color: color_of(&s.country),
                opacity: opacity_of(&s.country),
            });
        }
    }

    let legend = LegendSpec::Swatches(
        series
            .iter()
            .map(|s| {
                (
                    s.country.clone(),
                    color_of(&s.country),
                    state.is_hidden(&s.country),
                )
            })
            .collect(),
    );

    Scene {
        specs,
        axes: Axes {
            x: Axis::Linear { min: x_min, max: x_max },
            y: Axis::Linear { min: y_min, max: y_max },
        },
        legend,
    }
}

/// The bar view: each country's latest record within the ceiling, then the
/// active value sort and limit over that reduced set.
fn bar_records(dataset: &[Record], state: &FilterState) -> Vec<Record> {
    let mut unsorted = state.clone();
    unsorted.clear_sort();
    let flat = view::flat_view(dataset, &unsorted);

    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut latest: Vec<Record> = Vec::new();
    for r in flat {
        match index.get(&r.country) {
            Some(&i) => {
                if r.year >= latest[i].year {
                    latest[i] = r;
                }
            }
            None => {
                index.insert(r.country.clone(), latest.len());
                latest.push(r);
            }
        }
    }

    if let Some(sort) = state.sort {
        match sort.order {
            crate::models::SortOrder::Ascending => {
                latest.sort_by(|a, b| a.value.unwrap_or(0.0).total_cmp(&b.value.unwrap_or(0.0)));
            }
            crate::models::SortOrder::Descending => {
                latest.sort_by(|a, b| b.value.unwrap_or(0.0).total_cmp(&a.value.unwrap_or(0.0)));
            }
        }
        if let Some(n) = sort.limit {
            latest.truncate(n);
        }
    }
    latest
}

fn build_bar_scene(dataset: &[Record], state: &FilterState) -> Scene {
    let global_max = models::global_value_max(dataset).unwrap_or(1.0);
    let bars = bar_records(dataset, state);

    let mut specs = Vec::with_capacity(bars.len());
    for (i, r) in bars.iter().enumerate() {
        let v = match r.finite_value() {
            Some(v) => v,
            None => continue,
        };
        let t = if global_max > 0.0 { v / global_max } else { 0.0 };
        specs.push(ShapeSpec {
            key: ShapeKey::Bar(r.country.clone()),
            // Centered on the category index so tick labels hit bar centers.
            geom: Geom::Rect {
                x0: i as f64 - 0.4,
                y0: 0.0,
                x1: i as f64 + 0.4,
                y1: v,
            },
            color: palette::green_ramp(t),
            opacity: if state.is_hidden(&r.country) { 0.0 } else { 1.0 },
        });
    }

    Scene {
        specs,
        axes: Axes {
            // Bar order follows the (possibly sorted) view; the value axis
            // stays global so bars are comparable across years and filters.
            x: Axis::Categorical(bars.iter().map(|r| r.country.clone()).collect()),
            y: Axis::Linear { min: 0.0, max: global_max.max(f64::EPSILON) },
        },
        legend: LegendSpec::None,
    }
}

fn build_heatmap_scene(dataset: &[Record], state: &FilterState) -> Scene {
    let global_max = models::global_value_max(dataset).unwrap_or(1.0);
    // Band domains come from the full dataset so cells never jump around
    // when a filter narrows the view.
    let years = models::distinct_years_sorted(dataset);
    let countries = models::distinct_countries(dataset);
    let year_index: AHashMap<i32, usize> = years.iter().enumerate().map(|(i, y)| (*y, i)).collect();
    let country_index: AHashMap<&str, usize> = countries
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let flat = view::flat_view(dataset, state);
    let mut specs = Vec::with_capacity(flat.len());
    for r in &flat {
        let v = match r.finite_value() {
            Some(v) => v,
            None => continue,
        };
        let (Some(&xi), Some(&yi)) = (year_index.get(&r.year), country_index.get(r.country.as_str()))
        else {
            continue;
        };
        let t = if global_max > 0.0 { v / global_max } else { 0.0 };
        specs.push(ShapeSpec {
            key: ShapeKey::Cell(r.country.clone(), r.year),
            geom: Geom::Rect {
                x0: xi as f64 - 0.45,
                y0: yi as f64 - 0.45,
                x1: xi as f64 + 0.45,
                y1: yi as f64 + 0.45,
            },
            color: palette::ylgnbu(t),
            opacity: if state.is_hidden(&r.country) { 0.0 } else { 1.0 },
        });
    }

    Scene {
        specs,
        axes: Axes {
            x: Axis::Categorical(years.iter().map(|y| y.to_string()).collect()),
            y: Axis::Categorical(countries),
        },
        legend: LegendSpec::ColorBar {
            max: global_max,
            ramp: RampKind::YlGnBu,
        },
    }
}

/// Tooltip body for a hovered shape's record. Pure presentation; reads the
/// bound record only.
pub fn tooltip_text(record: &Record) -> String {
    let value = match record.finite_value() {
        Some(v) => {
            let s = format!("{:.4}", v);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        None => "NA".to_string(),
    };
    format!(
        "Country: {}\nYear: {}\nValue: {}",
        record.country, record.year, value
    )
}
