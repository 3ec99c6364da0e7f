//! ohi-rs
//!
//! A lightweight Rust library for loading, filtering, visualizing, and
//! analyzing OECD health indicator datasets (one CSV row = one country,
//! year, value observation). Pairs with the `ohi` CLI.
//!
//! ### Features
//! - Load tidy CSV datasets with light type coercion
//! - Derive filtered/sorted/grouped views from an explicit filter state
//! - Keyed shape scene with upsert reconciliation across redraws
//! - Generate SVG/PNG line charts, bar charts, and heatmaps
//! - Quick per-country summary statistics (min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! use ohi_rs::{ChartKind, Session, UiEvent};
//!
//! let data = ohi_rs::loader::load_csv("mortality.csv")?;
//! let mut session = Session::new(data, ChartKind::Line)?;
//! session.dispatch(UiEvent::YearSlider(2019));
//! session.dispatch(UiEvent::CountrySelected(Some("Austria".into())));
//! ohi_rs::viz::render(
//!     session.store(),
//!     session.axes(),
//!     session.legend(),
//!     &ohi_rs::viz::RenderOptions::default(),
//!     "mortality.svg",
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod events;
pub mod filter;
pub mod loader;
pub mod models;
pub mod palette;
pub mod scene;
pub mod stats;
pub mod storage;
pub mod view;
pub mod viz;

pub use events::{EventQueue, Session, UiEvent};
pub use filter::{CountryFilter, FilterState, SortSpec};
pub use models::{Record, SortOrder};
pub use scene::{ChartKind, ReconcileStats, ShapeKey};
