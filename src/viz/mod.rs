//! Visualization: render a reconciled shape scene to **SVG** or **PNG**.
//!
//! - Distinct series colors (d3 category-10 palette)
//! - Locale-aware tick labels (`30,000` vs `30.000`)
//! - Legend placement: `Inside`, `Right`, `Bottom`; heatmaps get a vertical
//!   color bar instead
//! - Chart kinds: `Line` (paths + point markers + end labels), `Bar`,
//!   `Heatmap`
//!
//! The scene layer decides *what* exists (keyed shapes in data coordinates);
//! this module only maps those shapes through plotters.

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{DEFAULT_LEGEND_MODE, LegendMode};

use crate::filter::FilterState;
use crate::models::Record;
use crate::scene::{self, Axis, Axes, ChartKind, Geom, LegendSpec, Shape, ShapeStore};
use anyhow::{Result, anyhow, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::{draw_color_bar, draw_legend_panel, estimate_bottom_legend_height_px};
use util::{
    choose_axis_scale, compute_categorical_label_area_px, compute_left_label_area_px, format_tick,
    map_locale, to_rgba,
};

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS
/// fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Rendering knobs shared by all chart kinds.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Empty string omits the caption.
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub locale_tag: String,
    pub legend: LegendMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: String::new(),
            x_desc: "Year".into(),
            y_desc: "Value".into(),
            locale_tag: "en".into(),
            legend: DEFAULT_LEGEND_MODE,
        }
    }
}

/// Convenience: build the scene for (records, state, kind) and render it in
/// one call. Errors on an empty dataset; an empty *view* still renders axes.
pub fn plot_chart<P: AsRef<Path>>(
    records: &[Record],
    state: &FilterState,
    kind: ChartKind,
    opts: &RenderOptions,
    out_path: P,
) -> Result<()> {
    if records.is_empty() {
        bail!("no data to plot");
    }
    let built = scene::build_scene(records, state, kind);
    let mut store = ShapeStore::new();
    store.reconcile(built.specs);
    render(&store, &built.axes, &built.legend, opts, out_path)
}

/// Render an already-reconciled store (e.g. a `Session`'s) to a file.
/// Backend is chosen by extension: `.svg` is vector, anything else bitmap.
pub fn render<P: AsRef<Path>>(
    store: &ShapeStore,
    axes: &Axes,
    legend: &LegendSpec,
    opts: &RenderOptions,
    out_path: P,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let shapes: Vec<&Shape> = store.shapes().collect();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root =
            SVGBackend::new(path_string.as_str(), (opts.width, opts.height)).into_drawing_area();
        draw_chart(root, &shapes, axes, legend, opts)
    } else {
        let root =
            BitMapBackend::new(path_string.as_str(), (opts.width, opts.height)).into_drawing_area();
        draw_chart(root, &shapes, axes, legend, opts)
    }
}

fn axis_range(axis: &Axis) -> (f64, f64) {
    match axis {
        Axis::Linear { min, max } => (*min, *max),
        // Bands are centered on their integer index, so the axis runs half a
        // band past each end.
        Axis::Categorical(labels) => (-0.5, labels.len().max(1) as f64 - 0.5),
    }
}

/// Tick formatter for one axis. Categorical ticks only label (near-)integer
/// positions; everything else stays blank.
fn axis_formatter<'a>(
    axis: &'a Axis,
    locale: &'a num_format::Locale,
) -> Box<dyn Fn(&f64) -> String + 'a> {
    match axis {
        Axis::Linear { .. } => Box::new(move |v: &f64| format_tick(*v, locale)),
        Axis::Categorical(labels) => Box::new(move |v: &f64| {
            let r = v.round();
            if (v - r).abs() > 1e-6 || r < 0.0 {
                return String::new();
            }
            labels.get(r as usize).cloned().unwrap_or_default()
        }),
    }
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    shapes: &[&Shape],
    axes: &Axes,
    legend_spec: &LegendSpec,
    opts: &RenderOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: i32 = 16;
    let locale = map_locale(&opts.locale_tag);

    let (x_min, x_max) = axis_range(&axes.x);
    let (y_min_raw, y_max_raw) = axis_range(&axes.y);

    // Axis scaling for large magnitudes (thousands/millions/...); linear
    // value axes only, band axes are never scaled.
    let (yscale, scale_word) = match axes.y {
        Axis::Linear { .. } => choose_axis_scale(y_min_raw.abs().max(y_max_raw.abs())),
        Axis::Categorical(_) => (1.0, ""),
    };
    let (y_min, y_max) = (y_min_raw / yscale, y_max_raw / yscale);

    let y_axis_title = if scale_word.is_empty() {
        opts.y_desc.clone()
    } else {
        format!("{} ({scale_word})", opts.y_desc)
    };

    let y_label_count = 10usize;
    let left_label_width_px = match &axes.y {
        Axis::Linear { .. } => {
            compute_left_label_area_px(y_min, y_max, y_label_count, 12, locale)
        }
        Axis::Categorical(labels) => compute_categorical_label_area_px(labels, 12),
    };
    let axis_x_start_px = MARGIN + left_label_width_px as i32;

    let (root_w_u32, root_h_u32) = root.dim_in_pixel();
    let (root_w, root_h) = (root_w_u32 as i32, root_h_u32 as i32);

    // Split off the legend area before building the chart.
    let (plot_area, legend_area_opt): (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) =
        match (legend_spec, opts.legend) {
            (LegendSpec::None, _) => (root, None),
            (LegendSpec::ColorBar { .. }, _) => {
                let (plot, bar) = root.split_horizontally(root_w - 96);
                (plot, Some(bar))
            }
            (LegendSpec::Swatches(_), LegendMode::Inside) => (root, None),
            (LegendSpec::Swatches(_), LegendMode::Right) => {
                let (plot, panel) = root.split_horizontally((85).percent_width());
                (plot, Some(panel))
            }
            (LegendSpec::Swatches(items), LegendMode::Bottom) => {
                let labels: Vec<String> = items.iter().map(|(l, _, _)| l.clone()).collect();
                let h = estimate_bottom_legend_height_px(&labels, axis_x_start_px, root_w).max(40);
                let (plot, band) = root.split_vertically((root_h - h).max(40));
                (plot, Some(band))
            }
        };

    plot_area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(MARGIN as u32);
    if !opts.title.trim().is_empty() {
        builder.caption(&opts.title, (FontFamily::SansSerif, 24));
    }
    let mut chart = builder
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_fmt = axis_formatter(&axes.x, locale);
    let y_scaled_axis;
    let y_fmt = match &axes.y {
        Axis::Linear { .. } => {
            y_scaled_axis = Axis::Linear { min: y_min, max: y_max };
            axis_formatter(&y_scaled_axis, locale)
        }
        cat => axis_formatter(cat, locale),
    };
    let x_label_count = match &axes.x {
        Axis::Linear { min, max } => (((max - min) as usize) + 1).min(12),
        Axis::Categorical(labels) => labels.len().min(24).max(2),
    };
    let y_mesh_count = match &axes.y {
        Axis::Linear { .. } => y_label_count,
        Axis::Categorical(labels) => labels.len().max(2),
    };

    chart
        .configure_mesh()
        .x_desc(&opts.x_desc)
        .y_desc(y_axis_title)
        .x_labels(x_label_count)
        .y_labels(y_mesh_count)
        .x_label_formatter(x_fmt.as_ref())
        .y_label_formatter(y_fmt.as_ref())
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Shapes arrive in scene order (paths, then markers, then labels).
    for shape in shapes {
        let color = to_rgba(shape.color, shape.opacity);
        match &shape.geom {
            Geom::Path(points) => {
                let style = ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: 2,
                };
                let pts: Vec<(f64, f64)> =
                    points.iter().map(|(x, y)| (*x, *y / yscale)).collect();
                chart
                    .draw_series(LineSeries::new(pts, style))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            Geom::Circle { x, y, radius } => {
                chart
                    .draw_series(std::iter::once(Circle::new(
                        (*x, *y / yscale),
                        *radius,
                        color.filled(),
                    )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            Geom::Rect { x0, y0, x1, y1 } => {
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(*x0, *y0 / yscale), (*x1, *y1 / yscale)],
                        color.filled(),
                    )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            Geom::Text { x, y, text } => {
                let style = TextStyle::from((FontFamily::SansSerif, 13))
                    .pos(Pos::new(HPos::Left, VPos::Center))
                    .color(&color);
                chart
                    .draw_series(std::iter::once(Text::new(
                        text.clone(),
                        (*x, *y / yscale),
                        style,
                    )))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
    }

    // Legend rendering.
    match (legend_spec, opts.legend, &legend_area_opt) {
        (LegendSpec::Swatches(items), LegendMode::Inside, _) if !items.is_empty() => {
            for (label, rgb, hidden) in items {
                let color = to_rgba(*rgb, if *hidden { 0.35 } else { 1.0 });
                let style = ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: 2,
                };
                let text = label.clone();
                chart
                    .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), style))
                    .map_err(|e| anyhow!("{:?}", e))?
                    .label(label.clone())
                    .legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + Circle::new((x + 8, y), 4, color.filled())
                            + Text::new(text.clone(), (x + 20, y), (FontFamily::SansSerif, 14))
                    });
            }
            chart
                .configure_series_labels()
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.85))
                .label_font((FontFamily::SansSerif, 14))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        (LegendSpec::Swatches(items), mode, Some(area)) => {
            draw_legend_panel(
                area,
                items,
                matches!(mode, LegendMode::Bottom),
                axis_x_start_px,
            )?;
        }
        (LegendSpec::ColorBar { max, ramp }, _, Some(area)) => {
            draw_color_bar(area, *max, *ramp, locale)?;
        }
        _ => {}
    }

    plot_area.present().map_err(|e| anyhow!("{:?}", e))?;
    if let Some(ref area) = legend_area_opt {
        area.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
