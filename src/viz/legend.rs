//! Legend drawing: swatch panels for line charts and the vertical color bar
//! used as a heatmap key.

use anyhow::Result;
use num_format::Locale;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::util::{format_tick, to_rgba};
use crate::palette::Rgb;
use crate::scene::RampKind;

const FONT_PX: u32 = 14;
const MARKER_RADIUS: i32 = 4;

/// Estimate the height a bottom legend band needs for the given labels.
pub fn estimate_bottom_legend_height_px(labels: &[String], start_x: i32, total_w: i32) -> i32 {
    let line_h = FONT_PX as i32 + 6;
    let mut rows = 1i32;
    let mut x = start_x;
    for label in labels {
        let block_w = block_width(label);
        if x + block_w > total_w && x > start_x {
            rows += 1;
            x = start_x;
        }
        x += block_w;
    }
    8 + rows * line_h + 8
}

fn block_width(label: &str) -> i32 {
    12 + MARKER_RADIUS + estimate_text_width_px(label, FONT_PX) as i32 + 12
}

/// Draw swatch entries (marker + label). Hidden entries render dimmed, the
/// way a toggled-off legend item looks in the source charts.
///
/// Bottom placement flows entries left to right, wrapping; Right placement
/// stacks them in a single column.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, Rgb, bool)],
    horizontal: bool,
    axis_x_start_px: i32,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;
    let line_h = FONT_PX as i32 + 6;
    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut x = if horizontal { axis_x_start_px } else { 8 };
    let mut y = 8 + line_h / 2;

    for (label, color, hidden) in items {
        let opacity = if *hidden { 0.35 } else { 1.0 };
        let color = to_rgba(*color, opacity);

        if horizontal {
            let block_w = block_width(label);
            if x + block_w > w && x > axis_x_start_px {
                x = axis_x_start_px;
                y += line_h;
            }
            draw_entry(legend_area, x, y, label, color, &label_style)?;
            x += block_w;
        } else {
            let max_text = (w - 32).max(40) as u32;
            let shown = truncate_to_width(label, FONT_PX, max_text);
            draw_entry(legend_area, x, y, &shown, color, &label_style)?;
            y += line_h;
        }
    }
    Ok(())
}

fn draw_entry<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    y: i32,
    label: &str,
    color: RGBAColor,
    style: &TextStyle,
) -> Result<()> {
    area.draw(&Circle::new((x + 6, y), MARKER_RADIUS, color.filled()))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Text::new(
        label,
        (x + 6 + MARKER_RADIUS + 8, y),
        style.clone().color(&color),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Vertical gradient key over `[0, max]` with tick labels on the right,
/// built from stacked boxes sampling the ramp top (max) to bottom (zero).
pub fn draw_color_bar<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    max: f64,
    ramp: RampKind,
    locale: &Locale,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (_, h_u32) = legend_area.dim_in_pixel();
    let h = h_u32 as i32;

    let pad_top = 16i32;
    let pad_bottom = 24i32;
    let bar_x = 8i32;
    let bar_w = 20i32;
    let bar_h = (h - pad_top - pad_bottom).max(40);

    let num_boxes = 100i32;
    for i in 0..num_boxes {
        // Box 0 sits at the top and shows the maximum.
        let t = 1.0 - i as f64 / (num_boxes - 1) as f64;
        let y0 = pad_top + i * bar_h / num_boxes;
        let y1 = pad_top + (i + 1) * bar_h / num_boxes;
        let color = to_rgba(ramp.sample(t), 1.0);
        legend_area
            .draw(&Rectangle::new(
                [(bar_x, y0), (bar_x + bar_w, y1)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    let tick_style =
        TextStyle::from((FontFamily::SansSerif, 12)).pos(Pos::new(HPos::Left, VPos::Center));
    let ticks = 6i32;
    for i in 0..=ticks {
        let frac = i as f64 / ticks as f64;
        let value = max * (1.0 - frac);
        let y = pad_top + (frac * bar_h as f64) as i32;
        legend_area
            .draw(&Text::new(
                format_tick(value, locale),
                (bar_x + bar_w + 6, y),
                tick_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}
