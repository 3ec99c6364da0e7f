//! Utility functions for visualization: color conversion, axis scaling,
//! locale mapping, tick formatting.

use crate::palette::Rgb;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Convert a palette color + opacity into a plotters color.
#[inline]
pub fn to_rgba(color: Rgb, opacity: f64) -> RGBAColor {
    RGBAColor(color.0, color.1, color.2, opacity)
}

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`,
/// `german`, `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Format one numeric tick label. Large whole-ish values get locale group
/// separators; small values keep magnitude-dependent precision.
pub fn format_tick(v: f64, locale: &Locale) -> String {
    let a = v.abs();
    if a >= 1000.0 && (v - v.round()).abs() < 1e-9 {
        return (v.round() as i64).to_formatted_string(locale);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

/// Compute a tight left label area width for the Y axis (in pixels), based
/// on the tick labels that will appear. Clamped to a sensible range.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        let s = format_tick(v, locale);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    let with_padding = max_px.saturating_add(18);
    with_padding.clamp(48, 160)
}

/// Left label area for a categorical axis: longest label wins.
pub fn compute_categorical_label_area_px(labels: &[String], font_px: u32) -> u32 {
    let max_px = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    max_px.saturating_add(18).clamp(48, 200)
}
