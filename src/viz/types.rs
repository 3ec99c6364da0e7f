//! Public types and constants for the visualization module.

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    /// Overlay legend inside the plotting area (may overlap data).
    Inside,
    /// Separate, non-overlapping legend panel on the right side.
    Right,
    /// Separate, non-overlapping legend band at the bottom.
    Bottom,
}

/// Horizontal legend below the chart keeps labels close to the x-axis start
/// and works well for dashboards.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Bottom;
