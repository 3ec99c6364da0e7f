//! Color palettes and ramps, backend-free.
//!
//! The scene layer stores plain RGB so it never depends on the plotting
//! backend; the viz module converts at draw time.

/// Plain 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The d3 `schemeCategory10` series palette.
/// Order: Blue, Orange, Green, Red, Purple, Brown, Pink, Gray, Olive, Cyan.
pub const CATEGORY10: [Rgb; 10] = [
    Rgb(31, 119, 180),  // blue   (#1F77B4)
    Rgb(255, 127, 14),  // orange (#FF7F0E)
    Rgb(44, 160, 44),   // green  (#2CA02C)
    Rgb(214, 39, 40),   // red    (#D62728)
    Rgb(148, 103, 189), // purple (#9467BD)
    Rgb(140, 86, 75),   // brown  (#8C564B)
    Rgb(227, 119, 194), // pink   (#E377C2)
    Rgb(127, 127, 127), // gray   (#7F7F7F)
    Rgb(188, 189, 34),  // olive  (#BCBD22)
    Rgb(23, 190, 207),  // cyan   (#17BECF)
];

/// Get a series color from the categorical palette.
#[inline]
pub fn series_color(idx: usize) -> Rgb {
    CATEGORY10[idx % CATEGORY10.len()]
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb(lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
}

/// Piecewise-linear ramp over fixed color stops, `t` in [0, 1].
fn ramp(stops: &[Rgb], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let n = stops.len() - 1;
    let pos = t * n as f64;
    let i = (pos.floor() as usize).min(n - 1);
    lerp_rgb(stops[i], stops[i + 1], pos - i as f64)
}

/// Sequential yellow-green-blue ramp (heatmap cells and color bar).
pub fn ylgnbu(t: f64) -> Rgb {
    const STOPS: [Rgb; 5] = [
        Rgb(255, 255, 217), // #FFFFD9
        Rgb(199, 233, 180), // #C7E9B4
        Rgb(65, 182, 196),  // #41B6C4
        Rgb(34, 94, 168),   // #225EA8
        Rgb(8, 29, 88),     // #081D58
    ];
    ramp(&STOPS, t)
}

/// Light-green to dark-green ramp (bar fills).
pub fn green_ramp(t: f64) -> Rgb {
    ramp(&[Rgb(144, 238, 144), Rgb(0, 100, 0)], t)
}
