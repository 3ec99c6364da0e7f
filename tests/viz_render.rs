use ohi_rs::filter::{CountryFilter, FilterState};
use ohi_rs::models::Record;
use ohi_rs::scene::ChartKind;
use ohi_rs::viz::{self, LegendMode, RenderOptions};
use std::fs;
use std::path::PathBuf;

fn sample_records() -> Vec<Record> {
    let mut out = Vec::new();
    for (y, v) in [(2017, 120.0), (2018, 118.0), (2019, 121.0)] {
        out.push(Record::new("Austria", y, Some(v)));
    }
    for (y, v) in [(2017, 150.0), (2018, 149.0), (2019, 160.0)] {
        out.push(Record::new("Belgium", y, Some(v)));
    }
    out.push(Record::new("Chile", 2018, None));
    out
}

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str, ext: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("ohi_viz_{}.{}", name, ext));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "{} has content", ext);
    fs::remove_file(&path).ok();
}

#[test]
fn chart_kinds_produce_files() {
    let records = sample_records();
    let state = FilterState::new();
    for (kind, name) in [
        (ChartKind::Line, "line"),
        (ChartKind::Bar, "bar"),
        (ChartKind::Heatmap, "heatmap"),
    ] {
        write_and_check(
            |path| {
                viz::plot_chart(&records, &state, kind, &RenderOptions::default(), path).unwrap();
            },
            name,
            "svg",
        );
    }
}

#[test]
fn png_backend_works() {
    let records = sample_records();
    let state = FilterState::new();
    write_and_check(
        |path| {
            viz::plot_chart(
                &records,
                &state,
                ChartKind::Line,
                &RenderOptions::default(),
                path,
            )
            .unwrap();
        },
        "line",
        "png",
    );
}

#[test]
fn legend_modes_render() {
    let records = sample_records();
    let state = FilterState::new();
    for (mode, name) in [
        (LegendMode::Inside, "inside"),
        (LegendMode::Right, "right"),
        (LegendMode::Bottom, "bottom"),
    ] {
        let opts = RenderOptions {
            legend: mode,
            title: "Preventable mortality".into(),
            ..RenderOptions::default()
        };
        write_and_check(
            |path| {
                viz::plot_chart(&records, &state, ChartKind::Line, &opts, path).unwrap();
            },
            &format!("legend_{name}"),
            "svg",
        );
    }
}

#[test]
fn empty_view_renders_axes_only() {
    let records = sample_records();
    let mut state = FilterState::new();
    state.set_country_filter(CountryFilter::Only("Atlantis".into()));
    write_and_check(
        |path| {
            viz::plot_chart(
                &records,
                &state,
                ChartKind::Line,
                &RenderOptions::default(),
                path,
            )
            .unwrap();
        },
        "empty_view",
        "svg",
    );
}

#[test]
fn empty_dataset_is_an_error() {
    let tmp = std::env::temp_dir().join("ohi_viz_should_not_exist.svg");
    let err = viz::plot_chart(
        &[],
        &FilterState::new(),
        ChartKind::Line,
        &RenderOptions::default(),
        &tmp,
    );
    assert!(err.is_err());
}
