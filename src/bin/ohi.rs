use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ohi_rs::viz::{self, LegendMode, RenderOptions};
use ohi_rs::{ChartKind, Session, UiEvent, loader, stats, storage, view};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ohi",
    version,
    about = "Load, filter, visualize & summarize OECD health indicator CSVs"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart from a CSV (and optionally export the view and print stats).
    Chart(ChartArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum KindArg {
    Line,
    Bar,
    Heatmap,
}

#[derive(ValueEnum, Clone, Debug)]
enum LegendArg {
    Inside,
    Right,
    Bottom,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Input CSV with Country/Year/Value columns.
    #[arg(short, long)]
    input: PathBuf,
    /// Chart kind.
    #[arg(short, long, value_enum, default_value_t = KindArg::Line)]
    kind: KindArg,
    /// Output image path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Show a single country only (omit for all).
    #[arg(long)]
    country: Option<String>,
    /// Inclusive upper bound on Year (clamped to the dataset's range).
    #[arg(long)]
    max_year: Option<i32>,
    /// Sort by value before drawing (asc or desc).
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
    /// Keep only the N largest values (implies descending sort).
    #[arg(long, conflicts_with_all = ["bottom", "sort"])]
    top: Option<usize>,
    /// Keep only the N smallest values (implies ascending sort).
    #[arg(long, conflicts_with = "sort")]
    bottom: Option<usize>,
    /// Countries to hide (comma/semicolon separated); shapes keep their slot at opacity 0.
    #[arg(long)]
    hide: Option<String>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Chart title (omit for none).
    #[arg(long, default_value = "")]
    title: String,
    /// Y-axis description.
    #[arg(long, default_value = "Value")]
    y_label: String,
    /// Locale for tick labels (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Legend placement for line charts.
    #[arg(long, value_enum, default_value_t = LegendArg::Bottom)]
    legend: LegendArg,
    /// Export the currently filtered view to a file (format inferred by --format or extension).
    #[arg(long)]
    export: Option<PathBuf>,
    /// Export format (csv or json). If omitted, inferred from --export extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print grouped per-country statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum SortArg {
    Asc,
    Desc,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chart(args) => cmd_chart(args),
    }
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let records = loader::load_csv(&args.input)?;
    let kind = match args.kind {
        KindArg::Line => ChartKind::Line,
        KindArg::Bar => ChartKind::Bar,
        KindArg::Heatmap => ChartKind::Heatmap,
    };

    // Flags become the same events an interactive host would emit.
    let mut session = Session::new(records, kind)?;
    if let Some(y) = args.max_year {
        session.dispatch(UiEvent::YearSlider(y));
    }
    if let Some(c) = args.country.clone() {
        session.dispatch(UiEvent::CountrySelected(Some(c)));
    }
    if let Some(n) = args.top {
        session.dispatch(UiEvent::TopN(n));
    } else if let Some(n) = args.bottom {
        session.dispatch(UiEvent::BottomN(n));
    } else if let Some(sort) = &args.sort {
        session.dispatch(match sort {
            SortArg::Asc => UiEvent::SortAscending,
            SortArg::Desc => UiEvent::SortDescending,
        });
    }
    if let Some(hide) = &args.hide {
        for c in parse_list(hide) {
            session.dispatch(UiEvent::LegendToggle(c));
        }
    }

    let opts = RenderOptions {
        width: args.width,
        height: args.height,
        title: args.title.clone(),
        x_desc: "Year".into(),
        y_desc: args.y_label.clone(),
        locale_tag: args.locale.clone(),
        legend: match args.legend {
            LegendArg::Inside => LegendMode::Inside,
            LegendArg::Right => LegendMode::Right,
            LegendArg::Bottom => LegendMode::Bottom,
        },
    };
    viz::render(
        session.store(),
        session.axes(),
        session.legend(),
        &opts,
        &args.out,
    )?;
    eprintln!("Wrote plot to {}", args.out.display());

    if let Some(path) = args.export.as_ref() {
        // The export mirrors the chart: the filtered view, not the raw load.
        let rows = view::flat_view(session.dataset(), session.state());
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&rows, path)?,
            "json" => storage::save_json(&rows, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    if args.stats {
        let summaries = stats::grouped_summary(session.dataset());
        for s in summaries {
            println!(
                "{}  count={} missing={}  min={} max={} mean={} median={}",
                s.key.country,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
