//! Headless dashboard: run one filter-and-summarize pass over a CSV file.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};

use rusty_dash::config::Settings;
use rusty_dash::data::export::to_download;
use rusty_dash::data::pipeline::{evaluate, Evaluation, Query};
use rusty_dash::data::series::{ChartKind, ChartSeries, MAX_HISTOGRAM_BINS};
use rusty_dash::data::stats::{round2, SummaryStatistics};
use rusty_dash::data::{load_file, parse, Table};

/// Filter a CSV by `column > threshold` and report statistics and chart data.
#[derive(Parser, Debug)]
#[command(name = "rusty-dash-report", version, about)]
struct Args {
    /// CSV file to read, or `-` for stdin.
    file: PathBuf,

    /// Column to filter on.
    #[arg(short, long)]
    column: String,

    /// Keep rows whose value is strictly greater than this.
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Chart data to emit.
    #[arg(long, value_enum)]
    chart: Option<ChartKind>,

    /// Histogram bin count (1 to 1000).
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_HISTOGRAM_BINS as u64))]
    bins: Option<usize>,

    /// Write the filtered rows to this CSV file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// JSON settings file supplying defaults.
    #[arg(long, env = "RUSTY_DASH_SETTINGS")]
    settings: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = Settings::load_or_default(args.settings.as_deref())?;

    let table = read_table(&args.file)?;
    let query = Query::new(
        args.column.clone(),
        args.threshold.unwrap_or(settings.default_threshold),
    )
    .with_chart(args.chart.unwrap_or(settings.chart_kind))
    .with_bins(args.bins.unwrap_or(settings.histogram_bins));

    let eval = evaluate(&table, &query)
        .with_context(|| format!("evaluating {}", args.file.display()))?;

    if let Some(path) = &args.output {
        let bytes = to_download(&eval.view(&table)).context("serializing filtered rows")?;
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {} filtered rows to {}", eval.rows.len(), path.display());
    }

    let mut out = std::io::stdout().lock();
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &eval)?;
            writeln!(out)?;
        }
        Format::Text => write_text(&mut out, &eval)?,
    }
    Ok(())
}

fn read_table(path: &Path) -> Result<Table> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("reading stdin")?;
        return parse(&bytes).context("parsing stdin");
    }
    load_file(path)
}

fn write_text(out: &mut impl Write, eval: &Evaluation) -> std::io::Result<()> {
    let q = &eval.query;
    writeln!(
        out,
        "Filtered Data (by `{} > {}`): {} of {} rows",
        q.column,
        q.threshold,
        eval.rows.len(),
        eval.total_rows
    )?;

    match eval.summary {
        SummaryStatistics::Empty => writeln!(out, "No rows pass the filter.")?,
        SummaryStatistics::Populated {
            min, max, mean, ..
        } => {
            writeln!(out, "Max Value:  {max}")?;
            writeln!(out, "Min Value:  {min}")?;
            writeln!(out, "Mean Value: {}", round2(mean))?;
        }
    }

    writeln!(out, "{}:", q.chart)?;
    match &eval.series {
        ChartSeries::Points(points) => {
            for (row, value) in points {
                writeln!(out, "  {row}\t{value}")?;
            }
        }
        ChartSeries::Categories(categories) => {
            for (label, count) in categories {
                writeln!(out, "  {label}\t{count}")?;
            }
        }
        ChartSeries::Bins(bins) => {
            for b in bins {
                writeln!(out, "  [{:.3}, {:.3})\t{}", b.start, b.end, b.count)?;
            }
        }
    }
    Ok(())
}
