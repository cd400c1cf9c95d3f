use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::filter::{require_numeric, ColumnSelection, FilteredView};
use super::model::{CellValue, Column};

/// Bin count used when the caller does not pick one.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Largest bin count accepted; larger requests are clamped.
pub const MAX_HISTOGRAM_BINS: usize = 1000;

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// Rendering style requested by the user.
///
/// Line, bar, area and scatter all plot the same `(row, value)` points; only
/// histogram and pie change the data that is plotted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Area,
    Scatter,
    Histogram,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Area,
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Pie,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Histogram => "Histogram",
            ChartKind::Pie => "Pie Chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ChartSeries
// ---------------------------------------------------------------------------

/// One histogram bar covering `[start, end)`; the last bin also holds `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Chart-ready data handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ChartSeries {
    /// `(source row index, value)` in source row order.
    Points(Vec<(usize, f64)>),
    /// `(category, count)` by descending count, ties in first-seen order.
    Categories(Vec<(String, usize)>),
    Bins(Vec<HistogramBin>),
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSeries::Points(p) => p.is_empty(),
            ChartSeries::Categories(c) => c.is_empty(),
            ChartSeries::Bins(b) => b.is_empty(),
        }
    }
}

/// Build the series for `kind` with the default histogram bin count.
pub fn to_chart_series(
    view: &FilteredView<'_>,
    selection: &ColumnSelection,
    kind: ChartKind,
) -> Result<ChartSeries, ValidationError> {
    chart_series(view, selection, kind, DEFAULT_HISTOGRAM_BINS)
}

/// Build the series for `kind`. `bins` only matters for histograms and is
/// clamped to `1..=MAX_HISTOGRAM_BINS`.
pub fn chart_series(
    view: &FilteredView<'_>,
    selection: &ColumnSelection,
    kind: ChartKind,
    bins: usize,
) -> Result<ChartSeries, ValidationError> {
    match kind {
        ChartKind::Line | ChartKind::Bar | ChartKind::Area | ChartKind::Scatter => {
            let column = require_numeric(view.table(), selection)?;
            let points = view
                .rows()
                .iter()
                .filter_map(|&row| column.number(row).map(|v| (row, v)))
                .collect();
            Ok(ChartSeries::Points(points))
        }
        ChartKind::Histogram => {
            let column = require_numeric(view.table(), selection)?;
            Ok(ChartSeries::Bins(histogram(view, column, bins)))
        }
        ChartKind::Pie => Ok(ChartSeries::Categories(value_counts(
            view,
            selection.column(view.table()),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Count distinct non-missing values of `column` over the view.
///
/// Numbers are grouped by value, so `5` and `5.0` land in the same category.
pub fn value_counts(view: &FilteredView<'_>, column: &Column) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for &row in view.rows() {
        let label = match column.value(row) {
            CellValue::Missing => continue,
            // -0.0 and 0.0 are one category
            CellValue::Number(v) if v == 0.0 => "0".to_string(),
            other => other.to_string(),
        };
        match slot.get(&label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over `[min, max]` of the column's values in the view.
///
/// A constant column is widened by half its magnitude (at least 0.5) on
/// each side.
pub fn histogram(view: &FilteredView<'_>, column: &Column, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = view
        .rows()
        .iter()
        .filter_map(|&row| column.number(row))
        .collect();
    if values.is_empty() {
        return Vec::new();
    }

    let bins = bins.clamp(1, MAX_HISTOGRAM_BINS);
    let n = values.len();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (lo, hi) = if min == max {
        let pad = min.abs().max(1.0) * 0.5;
        ((min - pad).max(f64::MIN), (max + pad).min(f64::MAX))
    } else {
        (min, max)
    };
    // divide first so the span of two extreme values cannot overflow
    let width = hi / bins as f64 - lo / bins as f64;
    if !width.is_finite() || width <= 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: n,
        }];
    }

    let mut counts = vec![0usize; bins];
    for v in values {
        let pos = v / width - lo / width;
        counts[(pos as usize).min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + i as f64 * width,
            end: if i + 1 == bins { hi } else { lo + (i + 1) as f64 * width },
            count,
        })
        .collect()
}
