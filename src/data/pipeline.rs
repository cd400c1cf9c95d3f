use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::filter::{apply_filter, select_column, FilteredView};
use super::model::Table;
use super::series::{chart_series, ChartKind, ChartSeries, DEFAULT_HISTOGRAM_BINS};
use super::stats::{describe, summarize, ColumnDescription, SummaryStatistics};

/// Everything the user picked for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub column: String,
    pub threshold: f64,
    pub chart: ChartKind,
    pub bins: usize,
}

impl Query {
    pub fn new(column: impl Into<String>, threshold: f64) -> Self {
        Query {
            column: column.into(),
            threshold,
            chart: ChartKind::default(),
            bins: DEFAULT_HISTOGRAM_BINS,
        }
    }

    pub fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }
}

/// Owned result of one evaluation, safe to cache between interactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub query: Query,
    /// Source row indices that passed the filter, ascending.
    pub rows: Vec<usize>,
    pub total_rows: usize,
    pub summary: SummaryStatistics,
    pub series: ChartSeries,
    pub description: Vec<ColumnDescription>,
}

impl Evaluation {
    /// Re-borrow the kept rows as a view over `table`.
    ///
    /// `table` must be the table this evaluation was computed from.
    pub fn view<'t>(&self, table: &'t Table) -> FilteredView<'t> {
        FilteredView::from_rows(table, self.rows.clone())
    }
}

/// Run the whole pipeline for one interaction: validate the column, filter,
/// summarize, build the chart series and the statistics table.
pub fn evaluate(table: &Table, query: &Query) -> Result<Evaluation, ValidationError> {
    let selection = select_column(table, &query.column)?;
    let view = apply_filter(table, &selection, query.threshold)?;
    let summary = summarize(&view, &selection);
    let series = chart_series(&view, &selection, query.chart, query.bins)?;
    let description = describe(&view);

    log::debug!(
        "evaluated {} > {} as {:?}: {} of {} rows",
        query.column,
        query.threshold,
        query.chart,
        view.len(),
        table.len()
    );

    Ok(Evaluation {
        query: query.clone(),
        total_rows: table.len(),
        rows: view.into_rows(),
        summary,
        series,
        description,
    })
}
