use serde::{Deserialize, Serialize};

use super::filter::{ColumnSelection, FilteredView};
use super::model::{Column, ColumnKind};

// ---------------------------------------------------------------------------
// SummaryStatistics – the metrics shown next to the chart
// ---------------------------------------------------------------------------

/// Min / max / mean / count of the selected column over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SummaryStatistics {
    /// No values to aggregate.
    Empty,
    Populated {
        min: f64,
        max: f64,
        mean: f64,
        count: usize,
    },
}

impl SummaryStatistics {
    pub fn is_empty(&self) -> bool {
        matches!(self, SummaryStatistics::Empty)
    }

    pub fn count(&self) -> usize {
        match self {
            SummaryStatistics::Empty => 0,
            SummaryStatistics::Populated { count, .. } => *count,
        }
    }

    /// Mean rounded to two decimals for display.
    pub fn display_mean(&self) -> Option<f64> {
        match self {
            SummaryStatistics::Empty => None,
            SummaryStatistics::Populated { mean, .. } => Some(round2(*mean)),
        }
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Aggregate the selected column over the rows of `view`.
///
/// Missing cells are skipped. A non-numeric column has no values, so it
/// summarizes to [`SummaryStatistics::Empty`] like an empty view does.
pub fn summarize(view: &FilteredView<'_>, selection: &ColumnSelection) -> SummaryStatistics {
    let column = selection.column(view.table());
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in view.rows().iter().filter_map(|&row| column.number(row)) {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    if count == 0 {
        return SummaryStatistics::Empty;
    }
    SummaryStatistics::Populated {
        min,
        max,
        mean: sum / count as f64,
        count,
    }
}

// ---------------------------------------------------------------------------
// describe – per-column statistics table
// ---------------------------------------------------------------------------

/// One row of the statistics table: count, mean, std and quartiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; needs at least two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Describe every numeric column of `view`, in table order.
pub fn describe(view: &FilteredView<'_>) -> Vec<ColumnDescription> {
    view.table()
        .columns()
        .iter()
        .filter(|c| c.kind() == ColumnKind::Numeric)
        .map(|c| describe_column(c, view.rows()))
        .collect()
}

fn describe_column(column: &Column, rows: &[usize]) -> ColumnDescription {
    let mut values: Vec<f64> = rows.iter().filter_map(|&row| column.number(row)).collect();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = (count > 0).then(|| values.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|m| {
        let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    ColumnDescription {
        column: column.name().to_string(),
        count,
        mean,
        std,
        min: values.first().copied(),
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.50),
        p75: quantile(&values, 0.75),
        max: values.last().copied(),
    }
}

/// Linear-interpolated quantile of already sorted values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, select_column};
    use crate::data::loader::parse;
    use crate::data::model::Table;

    fn table() -> Table {
        parse(b"a,b\n1,10\n5,20\n3,30\n").unwrap()
    }

    #[test]
    fn summarizes_filtered_column() {
        let table = table();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 2.0).unwrap();
        assert_eq!(
            summarize(&view, &sel),
            SummaryStatistics::Populated {
                min: 3.0,
                max: 5.0,
                mean: 4.0,
                count: 2
            }
        );
    }

    #[test]
    fn empty_view_is_marked_empty() {
        let table = table();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 99.0).unwrap();
        let stats = summarize(&view, &sel);
        assert!(stats.is_empty());
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.display_mean(), None);
    }

    #[test]
    fn text_column_summarizes_to_empty() {
        let table = parse(b"n,t\n1,x\n2,y\n").unwrap();
        let sel = select_column(&table, "t").unwrap();
        assert!(summarize(&FilteredView::all(&table), &sel).is_empty());
    }

    #[test]
    fn display_mean_rounds_to_two_decimals() {
        let table = parse(b"a\n1\n1\n2\n").unwrap();
        let sel = select_column(&table, "a").unwrap();
        let stats = summarize(&FilteredView::all(&table), &sel);
        assert_eq!(stats.display_mean(), Some(1.33));
    }

    #[test]
    fn describe_uses_sample_std_and_interpolated_quartiles() {
        let table = parse(b"a,t,b\n1,x,\n2,y,7\n3,z,\n4,w,\n").unwrap();
        let desc = describe(&FilteredView::all(&table));
        assert_eq!(desc.len(), 2);

        let a = &desc[0];
        assert_eq!(a.column, "a");
        assert_eq!(a.count, 4);
        assert_eq!(a.mean, Some(2.5));
        assert!((a.std.unwrap() - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(a.min, Some(1.0));
        assert_eq!(a.p25, Some(1.75));
        assert_eq!(a.p50, Some(2.5));
        assert_eq!(a.p75, Some(3.25));
        assert_eq!(a.max, Some(4.0));

        let b = &desc[1];
        assert_eq!(b.count, 1);
        assert_eq!(b.std, None);
        assert_eq!(b.p50, Some(7.0));
    }

    #[test]
    fn describe_of_empty_view_has_no_values() {
        let table = table();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 99.0).unwrap();
        let desc = describe(&view);
        assert!(desc.iter().all(|d| d.count == 0 && d.mean.is_none()));
    }
}
