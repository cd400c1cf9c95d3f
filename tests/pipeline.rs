//! End-to-end properties of the filter-and-summarize pipeline.

use proptest::prelude::*;

use rusty_dash::data::{
    apply_filter, parse, select_column, summarize, to_chart_series, to_download, ChartKind,
    ChartSeries, FilteredView, SummaryStatistics, ValidationError,
};

/// A CSV with a numeric column `n`, a text column `t` and a column `m` that
/// mixes numbers and missing cells.
fn csv_from(rows: &[(i32, String, Option<i32>)]) -> String {
    let mut s = String::from("n,t,m\n");
    for (n, t, m) in rows {
        let m = m.map(|v| v.to_string()).unwrap_or_default();
        s.push_str(&format!("{n},{t},{m}\n"));
    }
    s
}

fn rows_strategy() -> impl Strategy<Value = Vec<(i32, String, Option<i32>)>> {
    prop::collection::vec(
        (
            -1000i32..1000,
            "[a-z]{1,6}",
            prop::option::of(-50i32..50),
        ),
        0..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Download of an unfiltered view reproduces the input byte for byte.
    #[test]
    fn download_of_full_view_round_trips(rows in rows_strategy()) {
        let csv = csv_from(&rows);
        let table = parse(csv.as_bytes()).unwrap();
        let bytes = to_download(&FilteredView::all(&table)).unwrap();
        prop_assert_eq!(String::from_utf8(bytes).unwrap(), csv);
    }

    /// Every kept row passes `> t`; every dropped row fails it or is missing.
    #[test]
    fn filter_partitions_rows(rows in rows_strategy(), t in -60i32..60) {
        let csv = csv_from(&rows);
        let table = parse(csv.as_bytes()).unwrap();
        let sel = select_column(&table, "m").unwrap();
        let view = apply_filter(&table, &sel, f64::from(t)).unwrap();

        let column = sel.column(&table);
        for row in 0..table.len() {
            let kept = view.rows().contains(&row);
            match column.number(row) {
                Some(v) if kept => prop_assert!(v > f64::from(t)),
                Some(v) => prop_assert!(v <= f64::from(t)),
                None => prop_assert!(!kept),
            }
        }
        prop_assert!(view.rows().windows(2).all(|w| w[0] < w[1]));
    }

    /// Re-parsing the download gives back exactly the filtered rows.
    #[test]
    fn filtered_download_reparses_to_the_same_rows(rows in rows_strategy(), t in -1000i32..1000) {
        let csv = csv_from(&rows);
        let table = parse(csv.as_bytes()).unwrap();
        let sel = select_column(&table, "n").unwrap();
        let view = apply_filter(&table, &sel, f64::from(t)).unwrap();

        let again = parse(&to_download(&view).unwrap()).unwrap();
        prop_assert_eq!(again.len(), view.len());
        for (i, &row) in view.rows().iter().enumerate() {
            prop_assert_eq!(again.raw_row(i), table.raw_row(row));
        }
    }

    /// Summaries never divide by zero and agree with the view size.
    #[test]
    fn summary_counts_match_view(rows in rows_strategy(), t in -1000i32..1000) {
        let csv = csv_from(&rows);
        let table = parse(csv.as_bytes()).unwrap();
        let sel = select_column(&table, "n").unwrap();
        let view = apply_filter(&table, &sel, f64::from(t)).unwrap();
        match summarize(&view, &sel) {
            SummaryStatistics::Empty => prop_assert!(view.is_empty()),
            SummaryStatistics::Populated { min, max, mean, count } => {
                prop_assert_eq!(count, view.len());
                prop_assert!(min > f64::from(t));
                prop_assert!(min <= mean && mean <= max);
            }
        }
    }

    /// Any name outside the header is rejected.
    #[test]
    fn unknown_names_are_not_found(rows in rows_strategy(), name in "[A-Z_]{1,8}") {
        let csv = csv_from(&rows);
        let table = parse(csv.as_bytes()).unwrap();
        prop_assert_eq!(
            select_column(&table, &name),
            Err(ValidationError::ColumnNotFound(name.clone()))
        );
    }
}

#[test]
fn worked_example_filter_and_summary() {
    let table = parse(b"a,b\n1,10\n5,20\n3,30\n").unwrap();
    let sel = select_column(&table, "a").unwrap();
    let view = apply_filter(&table, &sel, 2.0).unwrap();

    let kept: Vec<Vec<&str>> = view.rows().iter().map(|&r| table.raw_row(r)).collect();
    assert_eq!(kept, vec![vec!["5", "20"], vec!["3", "30"]]);

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
fn worked_example_pie_grouping() {
    let table = parse(b"v\nx\ny\nx\nx\nz\n").unwrap();
    let sel = select_column(&table, "v").unwrap();
    let series = to_chart_series(&FilteredView::all(&table), &sel, ChartKind::Pie).unwrap();
    assert_eq!(
        series,
        ChartSeries::Categories(vec![("x".into(), 3), ("y".into(), 1), ("z".into(), 1)])
    );
}

#[test]
fn summarize_of_empty_view_is_empty_marker() {
    let table = parse(b"a\n1\n2\n").unwrap();
    let sel = select_column(&table, "a").unwrap();
    let view = apply_filter(&table, &sel, 2.0).unwrap();
    assert!(view.is_empty());
    assert_eq!(summarize(&view, &sel), SummaryStatistics::Empty);
}
