use super::error::ValidationError;
use super::model::{Column, ColumnKind, Table};

// ---------------------------------------------------------------------------
// ColumnSelection – a column name known to exist in a table
// ---------------------------------------------------------------------------

/// A validated column choice. Only [`select_column`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    name: String,
    index: usize,
}

impl ColumnSelection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The selected column of `table`.
    ///
    /// Panics if `table` is not the table the selection was made against.
    pub fn column<'t>(&self, table: &'t Table) -> &'t Column {
        let column = &table.columns()[self.index];
        debug_assert_eq!(column.name(), self.name);
        column
    }
}

/// Validate that `name` is one of the table's columns.
pub fn select_column(table: &Table, name: &str) -> Result<ColumnSelection, ValidationError> {
    table
        .columns()
        .iter()
        .position(|c| c.name() == name)
        .map(|index| ColumnSelection {
            name: name.to_string(),
            index,
        })
        .ok_or_else(|| ValidationError::ColumnNotFound(name.to_string()))
}

// ---------------------------------------------------------------------------
// FilteredView – rows passing `value > threshold`
// ---------------------------------------------------------------------------

/// Read-only subset of a table's rows, in source order.
#[derive(Debug, Clone)]
pub struct FilteredView<'t> {
    table: &'t Table,
    rows: Vec<usize>,
}

impl<'t> FilteredView<'t> {
    /// A view keeping every row.
    pub fn all(table: &'t Table) -> Self {
        FilteredView {
            table,
            rows: (0..table.len()).collect(),
        }
    }

    /// Rebuild a view from rows an earlier filter produced on `table`.
    pub(crate) fn from_rows(table: &'t Table, rows: Vec<usize>) -> Self {
        debug_assert!(rows.iter().all(|&r| r < table.len()));
        FilteredView { table, rows }
    }

    pub fn table(&self) -> &'t Table {
        self.table
    }

    /// Indices into the source table of the kept rows, ascending.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the rows whose value in the selected column is strictly greater than
/// `threshold`.
///
/// Missing cells never pass. Equal values never pass. The selected column
/// must be numeric.
pub fn apply_filter<'t>(
    table: &'t Table,
    selection: &ColumnSelection,
    threshold: f64,
) -> Result<FilteredView<'t>, ValidationError> {
    let column = require_numeric(table, selection)?;

    let rows: Vec<usize> = (0..table.len())
        .filter(|&row| column.number(row).is_some_and(|v| v > threshold))
        .collect();

    log::debug!(
        "filter {} > {threshold}: kept {}/{} rows",
        selection.name(),
        rows.len(),
        table.len()
    );

    Ok(FilteredView { table, rows })
}

pub(crate) fn require_numeric<'t>(
    table: &'t Table,
    selection: &ColumnSelection,
) -> Result<&'t Column, ValidationError> {
    let column = selection.column(table);
    if column.kind() != ColumnKind::Numeric {
        return Err(ValidationError::NonNumericColumn(selection.name().to_string()));
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse;

    fn sample() -> Table {
        parse(b"a,b,label\n1,10,x\n5,20,y\n3,30,x\n2,40,z\n,50,y\n").unwrap()
    }

    #[test]
    fn keeps_rows_strictly_above_threshold_in_order() {
        let table = sample();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 2.0).unwrap();
        assert_eq!(view.rows(), &[1, 2]);
        assert_eq!(table.raw_row(view.rows()[0]), vec!["5", "20", "y"]);
        assert_eq!(table.raw_row(view.rows()[1]), vec!["3", "30", "x"]);
    }

    #[test]
    fn equal_values_and_missing_cells_are_excluded() {
        let table = sample();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 1.0).unwrap();
        // row 0 equals the threshold, row 4 is missing
        assert_eq!(view.rows(), &[1, 2, 3]);
    }

    #[test]
    fn threshold_above_everything_gives_empty_view() {
        let table = sample();
        let sel = select_column(&table, "b").unwrap();
        let view = apply_filter(&table, &sel, 1000.0).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn nan_threshold_keeps_nothing() {
        let table = sample();
        let sel = select_column(&table, "b").unwrap();
        assert!(apply_filter(&table, &sel, f64::NAN).unwrap().is_empty());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let table = sample();
        assert_eq!(
            select_column(&table, "nope"),
            Err(ValidationError::ColumnNotFound("nope".into()))
        );
        // names are matched exactly
        assert!(select_column(&table, "A").is_err());
    }

    #[test]
    fn text_column_cannot_be_filtered() {
        let table = sample();
        let sel = select_column(&table, "label").unwrap();
        assert_eq!(
            apply_filter(&table, &sel, 0.0).unwrap_err(),
            ValidationError::NonNumericColumn("label".into())
        );
    }

    #[test]
    fn all_view_keeps_every_row() {
        let table = sample();
        assert_eq!(FilteredView::all(&table).rows(), &[0, 1, 2, 3, 4]);
    }
}
