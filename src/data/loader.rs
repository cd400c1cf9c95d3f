use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::error::ParseError;
use super::model::{is_missing, Column, ColumnData, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse uploaded CSV bytes into a [`Table`].
///
/// Layout: the first record is the header, every following record is a row
/// with exactly as many fields as the header. Blank lines are skipped.
/// Column types are inferred once, here:
/// * numeric – every non-missing cell parses as a finite number
/// * date    – every non-missing cell is an ISO `YYYY-MM-DD` date
/// * text    – anything else
pub fn parse(bytes: &[u8]) -> Result<Table, ParseError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::MissingHeader);
    }
    let names = column_names(&headers);
    let expected = names.len();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); expected];
    let mut record = csv::StringRecord::new();
    let mut row_count = 0usize;

    while reader.read_record(&mut record)? {
        if record.len() != expected {
            return Err(ParseError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected,
                found: record.len(),
            });
        }
        for (col, field) in record.iter().enumerate() {
            cells[col].push(field.to_string());
        }
        row_count += 1;
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| infer_column(name, raw))
        .collect();

    log::debug!(
        "parsed table: {row_count} rows, columns {:?}",
        columns
            .iter()
            .map(|c| format!("{}:{}", c.name(), c.kind()))
            .collect::<Vec<_>>()
    );

    Ok(Table::from_columns(columns, row_count))
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Blank names become `Unnamed: <i>`; repeats get `.1`, `.2`, ... appended.
fn column_names(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let base = if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while !seen.insert(name.clone()) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

fn infer_column(name: String, raw: Vec<String>) -> Column {
    if let Some(values) = parse_all(&raw, parse_number) {
        return Column::new(name, raw, ColumnData::Numeric(values));
    }
    if let Some(values) = parse_all(&raw, parse_date) {
        return Column::new(name, raw, ColumnData::Date(values));
    }
    Column::new(name, raw, ColumnData::Text)
}

/// `Some` when every non-missing cell parses; missing cells map to `None`.
fn parse_all<T>(raw: &[String], parse_one: fn(&str) -> Option<T>) -> Option<Vec<Option<T>>> {
    raw.iter()
        .map(|cell| {
            if is_missing(cell) {
                Some(None)
            } else {
                parse_one(cell.trim()).map(Some)
            }
        })
        .collect()
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, ColumnKind};

    #[test]
    fn infers_numeric_text_and_date_columns() {
        let table = parse(b"id,name,when\n1,ann,2024-01-02\n2.5,bob,2024-02-03\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.width(), 3);
        let kinds: Vec<ColumnKind> = table.columns().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![ColumnKind::Numeric, ColumnKind::Text, ColumnKind::Date]);
        assert_eq!(table.column("id").unwrap().number(1), Some(2.5));
    }

    #[test]
    fn missing_cells_do_not_break_numeric_inference() {
        let table = parse(b"a,b\n1,x\n,y\nNaN,z\n4,w\n").unwrap();
        let a = table.column("a").unwrap();
        assert_eq!(a.kind(), ColumnKind::Numeric);
        assert_eq!(a.value(1), CellValue::Missing);
        assert_eq!(a.value(2), CellValue::Missing);
        assert_eq!(a.number(3), Some(4.0));
        assert_eq!(a.raw(2), "NaN");
    }

    #[test]
    fn one_unparseable_cell_makes_the_column_text() {
        let table = parse(b"a\n1\n2\nthree\n").unwrap();
        assert_eq!(table.column("a").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn infinite_values_are_not_numbers() {
        let table = parse(b"a\n1\ninf\n").unwrap();
        assert_eq!(table.column("a").unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn all_missing_column_is_numeric() {
        let table = parse(b"a,b\n,1\n,2\n").unwrap();
        assert_eq!(table.column("a").unwrap().kind(), ColumnKind::Numeric);
    }

    #[test]
    fn header_only_input_gives_an_empty_table() {
        let table = parse(b"a,b\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(parse(b""), Err(ParseError::Empty)));
        assert!(matches!(parse(b" \n\r\n"), Err(ParseError::Empty)));
    }

    #[test]
    fn blank_header_is_rejected() {
        assert!(matches!(parse(b",,\n1,2,3\n"), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn ragged_rows_are_rejected_with_their_line() {
        match parse(b"a,b\n1,2\n3\n") {
            Err(ParseError::RaggedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
        assert!(matches!(
            parse(b"a,b\n1,2,3\n"),
            Err(ParseError::RaggedRow { found: 3, .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_csv_error() {
        assert!(matches!(parse(b"a,b\n\xff\xfe,1\n"), Err(ParseError::Csv(_))));
    }

    #[test]
    fn duplicate_and_blank_headers_are_renamed() {
        let table = parse(b"a,a,,a\n1,2,3,4\n").unwrap();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let table = parse(b"name,score\n\"Smith, J\",7\n").unwrap();
        assert_eq!(table.column("name").unwrap().raw(0), "Smith, J");
    }

    #[test]
    fn load_file_reports_the_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
    }
}
