use super::filter::FilteredView;

/// Default file name offered for the download.
pub const DOWNLOAD_FILE_NAME: &str = "filtered_data.csv";

/// Serialize the view as CSV: header first, source column order, raw cells.
///
/// Cells are written exactly as they were read, so parsing the output gives
/// back the same rows.
pub fn to_download(view: &FilteredView<'_>) -> csv::Result<Vec<u8>> {
    let table = view.table();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(table.column_names())?;
    for &row in view.rows() {
        writer.write_record(table.raw_row(row))?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, select_column};
    use crate::data::loader::parse;

    #[test]
    fn writes_filtered_rows_with_header() {
        let table = parse(b"a,b\n1,10\n5,20\n3,30\n").unwrap();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 2.0).unwrap();
        let bytes = to_download(&view).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n5,20\n3,30\n");
    }

    #[test]
    fn empty_view_writes_only_the_header() {
        let table = parse(b"a,b\n1,10\n").unwrap();
        let sel = select_column(&table, "a").unwrap();
        let view = apply_filter(&table, &sel, 50.0).unwrap();
        assert_eq!(to_download(&view).unwrap(), b"a,b\n");
    }

    #[test]
    fn raw_spelling_and_quoting_survive() {
        let src = "name,score,note\n\"Smith, J\",7.50,\n\"say \"\"hi\"\"\",1e3,NA\n";
        let table = parse(src.as_bytes()).unwrap();
        let bytes = to_download(&FilteredView::all(&table)).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), src);
    }
}
