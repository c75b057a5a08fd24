use crate::common::*;

use crate::model::table::cell_value::*;

static EMPTY_CELL: CellValue = CellValue::Empty;

#[doc = "One data row plus the 1-based spreadsheet row it came from"]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct TableRow {
    pub row_number: usize,
    pub cells: Vec<CellValue>,
}

impl TableRow {
    pub fn cell(&self, column_index: usize) -> &CellValue {
        self.cells.get(column_index).unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl DataTable {
    #[doc = r#"
        Builds a table from raw rows in sheet order.

        The first non-empty row is the header row. Fully empty rows are dropped,
        while every kept row remembers its original row number for error reporting.
        Returns `None` when there is no header row at all.
    "#]
    pub fn from_raw_rows(raw_rows: Vec<Vec<CellValue>>) -> Option<DataTable> {
        let mut numbered = raw_rows
            .into_iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(CellValue::is_empty))
            .map(|(idx, cells)| TableRow::new(idx + 1, cells));

        let header_row: TableRow = numbered.next()?;
        let headers: Vec<String> = header_row
            .cells
            .iter()
            .map(|cell| cell.to_label().trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        Some(DataTable {
            headers,
            rows: numbered.collect(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[doc = r#"
        Finds a column by header name.

        An exact match wins; otherwise the first header equal ignoring ASCII case
        and surrounding whitespace is used.
    "#]
    pub fn find_column(&self, name: &str) -> Option<usize> {
        let wanted: &str = name.trim();

        self.headers
            .iter()
            .position(|header| header == wanted)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.trim().eq_ignore_ascii_case(wanted))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn header_is_first_non_empty_row_and_blank_rows_are_skipped() {
        let table: DataTable = DataTable::from_raw_rows(vec![
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("\u{feff}Category"), text(" Value ")],
            vec![text("A"), CellValue::Number(1.0)],
            vec![CellValue::Empty, CellValue::Empty],
            vec![text("B"), CellValue::Number(2.0)],
        ])
        .expect("table");

        assert_eq!(table.headers(), &vec!["Category".to_string(), "Value".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(*table.rows()[1].row_number(), 5);
    }

    #[test]
    fn exact_header_match_beats_case_insensitive_one() {
        let table: DataTable = DataTable::from_raw_rows(vec![vec![
            text("category"),
            text("Category"),
            text("VALUE"),
        ]])
        .expect("table");

        assert_eq!(table.find_column("Category"), Some(1));
        assert_eq!(table.find_column("value"), Some(2));
        assert_eq!(table.find_column("Amount"), None);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let row: TableRow = TableRow::new(2, vec![text("A")]);
        assert_eq!(row.cell(3), &CellValue::Empty);
    }

    #[test]
    fn no_rows_means_no_table() {
        assert!(DataTable::from_raw_rows(vec![vec![CellValue::Empty]]).is_none());
    }
}
