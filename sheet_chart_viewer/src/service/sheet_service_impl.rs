use crate::common::*;

use std::{fs::File, io::BufReader};

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook};

use crate::dto::staged_upload::*;
use crate::enums::sheet_format::*;
use crate::errors::viewer_error::*;
use crate::model::table::{cell_value::*, data_table::*};
use crate::traits::service_traits::sheet_service::*;

#[derive(Debug, Clone, Default, new)]
pub struct SheetServiceImpl;

impl SheetServiceImpl {
    #[doc = r#"
        Parses the staged file according to its declared format.

        Every reader is owned by the callee and dropped when it returns, so the
        file handle is already closed by the time the caller deletes the file.
    "#]
    fn read_raw_rows(path: &Path, format: SheetFormat) -> anyhow::Result<Vec<Vec<CellValue>>> {
        match format {
            SheetFormat::Xlsx => Self::read_workbook_rows::<Xlsx<BufReader<File>>>(path),
            SheetFormat::Xls => Self::read_workbook_rows::<Xls<BufReader<File>>>(path),
            SheetFormat::Csv => Self::read_csv_rows(path),
        }
    }

    #[doc = r#"
        First worksheet of an Excel workbook, row by row.

        calamine trims the range to the first used cell, so the rows above it are
        padded back in as empty rows to keep sheet row numbers intact.
    "#]
    fn read_workbook_rows<R>(path: &Path) -> anyhow::Result<Vec<Vec<CellValue>>>
    where
        R: Reader<BufReader<File>>,
        R::Error: std::error::Error + Send + Sync + 'static,
    {
        let mut workbook: R = open_workbook(path)?;

        let range: Range<Data> = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| anyhow!("the workbook contains no worksheet"))??;

        let leading_rows: usize = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        Ok(std::iter::repeat_with(Vec::new)
            .take(leading_rows)
            .chain(
                range
                    .rows()
                    .map(|row| row.iter().map(CellValue::from_calamine).collect()),
            )
            .collect())
    }

    fn read_csv_rows(path: &Path) -> anyhow::Result<Vec<Vec<CellValue>>> {
        let content: Vec<u8> = fs::read(path)?;

        let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_slice());

        let mut rows: Vec<Vec<CellValue>> = Vec::new();

        for record in reader.records() {
            let record: csv::StringRecord = record?;

            /* Blank lines are skipped by the reader; pad them back so row numbers match the file */
            if let Some(position) = record.position() {
                let line: u64 = Self::record_start_line(&content, position);
                while (rows.len() as u64) + 1 < line {
                    rows.push(Vec::new());
                }
            }

            rows.push(record.iter().map(CellValue::from_csv_field).collect());
        }

        Ok(rows)
    }

    #[doc = "1-based line where a record's content starts; the reported position sits before any blank lines skipped on the way"]
    fn record_start_line(content: &[u8], position: &csv::Position) -> u64 {
        let start: usize = usize::try_from(position.byte())
            .unwrap_or(content.len())
            .min(content.len());

        let skipped_newlines: u64 = content[start..]
            .iter()
            .take_while(|byte| matches!(**byte, b'\r' | b'\n'))
            .filter(|byte| **byte == b'\n')
            .count() as u64;

        position.line() + skipped_newlines
    }
}

#[async_trait]
impl SheetService for SheetServiceImpl {
    async fn load_table(&self, staged: &StagedUpload) -> Result<DataTable, ViewerError> {
        let path: PathBuf = staged.staged_path().clone();
        let format: SheetFormat = *staged.format();

        let raw_rows: Vec<Vec<CellValue>> = {
            let path: PathBuf = path.clone();
            tokio::task::spawn_blocking(move || Self::read_raw_rows(&path, format))
                .await
                .map_err(|e| ViewerError::parse(staged.staged_path(), e))?
                .map_err(|e| ViewerError::parse(staged.staged_path(), format!("{:#}", e)))?
        };

        let table: DataTable = DataTable::from_raw_rows(raw_rows)
            .ok_or_else(|| ViewerError::parse(&path, "the sheet has no header row"))?;

        info!(
            "[SheetServiceImpl->load_table] {:?} parsed as {:?}: {} columns, {} rows",
            path,
            format,
            table.headers().len(),
            table.row_count()
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::column_service_impl::*;
    use crate::traits::service_traits::column_service::*;
    use rust_xlsxwriter::Workbook;

    fn staged(path: PathBuf, format: SheetFormat) -> StagedUpload {
        let name: String = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        StagedUpload::new(Uuid::new_v4(), name, format, path)
    }

    #[tokio::test]
    async fn genuine_csv_is_parsed_as_csv() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("sales.csv");
        fs::write(&path, "\u{feff}Category,Value\nNorth,10\nSouth,2.5\n,\n").expect("write csv");

        let table: DataTable = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Csv))
            .await
            .expect("csv loads");

        assert_eq!(table.headers(), &vec!["Category".to_string(), "Value".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows()[1].cell(1),
            &CellValue::Number(2.5)
        );
    }

    #[tokio::test]
    async fn xlsx_first_sheet_is_loaded() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("sales.xlsx");

        let mut workbook: Workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "category").expect("header");
        sheet.write_string(0, 1, "Value").expect("header");
        sheet.write_string(1, 0, "A").expect("cell");
        sheet.write_number(1, 1, 1.0).expect("cell");
        sheet.write_string(2, 0, "B").expect("cell");
        sheet.write_number(2, 1, 2.0).expect("cell");
        workbook.save(&path).expect("save xlsx");

        let table: DataTable = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Xlsx))
            .await
            .expect("xlsx loads");

        assert_eq!(table.headers(), &vec!["category".to_string(), "Value".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0].cell(0), &CellValue::Text("A".to_string()));
        assert_eq!(table.rows()[1].cell(1), &CellValue::Number(2.0));
    }

    #[tokio::test]
    async fn xlsx_row_numbers_count_blank_rows_above_the_header() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("offset.xlsx");

        let mut workbook: Workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(2, 0, "Category").expect("header");
        sheet.write_string(2, 1, "Value").expect("header");
        sheet.write_string(3, 0, "A").expect("cell");
        sheet.write_number(3, 1, 1.0).expect("cell");
        sheet.write_string(4, 0, "B").expect("cell");
        sheet.write_string(4, 1, "lots").expect("cell");
        workbook.save(&path).expect("save xlsx");

        let table: DataTable = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Xlsx))
            .await
            .expect("xlsx loads");

        assert_eq!(table.headers(), &vec!["Category".to_string(), "Value".to_string()]);
        assert_eq!(*table.rows()[0].row_number(), 4);
        assert_eq!(*table.rows()[1].row_number(), 5);

        let err: ViewerError = ColumnServiceImpl::new("Category".to_string(), "Value".to_string())
            .resolve_series(&table)
            .unwrap_err();
        assert!(matches!(err, ViewerError::InvalidValue { row: 5, ref raw } if raw == "lots"));
    }

    #[tokio::test]
    async fn csv_row_numbers_count_blank_lines() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("gaps.csv");
        fs::write(&path, "\nCategory,Value\nA,1\n\nB,lots\n").expect("write csv");

        let table: DataTable = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Csv))
            .await
            .expect("csv loads");

        assert_eq!(*table.rows()[0].row_number(), 3);
        assert_eq!(*table.rows()[1].row_number(), 5);
    }

    #[tokio::test]
    async fn csv_bytes_behind_an_xlsx_name_fail_to_parse() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("renamed.xlsx");
        fs::write(&path, "Category,Value\nA,1\n").expect("write");

        let err: ViewerError = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Xlsx))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.user_message().starts_with("Error reading the file:"));
    }

    #[tokio::test]
    async fn empty_csv_has_no_header_row() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let path: PathBuf = tmp.path().join("empty.csv");
        fs::write(&path, "").expect("write");

        let err: ViewerError = SheetServiceImpl::new()
            .load_table(&staged(path, SheetFormat::Csv))
            .await
            .unwrap_err();

        assert!(matches!(err, ViewerError::Parse { .. }));
    }
}
