use crate::common::*;

use crate::errors::viewer_error::*;
use crate::model::{
    chart::chart_series::*,
    table::{cell_value::*, data_table::*},
};
use crate::traits::service_traits::column_service::*;

#[derive(Debug, Clone, new)]
pub struct ColumnServiceImpl {
    category_column: String,
    value_column: String,
}

impl ColumnServiceImpl {
    fn locate_column(&self, table: &DataTable, column: &str) -> Result<usize, ViewerError> {
        table
            .find_column(column)
            .ok_or_else(|| ViewerError::ColumnNotFound {
                column: column.to_string(),
                available: table.headers().clone(),
            })
    }
}

impl ColumnService for ColumnServiceImpl {
    fn resolve_series(&self, table: &DataTable) -> Result<ChartSeries, ViewerError> {
        let category_idx: usize = self.locate_column(table, &self.category_column)?;
        let value_idx: usize = self.locate_column(table, &self.value_column)?;

        if table.row_count() == 0 {
            return Err(ViewerError::EmptyTable);
        }

        let mut categories: Vec<String> = Vec::with_capacity(table.row_count());
        let mut values: Vec<f64> = Vec::with_capacity(table.row_count());

        for row in table.rows() {
            let value_cell: &CellValue = row.cell(value_idx);

            let value: f64 = value_cell
                .as_number()
                .ok_or_else(|| ViewerError::InvalidValue {
                    row: *row.row_number(),
                    raw: value_cell.to_label(),
                })?;

            categories.push(row.cell(category_idx).to_label());
            values.push(value);
        }

        info!(
            "[ColumnServiceImpl->resolve_series] resolved '{}' / '{}' with {} points",
            table.headers()[category_idx],
            table.headers()[value_idx],
            values.len()
        );

        ChartSeries::new(
            table.headers()[category_idx].clone(),
            table.headers()[value_idx].clone(),
            categories,
            values,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ColumnServiceImpl {
        ColumnServiceImpl::new("Category".to_string(), "Value".to_string())
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn table(rows: Vec<Vec<CellValue>>) -> DataTable {
        DataTable::from_raw_rows(rows).expect("table")
    }

    #[test]
    fn both_columns_resolve_regardless_of_case() {
        let series: ChartSeries = resolver()
            .resolve_series(&table(vec![
                vec![text("category"), text("Other"), text("VALUE")],
                vec![text("A"), text("x"), CellValue::Number(1.0)],
                vec![text("B"), text("y"), text("2")],
                vec![text("A"), text("z"), CellValue::Number(3.0)],
            ]))
            .expect("series");

        assert_eq!(series.category_title(), "category");
        assert_eq!(series.value_title(), "VALUE");
        assert_eq!(series.categories(), &vec!["A", "B", "A"]);
        assert_eq!(series.values(), &vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_value_column_is_a_resolve_error() {
        let err: ViewerError = resolver()
            .resolve_series(&table(vec![
                vec![text("Category"), text("Amount")],
                vec![text("A"), CellValue::Number(1.0)],
            ]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolve);
        match err {
            ViewerError::ColumnNotFound { column, available } => {
                assert_eq!(column, "Value");
                assert_eq!(available, vec!["Category".to_string(), "Amount".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn non_numeric_value_reports_its_sheet_row() {
        let err: ViewerError = resolver()
            .resolve_series(&table(vec![
                vec![text("Category"), text("Value")],
                vec![text("A"), CellValue::Number(1.0)],
                vec![text("B"), text("lots")],
            ]))
            .unwrap_err();

        assert!(matches!(
            err,
            ViewerError::InvalidValue { row: 3, ref raw } if raw == "lots"
        ));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let err: ViewerError = resolver()
            .resolve_series(&table(vec![vec![text("Category"), text("Value")]]))
            .unwrap_err();

        assert!(matches!(err, ViewerError::EmptyTable));
    }

    #[test]
    fn numeric_categories_keep_their_display_form() {
        let series: ChartSeries = resolver()
            .resolve_series(&table(vec![
                vec![text("Category"), text("Value")],
                vec![CellValue::Number(2024.0), CellValue::Number(5.0)],
                vec![CellValue::Empty, CellValue::Number(6.0)],
            ]))
            .expect("series");

        assert_eq!(series.categories(), &vec!["2024".to_string(), String::new()]);
    }
}
