use crate::errors::viewer_error::*;
use crate::model::{chart::chart_series::*, table::data_table::*};

pub trait ColumnService: Send + Sync {
    #[doc = "Locates the category and value columns and turns every data row into one chart point"]
    fn resolve_series(&self, table: &DataTable) -> Result<ChartSeries, ViewerError>;
}
