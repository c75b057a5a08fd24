use crate::common::*;

use crate::dto::chart_document::*;
use crate::enums::chart_kind::*;
use crate::errors::viewer_error::*;
use crate::model::chart::chart_series::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Renders bar, line, pie and scatter documents for one request.
        # Arguments
        * `request_id` - scopes the output directory
        * `series` - resolved category/value points
        # Returns
        * the four documents, in `ChartKind::ALL` order
    "]
    async fn render_charts(
        &self,
        request_id: Uuid,
        series: &ChartSeries,
    ) -> Result<Vec<ChartDocument>, ViewerError>;

    #[doc = "Reads a previously rendered document; `None` when it does not exist"]
    async fn read_document(
        &self,
        request_id: Uuid,
        kind: ChartKind,
    ) -> anyhow::Result<Option<String>>;
}
