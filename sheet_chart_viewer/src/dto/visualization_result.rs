use crate::common::*;

use crate::dto::chart_document::*;
use crate::enums::chart_kind::*;

#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct VisualizationResult {
    pub request_id: Uuid,
    pub source_filename: String,
    pub row_count: usize,
    pub generated_at: DateTime<Local>,
    pub documents: Vec<ChartDocument>,
}

impl VisualizationResult {
    pub fn document(&self, kind: ChartKind) -> Option<&ChartDocument> {
        self.documents.iter().find(|doc| doc.kind == kind)
    }
}
