use crate::common::*;

use crate::enums::chart_kind::*;

#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct ChartDocument {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub url: String,
}
