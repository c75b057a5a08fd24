pub mod chart_kind;
pub mod sheet_format;
