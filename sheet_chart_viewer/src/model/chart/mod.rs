pub mod chart_series;
pub mod chart_theme;
