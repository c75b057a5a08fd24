use plotters::style::RGBColor;

pub const BACKGROUND_COLOR: RGBColor = RGBColor(20, 20, 20);
pub const TEXT_COLOR: RGBColor = RGBColor(200, 200, 200);
pub const TITLE_COLOR: RGBColor = RGBColor(240, 240, 240);
pub const GRID_COLOR: RGBColor = RGBColor(60, 60, 60);
pub const AXIS_COLOR: RGBColor = RGBColor(120, 120, 120);
pub const LINE_COLOR: RGBColor = RGBColor(0, 191, 255);
pub const MARKER_COLOR: RGBColor = RGBColor(255, 127, 14);

/* #1f77b4 #ff7f0e #2ca02c #d62728 #9467bd #8c564b #e377c2 */
pub const BAR_PALETTE: [RGBColor; 7] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
];

#[doc = "Palette color for the n-th bar or slice, cycling when there are more points than colors"]
pub fn palette_color(index: usize) -> RGBColor {
    BAR_PALETTE[index % BAR_PALETTE.len()]
}
