use crate::common::*;

use plotters::coord::{Shift, types::RangedCoordf64};
use plotters::element::Pie;
use plotters::prelude::*;

use crate::dto::chart_document::*;
use crate::enums::chart_kind::*;
use crate::errors::viewer_error::*;
use crate::model::chart::{chart_series::*, chart_theme::*};
use crate::traits::service_traits::chart_service::*;
use crate::utils_modules::{html_utils::*, io_utils::*};

pub const CHART_DOCUMENT_TEMPLATE: &str = "chart_document_template.html";

type DarkChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

#[doc = "One pie slice; slices are never merged by category"]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct PieSlice {
    pub label: String,
    pub size: f64,
}

#[derive(Debug, Clone)]
pub struct ChartServiceImpl {
    output_dir: PathBuf,
    chart_size: (u32, u32),
    document_template: Arc<String>,
}

impl ChartServiceImpl {
    #[doc = r#"
        # Arguments
        * `output_dir` - root under which `<request_id>/<kind>.html` documents are written
        * `chart_size` - SVG width/height in pixels
        * `template_dir` - directory holding `chart_document_template.html`
    "#]
    pub fn new(
        output_dir: PathBuf,
        chart_size: (u32, u32),
        template_dir: &Path,
    ) -> anyhow::Result<Self> {
        let document_template: String = read_template(template_dir, CHART_DOCUMENT_TEMPLATE)
            .context("[ChartServiceImpl->new] chart document template is required")?;

        Ok(ChartServiceImpl {
            output_dir,
            chart_size,
            document_template: Arc::new(document_template),
        })
    }

    fn request_dir(&self, request_id: Uuid) -> PathBuf {
        self.output_dir.join(request_id.to_string())
    }

    #[doc = "Wraps a rendered SVG into a standalone HTML document"]
    fn wrap_document(template: &str, kind: ChartKind, svg: &str) -> String {
        fill_template(template, &[("CHART_TITLE", kind.title()), ("CHART_SVG", svg)])
    }

    #[doc = "Draws one chart kind into an SVG string"]
    pub fn draw_chart_svg(
        kind: ChartKind,
        series: &ChartSeries,
        size: (u32, u32),
    ) -> anyhow::Result<String> {
        if series.is_empty() {
            return Err(anyhow!(
                "[ChartServiceImpl->draw_chart_svg] Cannot generate chart with empty data"
            ));
        }

        let mut buffer: String = String::new();
        {
            let root: DrawingArea<SVGBackend, Shift> =
                SVGBackend::with_string(&mut buffer, size).into_drawing_area();
            root.fill(&BACKGROUND_COLOR)?;

            match kind {
                ChartKind::Bar => Self::draw_bar(&root, series)?,
                ChartKind::Line => Self::draw_line(&root, series)?,
                ChartKind::Pie => Self::draw_pie(&root, series, size)?,
                ChartKind::Scatter => Self::draw_scatter(&root, series)?,
            }

            root.present()?;
        }

        Ok(buffer)
    }

    #[doc = "Y-axis range with 10% padding, always including zero so bars have a baseline"]
    pub fn calculate_y_range(values: &[f64]) -> (f64, f64) {
        if values.is_empty() {
            return (0.0, 1.0);
        }

        let min_val: f64 = values.iter().copied().fold(0.0, f64::min);
        let max_val: f64 = values.iter().copied().fold(0.0, f64::max);

        if min_val == max_val {
            return (min_val, min_val + 1.0);
        }

        let padding: f64 = (max_val - min_val) * 0.1;
        let y_min: f64 = if min_val < 0.0 { min_val - padding } else { 0.0 };
        let y_max: f64 = if max_val > 0.0 { max_val + padding } else { 0.0 };

        (y_min, y_max)
    }

    #[doc = r#"
        Pie slices in row order. Duplicate categories stay separate slices.
        Negative values cannot be drawn as a slice and are clamped to zero.
    "#]
    pub fn pie_slices(series: &ChartSeries) -> Vec<PieSlice> {
        series
            .points()
            .map(|(label, value)| {
                if value < 0.0 {
                    warn!(
                        "[ChartServiceImpl->pie_slices] negative value {} for '{}' drawn as an empty slice",
                        value, label
                    );
                }
                PieSlice::new(label.clone(), value.max(0.0))
            })
            .collect()
    }

    fn cartesian_chart<'a, 'b>(
        root: &'a DrawingArea<SVGBackend<'b>, Shift>,
        kind: ChartKind,
        series: &ChartSeries,
    ) -> anyhow::Result<DarkChart<'a, 'b>> {
        let (y_min, y_max) = Self::calculate_y_range(series.values());

        /* plotters never finishes laying out ticks over an infinite span */
        if !(y_max - y_min).is_finite() {
            return Err(anyhow!(
                "[ChartServiceImpl->cartesian_chart] values are too large to plot (y-range {}..{})",
                y_min,
                y_max
            ));
        }

        let x_max: f64 = series.len() as f64 - 0.5;

        let mut chart: DarkChart<'a, 'b> = ChartBuilder::on(root)
            .caption(
                kind.title(),
                ("sans-serif", 40).into_font().color(&TITLE_COLOR),
            )
            .margin(30)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..x_max, y_min..y_max)?;

        let labels: &Vec<String> = series.categories();

        chart
            .configure_mesh()
            .x_desc(series.category_title().as_str())
            .y_desc(series.value_title().as_str())
            .x_labels(labels.len().min(20))
            .y_labels(10)
            .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
            .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
            .bold_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(2))
            .axis_desc_style(("sans-serif", 22).into_font().color(&TEXT_COLOR))
            .x_label_style(("sans-serif", 18).into_font().color(&TEXT_COLOR))
            .y_label_style(("sans-serif", 18).into_font().color(&TEXT_COLOR))
            .x_label_formatter(&|x| category_label(labels, *x))
            .y_label_formatter(&|y| format_axis_value(*y))
            .draw()?;

        Ok(chart)
    }

    fn draw_bar(root: &DrawingArea<SVGBackend, Shift>, series: &ChartSeries) -> anyhow::Result<()> {
        let mut chart = Self::cartesian_chart(root, ChartKind::Bar, series)?;

        chart.draw_series(series.values().iter().enumerate().map(|(idx, value)| {
            let x: f64 = idx as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *value)], palette_color(idx).filled())
        }))?;

        Ok(())
    }

    #[doc = "Values are joined in table row order, never sorted"]
    fn draw_line(root: &DrawingArea<SVGBackend, Shift>, series: &ChartSeries) -> anyhow::Result<()> {
        let mut chart = Self::cartesian_chart(root, ChartKind::Line, series)?;

        chart.draw_series(LineSeries::new(
            series
                .values()
                .iter()
                .enumerate()
                .map(|(idx, value)| (idx as f64, *value)),
            ShapeStyle::from(&LINE_COLOR).stroke_width(3),
        ))?;

        Ok(())
    }

    fn draw_scatter(
        root: &DrawingArea<SVGBackend, Shift>,
        series: &ChartSeries,
    ) -> anyhow::Result<()> {
        let mut chart = Self::cartesian_chart(root, ChartKind::Scatter, series)?;

        chart.draw_series(
            series
                .values()
                .iter()
                .enumerate()
                .map(|(idx, value)| Circle::new((idx as f64, *value), 6, MARKER_COLOR.filled())),
        )?;

        Ok(())
    }

    fn draw_pie(
        root: &DrawingArea<SVGBackend, Shift>,
        series: &ChartSeries,
        size: (u32, u32),
    ) -> anyhow::Result<()> {
        let slices: Vec<PieSlice> = Self::pie_slices(series);
        let total: f64 = slices.iter().map(|slice| slice.size).sum();

        if total <= 0.0 {
            return Err(anyhow!(
                "[ChartServiceImpl->draw_pie] pie chart needs at least one positive value"
            ));
        }

        if !total.is_finite() {
            return Err(anyhow!(
                "[ChartServiceImpl->draw_pie] slice total {} is too large to plot",
                total
            ));
        }

        let area: DrawingArea<SVGBackend, Shift> = root.titled(
            ChartKind::Pie.title(),
            ("sans-serif", 40).into_font().color(&TITLE_COLOR),
        )?;

        let (width, height) = area.dim_in_pixel();
        let center: (i32, i32) = (width as i32 / 2, height as i32 / 2);
        let radius: f64 = f64::from(width.min(height).min(size.1)) * 0.35;

        let sizes: Vec<f64> = slices.iter().map(|slice| slice.size).collect();
        let labels: Vec<String> = slices.iter().map(|slice| slice.label.clone()).collect();
        let colors: Vec<RGBColor> = (0..slices.len()).map(palette_color).collect();

        let mut pie = Pie::new(
            &center,
            &radius,
            sizes.as_slice(),
            colors.as_slice(),
            labels.as_slice(),
        );
        pie.label_style(("sans-serif", 20).into_font().color(&TEXT_COLOR));
        pie.percentages(("sans-serif", 16).into_font().color(&TITLE_COLOR));
        area.draw(&pie)?;

        Ok(())
    }

    async fn render_document(
        &self,
        request_id: Uuid,
        kind: ChartKind,
        series: Arc<ChartSeries>,
    ) -> Result<ChartDocument, ViewerError> {
        let size: (u32, u32) = self.chart_size;

        let svg: String =
            tokio::task::spawn_blocking(move || Self::draw_chart_svg(kind, &series, size))
                .await
                .map_err(|e| ViewerError::render(kind, e))?
                .map_err(|e| ViewerError::render(kind, format!("{:#}", e)))?;

        let document: String = Self::wrap_document(&self.document_template, kind, &svg);
        let path: PathBuf = self.request_dir(request_id).join(kind.file_name());

        tokio::fs::write(&path, document)
            .await
            .map_err(|e| ViewerError::render(kind, format!("writing {:?}: {}", path, e)))?;

        info!("{} generated successfully: {:?}", kind.title(), path);

        Ok(ChartDocument::new(
            kind,
            path,
            format!("/charts/{}/{}", request_id, kind.file_name()),
        ))
    }
}

#[doc = "Category label for an x-axis tick; ticks between categories stay blank"]
fn category_label(labels: &[String], x: f64) -> String {
    let nearest: f64 = x.round();

    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }

    labels.get(nearest as usize).cloned().unwrap_or_default()
}

fn format_axis_value(y: f64) -> String {
    if y.fract() == 0.0 && y.abs() < 1e15 {
        (y as i64).to_formatted_string(&Locale::en)
    } else {
        format!("{:.2}", y)
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn render_charts(
        &self,
        request_id: Uuid,
        series: &ChartSeries,
    ) -> Result<Vec<ChartDocument>, ViewerError> {
        let request_dir: PathBuf = self.request_dir(request_id);

        tokio::fs::create_dir_all(&request_dir)
            .await
            .map_err(|source| ViewerError::ChartOutput {
                path: request_dir.clone(),
                source,
            })?;

        let shared: Arc<ChartSeries> = Arc::new(series.clone());

        let tasks = ChartKind::ALL
            .into_iter()
            .map(|kind| self.render_document(request_id, kind, Arc::clone(&shared)));

        let results: Vec<Result<ChartDocument, ViewerError>> = join_all(tasks).await;

        results.into_iter().collect()
    }

    async fn read_document(
        &self,
        request_id: Uuid,
        kind: ChartKind,
    ) -> anyhow::Result<Option<String>> {
        let path: PathBuf = self.request_dir(request_id).join(kind.file_name());

        match tokio::fs::read_to_string(&path).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow!(
                "[ChartServiceImpl->read_document] Failed to read {:?}: {:?}",
                path,
                e
            )),
        }
    }
}
