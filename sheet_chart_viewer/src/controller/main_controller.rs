use crate::common::*;

use crate::dto::{
    chart_document::*, staged_upload::*, upload_file::*, visualization_result::*,
};
use crate::enums::{chart_kind::*, sheet_format::*};
use crate::errors::viewer_error::*;
use crate::model::{chart::chart_series::*, table::data_table::*};
use crate::traits::service_traits::{
    chart_service::*, cleanup_service::*, column_service::*, sheet_service::*, upload_service::*,
};
use crate::utils_modules::{html_utils::*, io_utils::*, time_utils::*};

pub const INDEX_TEMPLATE: &str = "index_template.html";
pub const VISUALIZATION_TEMPLATE: &str = "visualization_template.html";

#[derive(Debug, new)]
pub struct MainController<U, S, R, C, K>
where
    U: UploadService,
    S: SheetService,
    R: ColumnService,
    C: ChartService,
    K: CleanupService,
{
    upload_service: U,
    sheet_service: S,
    column_service: R,
    chart_service: C,
    cleanup_service: K,
    template_dir: PathBuf,
}

impl<U, S, R, C, K> MainController<U, S, R, C, K>
where
    U: UploadService,
    S: SheetService,
    R: ColumnService,
    C: ChartService,
    K: CleanupService,
{
    #[doc = r#"
        Runs one upload through the whole pipeline.

        1. Validate the filename and extension (nothing is written on rejection)
        2. Stage the bytes under a fresh request id
        3. Load the table, resolve the category/value columns, render the four charts
        4. On success delete the staged input; on failure hand it to the cleanup policy

        # Returns
        * `VisualizationResult` - the four chart documents of this request
    "#]
    pub async fn visualize_upload(
        &self,
        upload: UploadFile,
    ) -> Result<VisualizationResult, ViewerError> {
        let format: SheetFormat = self.upload_service.validate_upload(&upload)?;

        let request_id: Uuid = Uuid::new_v4();
        let staged: StagedUpload = self
            .upload_service
            .stage_upload(request_id, &upload, format)
            .await?;

        match self.process_staged(&staged).await {
            Ok(result) => {
                /* The charts are already on disk, a leftover input file is only logged */
                if let Err(e) = self.cleanup_service.remove_staged(&staged).await {
                    error!("[MainController->visualize_upload] {:?}", e);
                }

                info!(
                    "[MainController->visualize_upload] request {} rendered {} charts from '{}'",
                    request_id,
                    result.documents().len(),
                    result.source_filename()
                );

                Ok(result)
            }
            Err(e) => {
                error!(
                    "[MainController->visualize_upload] request {} failed ({:?}): {}",
                    request_id,
                    e.kind(),
                    e
                );
                self.cleanup_service.release_failed(&staged).await;
                Err(e)
            }
        }
    }

    async fn process_staged(
        &self,
        staged: &StagedUpload,
    ) -> Result<VisualizationResult, ViewerError> {
        let table: DataTable = self.sheet_service.load_table(staged).await?;
        let series: ChartSeries = self.column_service.resolve_series(&table)?;
        let documents: Vec<ChartDocument> = self
            .chart_service
            .render_charts(*staged.request_id(), &series)
            .await?;

        Ok(VisualizationResult::new(
            *staged.request_id(),
            staged.original_filename().to_string(),
            series.len(),
            Local::now(),
            documents,
        ))
    }

    #[doc = "Entry view with the upload form and an optional flash message"]
    pub fn render_index_page(&self, flash: Option<&str>) -> anyhow::Result<String> {
        let template: String = read_template(&self.template_dir, INDEX_TEMPLATE)?;

        let flash_block: String = match flash {
            Some(message) => format!(
                r#"<div class="flash flash-error" role="alert">{}</div>"#,
                escape_html(message)
            ),
            None => String::new(),
        };

        Ok(fill_template(&template, &[("FLASH_BLOCK", flash_block.as_str())]))
    }

    #[doc = "Result page that embeds the four chart documents"]
    pub fn render_visualization_page(&self, result: &VisualizationResult) -> anyhow::Result<String> {
        let template: String = read_template(&self.template_dir, VISUALIZATION_TEMPLATE)?;

        let ordered: Vec<&ChartDocument> = ChartKind::ALL
            .into_iter()
            .filter_map(|kind| result.document(kind))
            .collect();

        let chart_frames: String = generate_rows(&ordered, |doc| {
            format!(
                r#"<section class="chart-card">
                    <h2>{}</h2>
                    <iframe src="{}" title="{}" loading="lazy"></iframe>
                </section>"#,
                doc.kind().title(),
                escape_html(doc.url()),
                doc.kind().title(),
            )
        });

        let source_filename: String = escape_html(result.source_filename());
        let row_count: String = result.row_count().to_formatted_string(&Locale::en);
        let generated_at: String = convert_date_to_str_human(*result.generated_at());

        Ok(fill_template(
            &template,
            &[
                ("SOURCE_FILENAME", source_filename.as_str()),
                ("ROW_COUNT", row_count.as_str()),
                ("GENERATED_AT", generated_at.as_str()),
                ("CHART_FRAMES", chart_frames.as_str()),
            ],
        ))
    }

    #[doc = "Looks up a rendered chart document by its public request id and file name"]
    pub async fn read_chart_document(
        &self,
        request_id: &str,
        file_name: &str,
    ) -> anyhow::Result<Option<String>> {
        let (request_id, kind) = match (
            Uuid::parse_str(request_id),
            ChartKind::from_file_name(file_name),
        ) {
            (Ok(request_id), Some(kind)) => (request_id, kind),
            _ => return Ok(None),
        };

        self.chart_service.read_document(request_id, kind).await
    }

    #[doc = r#"
        Background retention loop: every `sweep_interval_sec` seconds, expired request
        directories are removed. Anything that could not be removed is retried on the next tick.
    "#]
    pub async fn retention_task(&self, sweep_interval_sec: u64) {
        let mut ticker: Interval = interval(Duration::from_secs(sweep_interval_sec.max(1)));

        loop {
            ticker.tick().await;

            self.cleanup_service.sweep_expired().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::*;

    fn csv_upload(filename: &str, body: &'static str) -> UploadFile {
        UploadFile::new(filename.to_string(), Bytes::from_static(body.as_bytes()))
    }

    #[doc = "Trimmed contents of every `<text>` element in a rendered SVG"]
    fn svg_text_labels(svg: &str) -> Vec<String> {
        svg.split("<text")
            .skip(1)
            .filter_map(|chunk| {
                let body: &str = &chunk[chunk.find('>')? + 1..];
                let end: usize = body.find("</text>")?;
                Some(body[..end].trim().to_string())
            })
            .collect()
    }

    fn count_files(dir: &Path) -> usize {
        match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| {
                    let path: PathBuf = entry.path();
                    if path.is_dir() { count_files(&path) } else { 1 }
                })
                .sum(),
            Err(_) => 0,
        }
    }

    #[tokio::test]
    async fn valid_upload_renders_four_documents_and_drops_the_input() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let result: VisualizationResult = controller
            .visualize_upload(csv_upload(
                "sales.csv",
                "category,Value\nA,1\nB,2\nA,3\n",
            ))
            .await
            .expect("visualized");

        assert_eq!(*result.row_count(), 3);
        assert_eq!(result.documents().len(), 4);
        for kind in ChartKind::ALL {
            let doc: &ChartDocument = result.document(kind).expect("document per kind");
            assert!(doc.path().exists(), "{}", kind);
        }

        assert_eq!(count_files(&staging_dir(tmp.path())), 0);
    }

    #[tokio::test]
    async fn missing_value_column_keeps_the_staged_file() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let err: ViewerError = controller
            .visualize_upload(csv_upload("sales.csv", "Category,Amount\nA,1\n"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Resolve);
        assert!(matches!(err, ViewerError::ColumnNotFound { ref column, .. } if column == "Value"));
        assert_eq!(count_files(&staging_dir(tmp.path())), 1);
    }

    #[tokio::test]
    async fn rejected_uploads_never_touch_the_disk() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let empty: ViewerError = controller
            .visualize_upload(csv_upload("", "Category,Value\nA,1\n"))
            .await
            .unwrap_err();
        let wrong: ViewerError = controller
            .visualize_upload(csv_upload("sales.txt", "Category,Value\nA,1\n"))
            .await
            .unwrap_err();

        assert!(matches!(empty, ViewerError::EmptyFilename));
        assert!(matches!(wrong, ViewerError::InvalidExtension { .. }));
        assert!(!staging_dir(tmp.path()).exists());
        assert!(!chart_dir(tmp.path()).exists());
    }

    #[tokio::test]
    async fn reupload_produces_an_independent_complete_set() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let first: VisualizationResult = controller
            .visualize_upload(csv_upload("sales.csv", "Category,Value\nA,1\nB,2\n"))
            .await
            .expect("first");
        let second: VisualizationResult = controller
            .visualize_upload(csv_upload("sales.csv", "Category,Value\nC,5\n"))
            .await
            .expect("second");

        assert_ne!(first.request_id(), second.request_id());

        let first_pie: String = controller
            .read_chart_document(&first.request_id().to_string(), "pie.html")
            .await
            .expect("read")
            .expect("first pie");
        let second_pie: String = controller
            .read_chart_document(&second.request_id().to_string(), "pie.html")
            .await
            .expect("read")
            .expect("second pie");

        let first_labels: Vec<String> = svg_text_labels(&first_pie);
        let second_labels: Vec<String> = svg_text_labels(&second_pie);

        assert!(first_labels.iter().any(|label| label == "B"), "{:?}", first_labels);
        assert!(second_labels.iter().any(|label| label == "C"), "{:?}", second_labels);
        assert!(!second_labels.iter().any(|label| label == "B"), "{:?}", second_labels);
        assert_eq!(count_files(&chart_dir(tmp.path())), 8);
    }

    #[tokio::test]
    async fn unknown_chart_documents_are_not_found() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        for (request_id, file_name) in [
            ("not-a-uuid", "bar.html"),
            ("6f1f4b8e-8d0c-4a7e-9d55-3b1f0c2a9e11", "../secret.html"),
            ("6f1f4b8e-8d0c-4a7e-9d55-3b1f0c2a9e11", "bar.html"),
        ] {
            assert!(
                controller
                    .read_chart_document(request_id, file_name)
                    .await
                    .expect("lookup")
                    .is_none()
            );
        }
    }

    #[test]
    fn placeholder_shaped_filenames_stay_literal() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let result: VisualizationResult = VisualizationResult::new(
            Uuid::new_v4(),
            "{{CHART_FRAMES}}.csv".to_string(),
            1,
            Local::now(),
            vec![ChartDocument::new(
                ChartKind::Pie,
                PathBuf::from("pie.html"),
                "/charts/x/pie.html".to_string(),
            )],
        );
        let page: String = controller
            .render_visualization_page(&result)
            .expect("visualization");

        assert!(page.contains("{{CHART_FRAMES}}.csv"));
        assert_eq!(page.matches("<iframe").count(), 1);
    }

    #[test]
    fn pages_escape_user_text() {
        let tmp: tempfile::TempDir = tempfile::tempdir().expect("tempdir");
        let controller: TestController = build_test_controller(tmp.path(), false);

        let index: String = controller
            .render_index_page(Some("<b>bad</b> file"))
            .expect("index");
        assert!(index.contains("&lt;b&gt;bad&lt;/b&gt; file"));
        assert!(index.contains(r#"name="file""#));
        assert!(!index.contains("{{FLASH_BLOCK}}"));

        let result: VisualizationResult = VisualizationResult::new(
            Uuid::new_v4(),
            "<q>.csv".to_string(),
            1234,
            Local::now(),
            vec![ChartDocument::new(
                ChartKind::Bar,
                PathBuf::from("bar.html"),
                "/charts/x/bar.html".to_string(),
            )],
        );
        let page: String = controller
            .render_visualization_page(&result)
            .expect("visualization");
        assert!(page.contains("&lt;q&gt;.csv"));
        assert!(page.contains("1,234"));
        assert!(page.contains(r#"src="/charts/x/bar.html""#));
        assert!(!page.contains("{{"));
    }
}
