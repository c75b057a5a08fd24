use crate::common::*;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::controller::main_controller::*;
use crate::dto::{upload_file::*, visualization_result::*};
use crate::errors::viewer_error::*;
use crate::traits::service_traits::{
    chart_service::*, cleanup_service::*, column_service::*, sheet_service::*, upload_service::*,
};

pub const FLASH_COOKIE: &str = "flash";
pub const UPLOAD_FIELD: &str = "file";

type SharedController<U, S, R, C, K> = Arc<MainController<U, S, R, C, K>>;

#[doc = r#"
    Routes:
    - `GET /` upload form (+ pending flash message)
    - `POST /upload` multipart upload, answers with the visualization page or a redirect to `/`
    - `GET /charts/:request_id/:file_name` rendered chart documents
"#]
pub fn build_router<U, S, R, C, K>(
    controller: SharedController<U, S, R, C, K>,
    max_upload_bytes: usize,
) -> Router
where
    U: UploadService + 'static,
    S: SheetService + 'static,
    R: ColumnService + 'static,
    C: ChartService + 'static,
    K: CleanupService + 'static,
{
    Router::new()
        .route("/", get(index_handler::<U, S, R, C, K>))
        .route("/upload", post(upload_handler::<U, S, R, C, K>))
        .route(
            "/charts/:request_id/:file_name",
            get(chart_document_handler::<U, S, R, C, K>),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(controller)
}

async fn index_handler<U, S, R, C, K>(
    State(controller): State<SharedController<U, S, R, C, K>>,
    jar: CookieJar,
) -> Response
where
    U: UploadService + 'static,
    S: SheetService + 'static,
    R: ColumnService + 'static,
    C: ChartService + 'static,
    K: CleanupService + 'static,
{
    let flash: Option<String> = jar.get(FLASH_COOKIE).map(|cookie| {
        decode(cookie.value())
            .map(|message| message.into_owned())
            .unwrap_or_else(|_| cookie.value().to_string())
    });

    /* A flash message is shown exactly once */
    let jar: CookieJar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    match controller.render_index_page(flash.as_deref()) {
        Ok(html) => (jar, Html(html)).into_response(),
        Err(e) => {
            error!("[http_router->index_handler] {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "index page unavailable").into_response()
        }
    }
}

async fn upload_handler<U, S, R, C, K>(
    State(controller): State<SharedController<U, S, R, C, K>>,
    jar: CookieJar,
    multipart: Multipart,
) -> Response
where
    U: UploadService + 'static,
    S: SheetService + 'static,
    R: ColumnService + 'static,
    C: ChartService + 'static,
    K: CleanupService + 'static,
{
    let upload: UploadFile = match extract_upload(multipart).await {
        Ok(upload) => upload,
        Err(e) => return redirect_with_flash(jar, &e),
    };

    let result: VisualizationResult = match controller.visualize_upload(upload).await {
        Ok(result) => result,
        Err(e) => return redirect_with_flash(jar, &e),
    };

    match controller.render_visualization_page(&result) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("[http_router->upload_handler] {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "visualization page unavailable",
            )
                .into_response()
        }
    }
}

async fn chart_document_handler<U, S, R, C, K>(
    State(controller): State<SharedController<U, S, R, C, K>>,
    UrlPath((request_id, file_name)): UrlPath<(String, String)>,
) -> Response
where
    U: UploadService + 'static,
    S: SheetService + 'static,
    R: ColumnService + 'static,
    C: ChartService + 'static,
    K: CleanupService + 'static,
{
    match controller.read_chart_document(&request_id, &file_name).await {
        Ok(Some(document)) => Html(document).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "chart not found").into_response(),
        Err(e) => {
            error!("[http_router->chart_document_handler] {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "chart unavailable").into_response()
        }
    }
}

#[doc = "Pulls the `file` field out of the multipart body; other fields are ignored"]
async fn extract_upload(mut multipart: Multipart) -> Result<UploadFile, ViewerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ViewerError::Upload(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename: String = field.file_name().unwrap_or_default().to_string();
        let content: Bytes = field
            .bytes()
            .await
            .map_err(|e| ViewerError::Upload(e.to_string()))?;

        return Ok(UploadFile::new(filename, content));
    }

    Err(ViewerError::MissingFile)
}

fn redirect_with_flash(jar: CookieJar, err: &ViewerError) -> Response {
    warn!(
        "[http_router->redirect_with_flash] upload rejected ({:?}): {}",
        err.kind(),
        err
    );

    let message: String = encode(&err.user_message()).into_owned();
    let cookie: Cookie<'static> = Cookie::build((FLASH_COOKIE, message))
        .path("/")
        .http_only(true)
        .build();

    (jar.add(cookie), Redirect::to("/")).into_response()
}
