use axum::{
    body::{Body, Bytes},
    extract::{Json, Query, State},
    http::{
        HeaderValue, Method, Request, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};

use app_api::{ExportRequest, UploadRequest};

use crate::{errors::HttpError, state::HttpState};

const INDEX_HTML: &str = include_str!("../static/index.html");
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

pub async fn upload(
    State(state): State<HttpState>,
    Query(req): Query<UploadRequest>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let context = state.context.clone();
    let report = tokio::task::spawn_blocking(move || app_api::upload(&context, req, &body))
        .await
        .map_err(|err| HttpError::internal(err.to_string()))??;
    Ok(Json(report))
}

pub async fn report(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(app_api::report(&state.context)))
}

pub async fn reset(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(app_api::reset(&state.context)))
}

pub async fn export(
    State(state): State<HttpState>,
    Query(req): Query<ExportRequest>,
) -> Result<Response, HttpError> {
    let file = app_api::export(&state.context, req)?;
    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.file_name)).map_err(
            |_| {
                HttpError::new(
                    StatusCode::BAD_REQUEST,
                    "file name cannot be used in a download header",
                    Some("invalid_input"),
                )
            },
        )?;
    let mut response = Response::new(Body::from(file.bytes));
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type));
    headers.insert(CONTENT_DISPOSITION, disposition);
    Ok(response)
}

pub async fn settings_get(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(app_api::settings_get(&state.context)))
}

pub async fn ui_fallback(
    State(state): State<HttpState>,
    req: Request<Body>,
) -> Result<Response, HttpError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(HttpError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed",
            None,
        ));
    }

    let path = req.uri().path().trim_start_matches('/');
    if path.is_empty() || path == "index.html" || !path.contains('.') {
        return Ok(render_index(&state.csrf_token));
    }

    Err(HttpError::not_found())
}

fn render_index(csrf_token: &str) -> Response {
    let mut response = Response::new(Body::from(inject_csrf(INDEX_HTML, csrf_token)));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE));
    response
}

pub(crate) fn inject_csrf(html: &str, csrf_token: &str) -> String {
    let snippet = format!(
        "<script>window.__BLUEFIN_CSRF__=\"{}\";</script>",
        csrf_token
    );
    if html.contains("</head>") {
        html.replacen("</head>", &format!("{snippet}</head>"), 1)
    } else {
        format!("{html}{snippet}")
    }
}

