use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bluefin_app::{ApiError, AppError};

/// JSON error body `{ status, message, code }` with a matching status line.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: ApiError,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: Option<&str>) -> Self {
        let body = ApiError {
            status: status.as_u16(),
            message: message.into(),
            code: code.map(str::to_string),
        };
        Self { status, body }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found", Some("not_found"))
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        let body = ApiError::from(err);
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(message = %body.message, "request failed");
        }
        Self { status, body }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
