use bluefin_core::BreakdownError;
use ingest::IngestError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("breakdown error: {0}")]
    Breakdown(#[from] BreakdownError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("export error: {0}")]
    Export(#[from] csv::Error),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let (status, code) = match &err {
            AppError::Breakdown(BreakdownError::UnknownWarehouseSize(_)) => {
                (400, Some("unknown_warehouse_size"))
            }
            AppError::Breakdown(BreakdownError::EmptyInput) => (400, Some("empty_input")),
            AppError::Ingest(IngestError::MissingColumn(_)) => (400, Some("missing_column")),
            AppError::Ingest(IngestError::InvalidValue { .. }) => (400, Some("invalid_value")),
            AppError::Ingest(IngestError::Csv(_)) => (400, Some("invalid_csv")),
            AppError::InvalidInput(_) => (400, Some("invalid_input")),
            AppError::NotFound(_) => (404, Some("not_found")),
            AppError::Breakdown(BreakdownError::InvalidPolicy(_))
            | AppError::Ingest(IngestError::Io(_))
            | AppError::Io(_)
            | AppError::Serde(_)
            | AppError::Export(_)
            | AppError::Message(_) => (500, None),
        };
        Self {
            status,
            message: err.to_string(),
            code: code.map(str::to_string),
        }
    }
}
