#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BreakdownError {
    #[error("unknown warehouse size {0:?}")]
    UnknownWarehouseSize(String),
    #[error("usage log contains no named warehouse rows")]
    EmptyInput,
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, BreakdownError>;
