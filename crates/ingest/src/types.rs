use serde::Serialize;
use std::io;

use bluefin_core::UsageRow;

/// Decoded usage log plus what was seen while reading it.
#[derive(Debug, Clone, Default)]
pub struct UsageLog {
    pub rows: Vec<UsageRow>,
    pub stats: IngestStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestStats {
    pub rows_read: usize,
    /// Header names that are not part of the usage log schema.
    pub ignored_columns: Vec<String>,
}

/// Errors emitted while decoding a usage log.
#[derive(Debug)]
pub enum IngestError {
    Io(io::Error),
    Csv(csv::Error),
    MissingColumn(String),
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Csv(err) => write!(f, "csv error: {}", err),
            Self::MissingColumn(column) => write!(f, "missing required column {}", column),
            Self::InvalidValue {
                line,
                column,
                value,
            } => write!(f, "line {}: invalid {} value {:?}", line, column, value),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
