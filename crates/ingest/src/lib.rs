mod parser;
mod pipeline;
mod types;

pub use parser::{
    REQUIRED_COLUMNS, parse_count, parse_duration, parse_flag, parse_time_part,
};
pub use pipeline::{read_usage_log, read_usage_log_from_path};
pub use types::{IngestError, IngestStats, Result, UsageLog};
