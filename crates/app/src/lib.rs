pub mod app;
pub mod error;
pub mod export;
pub mod services;
pub mod session;
pub mod util;

pub use app::{AppConfig, AppState};
pub use error::{ApiError, AppError, Result};
pub use export::{
    CSV_CONTENT_TYPE, DEFAULT_EXPORT_NAME, ExportFile, export_file_name, table_digest,
    table_to_csv,
};
pub use services::{AppServices, ReportService};
pub use session::{Report, ReportSession, ReportTotals, build_report};
pub use util::time::now_rfc3339;
