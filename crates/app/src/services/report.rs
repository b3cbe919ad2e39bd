use std::io::Read;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{AppError, Result};
use crate::export::{CSV_CONTENT_TYPE, ExportFile, export_file_name};
use crate::services::SharedConfig;
use crate::session::{Report, ReportSession, build_report};

#[derive(Clone)]
pub struct ReportService {
    config: SharedConfig,
    session: Arc<Mutex<ReportSession>>,
}

impl ReportService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self {
            config,
            session: Arc::new(Mutex::new(ReportSession::default())),
        }
    }

    /// Replaces the session report with a breakdown of `reader`. On failure
    /// the previous report is left in place.
    pub fn upload<R: Read>(&self, source_name: &str, reader: R) -> Result<Report> {
        let report = match build_report(source_name, reader, &self.config.policy) {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(source = source_name, error = %err, "usage log rejected");
                return Err(err);
            }
        };
        tracing::info!(
            source = source_name,
            rows = report.rows_read,
            warehouses = report.warehouses.len(),
            "usage log processed"
        );
        let mut session = self.session.lock();
        Ok(session.replace(report).clone())
    }

    pub fn current(&self) -> Option<Report> {
        self.session.lock().report().cloned()
    }

    pub fn reset(&self) -> bool {
        let cleared = self.session.lock().clear();
        if cleared {
            tracing::info!("report cleared");
        }
        cleared
    }

    pub fn export(&self, file_name: Option<&str>) -> Result<ExportFile> {
        let bytes = self
            .session
            .lock()
            .export_csv()?
            .ok_or_else(|| AppError::NotFound("no report loaded".to_string()))?;
        Ok(ExportFile {
            file_name: export_file_name(file_name, &self.config.default_export_name),
            content_type: CSV_CONTENT_TYPE,
            bytes,
        })
    }
}
