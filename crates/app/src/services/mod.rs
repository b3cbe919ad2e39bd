mod report;

use std::sync::Arc;

use crate::app::AppConfig;

pub use report::ReportService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub report: ReportService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            report: ReportService::new(shared),
        }
    }
}
