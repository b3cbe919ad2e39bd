use bluefin_app::Report;
use bluefin_core::PolicyConfig;
use serde::Serialize;

#[derive(Serialize)]
pub struct ReportResponse {
    pub report: Option<Report>,
}

#[derive(Serialize)]
pub struct SettingsResponse {
    pub policy: PolicyConfig,
    pub default_export_name: String,
}

#[derive(Serialize)]
pub struct ClearedResponse {
    pub cleared: bool,
}
