use bluefin_app::{AppError, ExportFile, Report, Result};

use crate::{
    AppContext, ClearedResponse, ExportRequest, ReportResponse, SettingsResponse,
    UploadRequest,
};

const DEFAULT_SOURCE_NAME: &str = "upload.csv";

pub fn upload(ctx: &AppContext, req: UploadRequest, body: &[u8]) -> Result<Report> {
    if body.is_empty() {
        return Err(AppError::InvalidInput("empty upload".to_string()));
    }
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_SOURCE_NAME);
    ctx.app_state.services.report.upload(name, body)
}

pub fn report(ctx: &AppContext) -> ReportResponse {
    ReportResponse {
        report: ctx.app_state.services.report.current(),
    }
}

pub fn reset(ctx: &AppContext) -> ClearedResponse {
    ClearedResponse {
        cleared: ctx.app_state.services.report.reset(),
    }
}

pub fn export(ctx: &AppContext, req: ExportRequest) -> Result<ExportFile> {
    ctx.app_state
        .services
        .report
        .export(req.file_name.as_deref())
}

pub fn settings_get(ctx: &AppContext) -> SettingsResponse {
    SettingsResponse {
        policy: ctx.app_state.config.policy,
        default_export_name: ctx.app_state.config.default_export_name.clone(),
    }
}
