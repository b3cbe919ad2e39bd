use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize, Default)]
pub struct UploadRequest {
    /// Original file name of the uploaded log.
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ExportRequest {
    pub file_name: Option<String>,
}
