use bluefin_core::WarehouseSummary;
use csv::Writer;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const DEFAULT_EXPORT_NAME: &str = "warehouse_breakdown";

/// A rendered download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One line of the CSV export, in report column order.
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "WAREHOUSE_SIZE")]
    warehouse_size: &'static str,
    #[serde(rename = "UNIQUE_WH_NAME")]
    warehouse_name: &'a str,
    #[serde(rename = "CREDITS_PER_HOUR")]
    credits_per_hour: u32,
    #[serde(rename = "QUERY_COUNT")]
    query_count: u64,
    #[serde(rename = "IS_READ")]
    is_read: u64,
    #[serde(rename = "IS_WRITE")]
    is_write: u64,
    #[serde(rename = "READ_TIME")]
    read_time: f64,
    #[serde(rename = "WRITE_TIME")]
    write_time: f64,
    #[serde(rename = "MN_COUNTER")]
    minute_count: u64,
    #[serde(rename = "DAYS_IN_SET")]
    days_in_set: f64,
    #[serde(rename = "HOURS_PER_DAY")]
    hours_per_day: f64,
    #[serde(rename = "CREDITS_IN_SET")]
    credits_in_set: f64,
    #[serde(rename = "CREDITS_PER_DAY")]
    credits_per_day: f64,
    #[serde(rename = "$_PER_DAY")]
    usd_per_day: f64,
    #[serde(rename = "$_PER_MONTH")]
    usd_per_month: f64,
    #[serde(rename = "$_PER_YEAR")]
    usd_per_year: f64,
    #[serde(rename = "WRITE_RATIO")]
    write_ratio: Option<f64>,
    #[serde(rename = "REMAINING_CREDITS_PER_DAY")]
    remaining_credits_per_day: Option<f64>,
    #[serde(rename = "REMAINING_SIZE")]
    downsized_credits_per_day: Option<f64>,
    #[serde(rename = "REMAINING_COUNT")]
    consolidated_credits_per_day: Option<f64>,
    #[serde(rename = "REMAINING_$_PER_DAY")]
    remaining_usd_per_day: Option<f64>,
    #[serde(rename = "REMAINING_$_PER_MONTH")]
    remaining_usd_per_month: Option<f64>,
    #[serde(rename = "REMAINING_$_PER_YEAR")]
    remaining_usd_per_year: Option<f64>,
    #[serde(rename = "SAVINGS")]
    savings: Option<f64>,
    #[serde(rename = "REDUCTION")]
    reduction: Option<f64>,
    #[serde(rename = "%_OF_SPEND")]
    spend_share: f64,
    #[serde(rename = "COST_RANK")]
    cost_rank: u32,
    #[serde(rename = "FREQUENCY_RANK")]
    frequency_rank: u32,
    #[serde(rename = "INEFFICIENY_RANK")]
    inefficiency_rank: Option<u32>,
    #[serde(rename = "SCORE")]
    score: Option<u32>,
    #[serde(rename = "SCRUTINY_RANK")]
    scrutiny_rank: Option<u32>,
}

impl<'a> ExportRow<'a> {
    fn new(index: usize, row: &'a WarehouseSummary) -> Self {
        let offload = row.offload.as_ref();
        Self {
            index,
            warehouse_size: row.usage.warehouse_size.label(),
            warehouse_name: &row.usage.warehouse_name,
            credits_per_hour: row.usage.credits_per_hour,
            query_count: row.usage.query_count,
            is_read: row.usage.is_read,
            is_write: row.usage.is_write,
            read_time: row.usage.read_time,
            write_time: row.usage.write_time,
            minute_count: row.usage.minute_count,
            days_in_set: row.usage.days_in_set,
            hours_per_day: row.cost.hours_per_day,
            credits_in_set: row.cost.credits_in_set,
            credits_per_day: row.cost.credits_per_day,
            usd_per_day: row.cost.usd_per_day,
            usd_per_month: row.cost.usd_per_month,
            usd_per_year: row.cost.usd_per_year,
            write_ratio: row.cost.write_ratio,
            remaining_credits_per_day: offload.map(|o| o.remaining_credits_per_day),
            downsized_credits_per_day: offload.map(|o| o.downsized_credits_per_day),
            consolidated_credits_per_day: offload.map(|o| o.consolidated_credits_per_day),
            remaining_usd_per_day: offload.map(|o| o.remaining_usd_per_day),
            remaining_usd_per_month: offload.map(|o| o.remaining_usd_per_month),
            remaining_usd_per_year: offload.map(|o| o.remaining_usd_per_year),
            savings: offload.map(|o| o.savings),
            reduction: offload.and_then(|o| o.reduction),
            spend_share: row.ranking.spend_share,
            cost_rank: row.ranking.cost_rank,
            frequency_rank: row.ranking.frequency_rank,
            inefficiency_rank: row.ranking.inefficiency_rank,
            score: row.ranking.score,
            scrutiny_rank: row.ranking.scrutiny_rank,
        }
    }
}

/// Encodes the report table as UTF-8 CSV with a leading 0-based index column.
pub fn table_to_csv(table: &[WarehouseSummary]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    for (index, row) in table.iter().enumerate() {
        writer.serialize(ExportRow::new(index, row))?;
    }
    writer
        .into_inner()
        .map_err(|err| AppError::Message(format!("flush csv export: {}", err)))
}

/// Content key for the export cache.
pub fn table_digest(table: &[WarehouseSummary]) -> Result<String> {
    let encoded = serde_json::to_vec(table)?;
    Ok(hex::encode(Sha256::digest(&encoded)))
}

/// Turns user-supplied text into a download name ending in `.csv`.
pub fn export_file_name(requested: Option<&str>, default_name: &str) -> String {
    let requested = requested.map(str::trim).unwrap_or("");
    let base = if requested.is_empty() {
        default_name
    } else {
        requested
    };
    let mut name: String = base
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | '"' | ':' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    if name.to_ascii_lowercase().ends_with(".csv") {
        name.truncate(name.len() - 4);
    }
    if name.is_empty() {
        name = default_name.to_string();
    }
    format!("{name}.csv")
}
