use std::io::Read;

use bluefin_core::{PolicyConfig, WarehouseSummary, warehouse_breakdown};
use ingest::read_usage_log;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::{table_digest, table_to_csv};
use crate::util::time::now_rfc3339;

/// A finished breakdown of one uploaded usage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub source_name: String,
    pub generated_at: String,
    pub rows_read: usize,
    pub ignored_columns: Vec<String>,
    pub totals: ReportTotals,
    pub warehouses: Vec<WarehouseSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub warehouse_count: usize,
    pub usd_per_day: f64,
    pub usd_per_month: f64,
    pub usd_per_year: f64,
    /// Yearly savings summed over warehouses that have an offload estimate.
    pub savings_per_year: f64,
}

impl ReportTotals {
    pub fn from_table(table: &[WarehouseSummary]) -> Self {
        table.iter().fold(
            Self {
                warehouse_count: table.len(),
                ..Self::default()
            },
            |mut totals, row| {
                totals.usd_per_day += row.cost.usd_per_day;
                totals.usd_per_month += row.cost.usd_per_month;
                totals.usd_per_year += row.cost.usd_per_year;
                if let Some(offload) = row.offload {
                    totals.savings_per_year += offload.savings;
                }
                totals
            },
        )
    }
}

/// Reads a usage log and runs the breakdown over it.
pub fn build_report<R: Read>(
    source_name: &str,
    reader: R,
    policy: &PolicyConfig,
) -> Result<Report> {
    let log = read_usage_log(reader)?;
    let warehouses = warehouse_breakdown(&log.rows, policy)?;
    Ok(Report {
        source_name: source_name.to_string(),
        generated_at: now_rfc3339(),
        rows_read: log.stats.rows_read,
        ignored_columns: log.stats.ignored_columns,
        totals: ReportTotals::from_table(&warehouses),
        warehouses,
    })
}

#[derive(Debug, Clone)]
struct CachedExport {
    digest: String,
    bytes: Vec<u8>,
}

/// The report currently on screen and its encoded export. Replaced wholesale
/// on every successful upload; never partially updated.
#[derive(Debug, Default)]
pub struct ReportSession {
    report: Option<Report>,
    export: Option<CachedExport>,
}

impl ReportSession {
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn replace(&mut self, report: Report) -> &Report {
        self.report.insert(report)
    }

    pub fn clear(&mut self) -> bool {
        self.export = None;
        self.report.take().is_some()
    }

    /// CSV bytes for the current report, re-encoded only when the table
    /// changed since the last call. `None` when no report is loaded.
    pub fn export_csv(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(report) = self.report.as_ref() else {
            return Ok(None);
        };
        let digest = table_digest(&report.warehouses)?;
        if let Some(cached) = self.export.as_ref().filter(|cached| cached.digest == digest) {
            tracing::debug!(digest = %digest, "export cache hit");
            return Ok(Some(cached.bytes.clone()));
        }
        tracing::debug!(digest = %digest, "export cache miss");
        let bytes = table_to_csv(&report.warehouses)?;
        self.export = Some(CachedExport {
            digest,
            bytes: bytes.clone(),
        });
        Ok(Some(bytes))
    }

    pub fn has_cached_export(&self) -> bool {
        self.export.is_some()
    }
}
