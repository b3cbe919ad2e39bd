mod breakdown;
mod error;
mod policy;
mod rank;
mod size;

use serde::{Deserialize, Serialize};

pub use breakdown::{derive_costs, group_usage, rank_warehouses, warehouse_breakdown};
pub use error::{BreakdownError, Result};
pub use policy::{
    DEFAULT_CONSOLIDATION_FLOOR_CREDITS, DEFAULT_COST_RANK_WEIGHT, DEFAULT_CREDIT_PRICE_USD,
    DEFAULT_DOWNSIZE_BELOW_CREDITS_PER_HOUR, DEFAULT_DOWNSIZE_FACTOR,
    DEFAULT_WRITE_RATIO_THRESHOLD, MAX_COST_RANK_WEIGHT, PolicyConfig, simulate_offload,
};
pub use rank::{RankOrder, competition_rank, rank_all};
pub use size::WarehouseSize;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const HOURS_PER_DAY: f64 = 24.0;
/// Average number of days in a month.
pub const DAYS_PER_MONTH: f64 = 30.437;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// One row of the warehouse query log. Each row stands for one minute in
/// which the warehouse was observed running.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub warehouse_size: String,
    pub warehouse_name: String,
    pub query_count: u64,
    pub is_read: u64,
    pub is_write: u64,
    pub read_time: f64,
    pub write_time: f64,
}

/// Per-warehouse sums over the whole log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseUsage {
    pub warehouse_size: WarehouseSize,
    pub warehouse_name: String,
    pub credits_per_hour: u32,
    pub query_count: u64,
    pub is_read: u64,
    pub is_write: u64,
    pub read_time: f64,
    pub write_time: f64,
    pub minute_count: u64,
    /// Days spanned by the whole log, shared by every warehouse.
    pub days_in_set: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostMetrics {
    pub hours_per_day: f64,
    pub credits_in_set: f64,
    pub credits_per_day: f64,
    pub usd_per_day: f64,
    pub usd_per_month: f64,
    pub usd_per_year: f64,
    /// Share of read+write time spent writing; `None` when neither was logged.
    pub write_ratio: Option<f64>,
}

/// Cost left after offloading writes and rightsizing, all in credits or
/// dollars per period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffloadEstimate {
    pub remaining_credits_per_day: f64,
    pub downsized_credits_per_day: f64,
    pub consolidated_credits_per_day: f64,
    pub remaining_usd_per_day: f64,
    pub remaining_usd_per_month: f64,
    pub remaining_usd_per_year: f64,
    pub savings: f64,
    pub reduction: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub spend_share: f64,
    pub cost_rank: u32,
    pub frequency_rank: u32,
    pub inefficiency_rank: Option<u32>,
    pub score: Option<u32>,
    pub scrutiny_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSummary {
    #[serde(flatten)]
    pub usage: WarehouseUsage,
    #[serde(flatten)]
    pub cost: CostMetrics,
    pub offload: Option<OffloadEstimate>,
    #[serde(flatten)]
    pub ranking: Ranking,
}

/// Extends a daily dollar figure to `(day, month, year)`.
pub fn project_daily_usd(usd_per_day: f64) -> (f64, f64, f64) {
    (
        usd_per_day,
        usd_per_day * DAYS_PER_MONTH,
        usd_per_day * DAYS_PER_YEAR,
    )
}
