use serde::{Deserialize, Serialize};

use crate::error::{BreakdownError, Result};
use crate::{CostMetrics, OffloadEstimate, WarehouseUsage, project_daily_usd};

pub const DEFAULT_CREDIT_PRICE_USD: f64 = 3.0;
pub const DEFAULT_WRITE_RATIO_THRESHOLD: f64 = 0.5;
pub const DEFAULT_CONSOLIDATION_FLOOR_CREDITS: f64 = 5.0;
pub const DEFAULT_DOWNSIZE_BELOW_CREDITS_PER_HOUR: f64 = 1.0;
pub const DEFAULT_DOWNSIZE_FACTOR: f64 = 0.5;
pub const DEFAULT_COST_RANK_WEIGHT: u32 = 3;
/// Keeps `cost_rank * weight + frequency_rank + inefficiency_rank` inside `u32`.
pub const MAX_COST_RANK_WEIGHT: u32 = 1_000;

/// Pricing and write-offload rules applied by the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub credit_price_usd: f64,
    /// Write ratio above which a warehouse counts as write-heavy.
    pub write_ratio_threshold: f64,
    /// Write-heavy warehouses left with fewer credits per day than this are
    /// consolidated away entirely.
    pub consolidation_floor_credits: f64,
    /// Write-heavy warehouses billed below this rate are downsized by
    /// `downsize_factor`.
    pub downsize_below_credits_per_hour: f64,
    pub downsize_factor: f64,
    pub cost_rank_weight: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            credit_price_usd: DEFAULT_CREDIT_PRICE_USD,
            write_ratio_threshold: DEFAULT_WRITE_RATIO_THRESHOLD,
            consolidation_floor_credits: DEFAULT_CONSOLIDATION_FLOOR_CREDITS,
            downsize_below_credits_per_hour: DEFAULT_DOWNSIZE_BELOW_CREDITS_PER_HOUR,
            downsize_factor: DEFAULT_DOWNSIZE_FACTOR,
            cost_rank_weight: DEFAULT_COST_RANK_WEIGHT,
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.credit_price_usd.is_finite() || self.credit_price_usd <= 0.0 {
            return Err(BreakdownError::InvalidPolicy(format!(
                "credit_price_usd must be positive, got {}",
                self.credit_price_usd
            )));
        }
        if !(0.0..=1.0).contains(&self.write_ratio_threshold) {
            return Err(BreakdownError::InvalidPolicy(format!(
                "write_ratio_threshold must be within [0, 1], got {}",
                self.write_ratio_threshold
            )));
        }
        if !self.consolidation_floor_credits.is_finite() || self.consolidation_floor_credits < 0.0
        {
            return Err(BreakdownError::InvalidPolicy(format!(
                "consolidation_floor_credits must be non-negative, got {}",
                self.consolidation_floor_credits
            )));
        }
        if !self.downsize_below_credits_per_hour.is_finite() {
            return Err(BreakdownError::InvalidPolicy(
                "downsize_below_credits_per_hour must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.downsize_factor) {
            return Err(BreakdownError::InvalidPolicy(format!(
                "downsize_factor must be within [0, 1], got {}",
                self.downsize_factor
            )));
        }
        if self.cost_rank_weight > MAX_COST_RANK_WEIGHT {
            return Err(BreakdownError::InvalidPolicy(format!(
                "cost_rank_weight must be at most {MAX_COST_RANK_WEIGHT}, got {}",
                self.cost_rank_weight
            )));
        }
        Ok(())
    }
}

/// Estimates what a warehouse would cost once its writes are moved elsewhere.
///
/// Returns `None` when the warehouse has no measurable read or write time, so
/// there is no write ratio to act on.
pub fn simulate_offload(
    usage: &WarehouseUsage,
    cost: &CostMetrics,
    policy: &PolicyConfig,
) -> Option<OffloadEstimate> {
    let write_ratio = cost.write_ratio?;
    let write_heavy = write_ratio > policy.write_ratio_threshold;

    let remaining_credits_per_day = cost.credits_per_day * (1.0 - write_ratio);
    // With the stock rate table no size bills below one credit an hour, so
    // this only fires under a custom threshold.
    let downsized_credits_per_day =
        if f64::from(usage.credits_per_hour) < policy.downsize_below_credits_per_hour && write_heavy
        {
            remaining_credits_per_day * policy.downsize_factor
        } else {
            remaining_credits_per_day
        };
    let consolidated_credits_per_day =
        if downsized_credits_per_day < policy.consolidation_floor_credits && write_heavy {
            0.0
        } else {
            downsized_credits_per_day
        };

    let (remaining_usd_per_day, remaining_usd_per_month, remaining_usd_per_year) =
        project_daily_usd(consolidated_credits_per_day * policy.credit_price_usd);
    let savings = cost.usd_per_year - remaining_usd_per_year;
    let reduction = (cost.usd_per_year != 0.0).then(|| savings / cost.usd_per_year);

    Some(OffloadEstimate {
        remaining_credits_per_day,
        downsized_credits_per_day,
        consolidated_credits_per_day,
        remaining_usd_per_day,
        remaining_usd_per_month,
        remaining_usd_per_year,
        savings,
        reduction,
    })
}
