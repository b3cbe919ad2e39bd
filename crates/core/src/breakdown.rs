use std::collections::{BTreeMap, HashSet};

use crate::error::{BreakdownError, Result};
use crate::policy::{PolicyConfig, simulate_offload};
use crate::rank::{RankOrder, competition_rank, rank_all};
use crate::size::WarehouseSize;
use crate::{
    CostMetrics, HOURS_PER_DAY, MINUTES_PER_HOUR, Ranking, UsageRow, WarehouseSummary,
    WarehouseUsage, project_daily_usd,
};

/// Builds the per-warehouse cost report, ordered by scrutiny rank.
pub fn warehouse_breakdown(
    rows: &[UsageRow],
    policy: &PolicyConfig,
) -> Result<Vec<WarehouseSummary>> {
    policy.validate()?;
    if rows.is_empty() {
        return Err(BreakdownError::EmptyInput);
    }

    let usages = group_usage(rows)?;
    if usages.is_empty() {
        return Err(BreakdownError::EmptyInput);
    }
    let costs: Vec<CostMetrics> = usages
        .iter()
        .map(|usage| derive_costs(usage, policy))
        .collect();
    let rankings = rank_warehouses(&usages, &costs, policy);

    let mut table: Vec<WarehouseSummary> = usages
        .into_iter()
        .zip(costs)
        .zip(rankings)
        .map(|((usage, cost), ranking)| {
            let offload = simulate_offload(&usage, &cost, policy);
            WarehouseSummary {
                usage,
                cost,
                offload,
                ranking,
            }
        })
        .collect();

    // Stable, so tied warehouses keep grouping order; unranked ones go last.
    table.sort_by_key(|row| {
        (
            row.ranking.scrutiny_rank.is_none(),
            row.ranking.scrutiny_rank,
        )
    });
    Ok(table)
}

#[derive(Default)]
struct UsageSums {
    query_count: u64,
    is_read: u64,
    is_write: u64,
    read_time: f64,
    write_time: f64,
    minute_count: u64,
}

/// Collapses log rows into one entry per (size, warehouse name), ordered by
/// size label then name. Fails on the first unknown size before producing
/// anything. Rows with a blank name count toward `days_in_set` but belong to
/// no warehouse.
pub fn group_usage(rows: &[UsageRow]) -> Result<Vec<WarehouseUsage>> {
    let sizes = rows
        .iter()
        .map(|row| row.warehouse_size.parse::<WarehouseSize>())
        .collect::<Result<Vec<_>>>()?;

    let hours: HashSet<(u32, u32, u32)> = rows
        .iter()
        .map(|row| (row.month, row.day, row.hour))
        .collect();
    let days_in_set = hours.len() as f64 / HOURS_PER_DAY;

    let mut groups: BTreeMap<(&'static str, &str), (WarehouseSize, UsageSums)> = BTreeMap::new();
    for (row, size) in rows.iter().zip(sizes) {
        if row.warehouse_name.is_empty() {
            continue;
        }
        let (_, sums) = groups
            .entry((size.label(), row.warehouse_name.as_str()))
            .or_insert_with(|| (size, UsageSums::default()));
        sums.query_count = sums.query_count.saturating_add(row.query_count);
        sums.is_read = sums.is_read.saturating_add(row.is_read);
        sums.is_write = sums.is_write.saturating_add(row.is_write);
        sums.read_time += row.read_time;
        sums.write_time += row.write_time;
        sums.minute_count += 1;
    }

    Ok(groups
        .into_iter()
        .map(|((_, name), (size, sums))| WarehouseUsage {
            warehouse_size: size,
            warehouse_name: name.to_string(),
            credits_per_hour: size.credits_per_hour(),
            query_count: sums.query_count,
            is_read: sums.is_read,
            is_write: sums.is_write,
            read_time: sums.read_time,
            write_time: sums.write_time,
            minute_count: sums.minute_count,
            days_in_set,
        })
        .collect())
}

pub fn derive_costs(usage: &WarehouseUsage, policy: &PolicyConfig) -> CostMetrics {
    let hours_running = usage.minute_count as f64 / MINUTES_PER_HOUR;
    let hours_per_day = hours_running / usage.days_in_set;
    let credits_in_set = f64::from(usage.credits_per_hour) * hours_running;
    let credits_per_day = credits_in_set / usage.days_in_set;
    let (usd_per_day, usd_per_month, usd_per_year) =
        project_daily_usd(credits_per_day * policy.credit_price_usd);

    let active_time = usage.read_time + usage.write_time;
    let write_ratio = (active_time != 0.0).then(|| usage.write_time / active_time);

    CostMetrics {
        hours_per_day,
        credits_in_set,
        credits_per_day,
        usd_per_day,
        usd_per_month,
        usd_per_year,
        write_ratio,
    }
}

/// Scores warehouses by spend share, running minutes and write ratio. The
/// lowest score is the first warehouse to review.
pub fn rank_warehouses(
    usages: &[WarehouseUsage],
    costs: &[CostMetrics],
    policy: &PolicyConfig,
) -> Vec<Ranking> {
    let total_usd_per_day: f64 = costs.iter().map(|cost| cost.usd_per_day).sum();
    let spend_shares: Vec<f64> = costs
        .iter()
        .map(|cost| cost.usd_per_day / total_usd_per_day)
        .collect();

    let cost_ranks = rank_all(&spend_shares, RankOrder::Descending);
    let minute_counts: Vec<u64> = usages.iter().map(|usage| usage.minute_count).collect();
    let frequency_ranks = rank_all(&minute_counts, RankOrder::Descending);
    let write_ratios: Vec<Option<f64>> = costs.iter().map(|cost| cost.write_ratio).collect();
    let inefficiency_ranks = competition_rank(&write_ratios, RankOrder::Descending);

    let scores: Vec<Option<u32>> = cost_ranks
        .iter()
        .zip(&frequency_ranks)
        .zip(&inefficiency_ranks)
        .map(|((cost_rank, frequency_rank), inefficiency_rank)| {
            let inefficiency_rank = (*inefficiency_rank)?;
            Some(cost_rank * policy.cost_rank_weight + frequency_rank + inefficiency_rank)
        })
        .collect();
    let scrutiny_ranks = competition_rank(&scores, RankOrder::Ascending);

    (0..usages.len())
        .map(|index| Ranking {
            spend_share: spend_shares[index],
            cost_rank: cost_ranks[index],
            frequency_rank: frequency_ranks[index],
            inefficiency_rank: inefficiency_ranks[index],
            score: scores[index],
            scrutiny_rank: scrutiny_ranks[index],
        })
        .collect()
}
