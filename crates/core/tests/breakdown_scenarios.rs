use bluefin_core::{PolicyConfig, UsageRow, WarehouseSummary, warehouse_breakdown};

fn minute(month: u32, day: u32, hour: u32, size: &str, name: &str) -> UsageRow {
    UsageRow {
        month,
        day,
        hour,
        warehouse_size: size.to_string(),
        warehouse_name: name.to_string(),
        query_count: 1,
        ..UsageRow::default()
    }
}

fn reads(mut row: UsageRow, seconds: f64) -> UsageRow {
    row.is_read = 1;
    row.read_time = seconds;
    row
}

fn writes(mut row: UsageRow, seconds: f64) -> UsageRow {
    row.is_write = 1;
    row.write_time = seconds;
    row
}

fn find<'a>(table: &'a [WarehouseSummary], name: &str) -> &'a WarehouseSummary {
    table
        .iter()
        .find(|row| row.usage.warehouse_name == name)
        .expect("warehouse in table")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn read_small_and_write_large_over_one_day() {
    let mut rows = Vec::new();
    for index in 0..120 {
        rows.push(reads(minute(3, 1, index % 24, "Small", "REPORTING_WH"), 2.0));
    }
    for index in 0..60 {
        rows.push(writes(minute(3, 1, index % 24, "Large", "LOADER_WH"), 5.0));
    }

    let table = warehouse_breakdown(&rows, &PolicyConfig::default()).expect("breakdown");
    assert_eq!(table.len(), 2);

    let small = find(&table, "REPORTING_WH");
    let large = find(&table, "LOADER_WH");
    assert_close(small.usage.days_in_set, 1.0);
    assert_close(small.cost.credits_per_day, 4.0);
    assert_close(large.cost.credits_per_day, 8.0);
    assert_close(small.cost.usd_per_day, 12.0);
    assert_close(large.cost.usd_per_year, 24.0 * 365.0);
    assert_eq!(small.cost.write_ratio, Some(0.0));
    assert_eq!(large.cost.write_ratio, Some(1.0));

    let large_offload = large.offload.expect("large offload");
    assert_eq!(large_offload.consolidated_credits_per_day, 0.0);
    assert_close(large_offload.savings, 24.0 * 365.0);
    assert_eq!(large_offload.reduction, Some(1.0));
    let small_offload = small.offload.expect("small offload");
    assert_close(small_offload.consolidated_credits_per_day, 4.0);
    assert_eq!(small_offload.reduction, Some(0.0));

    assert_close(small.ranking.spend_share, 1.0 / 3.0);
    assert_eq!(large.ranking.cost_rank, 1);
    assert_eq!(small.ranking.frequency_rank, 1);
    assert_eq!(large.ranking.inefficiency_rank, Some(1));
    assert_eq!(large.ranking.score, Some(6));
    assert_eq!(small.ranking.score, Some(9));
    assert_eq!(large.ranking.scrutiny_rank, Some(1));
    assert_eq!(table[0].usage.warehouse_name, "LOADER_WH");
}

#[test]
fn identical_warehouses_tie_everywhere() {
    let mut rows = Vec::new();
    for name in ["A_WH", "B_WH", "C_WH"] {
        for hour in 0..4 {
            rows.push(reads(minute(1, 1, hour, "Medium", name), 1.0));
            rows.push(writes(minute(1, 1, hour, "Medium", name), 1.0));
        }
    }

    let table = warehouse_breakdown(&rows, &PolicyConfig::default()).expect("breakdown");
    assert_eq!(table.len(), 3);
    for row in &table {
        assert_eq!(row.ranking.cost_rank, 1);
        assert_eq!(row.ranking.frequency_rank, 1);
        assert_eq!(row.ranking.inefficiency_rank, Some(1));
        assert_eq!(row.ranking.score, Some(5));
        assert_eq!(row.ranking.scrutiny_rank, Some(1));
    }
    let names: Vec<&str> = table
        .iter()
        .map(|row| row.usage.warehouse_name.as_str())
        .collect();
    assert_eq!(names, vec!["A_WH", "B_WH", "C_WH"]);
}

#[test]
fn single_row_spans_one_hour() {
    let rows = vec![writes(minute(7, 4, 13, "X-Small", "TINY_WH"), 3.0)];
    let table = warehouse_breakdown(&rows, &PolicyConfig::default()).expect("breakdown");
    let only = &table[0];

    assert_close(only.usage.days_in_set, 1.0 / 24.0);
    assert_close(only.cost.hours_per_day, 0.4);
    assert_close(only.cost.credits_in_set, 1.0 / 60.0);
    assert_close(only.cost.credits_per_day, 0.4);
    assert_close(only.cost.usd_per_day, 1.2);
    assert_close(only.ranking.spend_share, 1.0);
    assert_eq!(only.ranking.scrutiny_rank, Some(1));
    let offload = only.offload.expect("offload");
    assert_eq!(offload.consolidated_credits_per_day, 0.0);
    assert_eq!(offload.reduction, Some(1.0));
}

#[test]
fn distinct_hours_are_counted_across_all_warehouses() {
    let rows = vec![
        reads(minute(1, 1, 0, "Small", "A"), 1.0),
        reads(minute(1, 1, 0, "Small", "B"), 1.0),
        reads(minute(1, 2, 0, "Small", "A"), 1.0),
        reads(minute(2, 1, 0, "Small", "B"), 1.0),
    ];
    let table = warehouse_breakdown(&rows, &PolicyConfig::default()).expect("breakdown");
    for row in &table {
        assert_close(row.usage.days_in_set, 3.0 / 24.0);
    }
}
