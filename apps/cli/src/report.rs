use std::fmt::Write;

use bluefin_app::Report;
use bluefin_core::WarehouseSummary;

const HEADERS: [&str; 9] = [
    "SIZE",
    "WAREHOUSE",
    "$/DAY",
    "$/YEAR",
    "WRITE",
    "REMAINING/YR",
    "SAVINGS",
    "REDUCTION",
    "SCRUTINY",
];

/// Plain-text view of a report for the terminal.
pub fn render_table(report: &Report) -> String {
    let rows: Vec<[String; 9]> = report.warehouses.iter().map(table_row).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} rows, {} warehouses)",
        report.source_name, report.rows_read, report.totals.warehouse_count
    );
    write_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        write_line(&mut out, row, &widths);
    }
    let _ = writeln!(
        out,
        "total {}/year, potential savings {}/year",
        usd(report.totals.usd_per_year),
        usd(report.totals.savings_per_year)
    );
    out
}

fn table_row(row: &WarehouseSummary) -> [String; 9] {
    let offload = row.offload.as_ref();
    [
        row.usage.warehouse_size.to_string(),
        row.usage.warehouse_name.clone(),
        usd(row.cost.usd_per_day),
        usd(row.cost.usd_per_year),
        percent(row.cost.write_ratio),
        offload
            .map(|offload| usd(offload.remaining_usd_per_year))
            .unwrap_or_default(),
        offload.map(|offload| usd(offload.savings)).unwrap_or_default(),
        percent(offload.and_then(|offload| offload.reduction)),
        row.ranking
            .scrutiny_rank
            .map(|rank| rank.to_string())
            .unwrap_or_default(),
    ]
}

fn write_line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            // names left aligned, figures right aligned
            if column < 2 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn usd(value: f64) -> String {
    format!("${value:.2}")
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|value| format!("{:.1}%", value * 100.0))
        .unwrap_or_default()
}
