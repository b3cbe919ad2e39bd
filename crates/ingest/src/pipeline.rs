use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bluefin_core::UsageRow;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::parser::{
    ColumnIndex, ignored_columns, parse_count, parse_duration, parse_flag, parse_time_part,
};
use crate::types::{IngestError, IngestStats, Result, UsageLog};

/// Decodes a usage log with a header row. Every required column must be
/// present before any row is read; unknown columns are ignored.
pub fn read_usage_log<R: Read>(reader: R) -> Result<UsageLog> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = ColumnIndex::from_headers(&headers)?;
    let extra_columns = ignored_columns(&headers);
    if !extra_columns.is_empty() {
        tracing::debug!(columns = ?extra_columns, "ignoring extra usage log columns");
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        rows.push(decode_row(&record, &index, line)?);
    }

    tracing::debug!(rows = rows.len(), "decoded usage log");
    Ok(UsageLog {
        stats: IngestStats {
            rows_read: rows.len(),
            ignored_columns: extra_columns,
        },
        rows,
    })
}

pub fn read_usage_log_from_path(path: &Path) -> Result<UsageLog> {
    let file = File::open(path)?;
    read_usage_log(BufReader::new(file))
}

fn decode_row(record: &StringRecord, index: &ColumnIndex, line: u64) -> Result<UsageRow> {
    let field = |position: usize| record.get(position).unwrap_or("");
    let invalid = |column: &'static str, position: usize| IngestError::InvalidValue {
        line,
        column,
        value: field(position).to_string(),
    };

    Ok(UsageRow {
        month: parse_time_part(field(index.month))
            .ok_or_else(|| invalid("MONTH", index.month))?,
        day: parse_time_part(field(index.day)).ok_or_else(|| invalid("DAY", index.day))?,
        hour: parse_time_part(field(index.hour)).ok_or_else(|| invalid("HR", index.hour))?,
        warehouse_size: field(index.warehouse_size).to_string(),
        warehouse_name: field(index.warehouse_name).to_string(),
        query_count: parse_count(field(index.query_count))
            .ok_or_else(|| invalid("QUERY_COUNT", index.query_count))?,
        is_read: parse_flag(field(index.is_read))
            .ok_or_else(|| invalid("IS_READ", index.is_read))?,
        is_write: parse_flag(field(index.is_write))
            .ok_or_else(|| invalid("IS_WRITE", index.is_write))?,
        read_time: parse_duration(field(index.read_time))
            .ok_or_else(|| invalid("READ_TIME", index.read_time))?,
        write_time: parse_duration(field(index.write_time))
            .ok_or_else(|| invalid("WRITE_TIME", index.write_time))?,
    })
}
