use csv::StringRecord;

use crate::types::{IngestError, Result};

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "MONTH",
    "DAY",
    "HR",
    "WAREHOUSE_SIZE",
    "UNIQUE_WH_NAME",
    "QUERY_COUNT",
    "IS_READ",
    "IS_WRITE",
    "READ_TIME",
    "WRITE_TIME",
];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub month: usize,
    pub day: usize,
    pub hour: usize,
    pub warehouse_size: usize,
    pub warehouse_name: usize,
    pub query_count: usize,
    pub is_read: usize,
    pub is_write: usize,
    pub read_time: usize,
    pub write_time: usize,
}

impl ColumnIndex {
    pub(crate) fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            month: find("MONTH")?,
            day: find("DAY")?,
            hour: find("HR")?,
            warehouse_size: find("WAREHOUSE_SIZE")?,
            warehouse_name: find("UNIQUE_WH_NAME")?,
            query_count: find("QUERY_COUNT")?,
            is_read: find("IS_READ")?,
            is_write: find("IS_WRITE")?,
            read_time: find("READ_TIME")?,
            write_time: find("WRITE_TIME")?,
        })
    }
}

pub(crate) fn ignored_columns(headers: &StringRecord) -> Vec<String> {
    headers
        .iter()
        .filter(|header| !REQUIRED_COLUMNS.contains(header))
        .map(|header| header.to_string())
        .collect()
}

// Blank numeric cells count as zero, the way a column sum skips gaps.

pub fn parse_count(value: &str) -> Option<u64> {
    if value.is_empty() {
        return Some(0);
    }
    if let Ok(count) = value.parse::<u64>() {
        return Some(count);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 {
        Some(float as u64)
    } else {
        None
    }
}

/// A MONTH, DAY or HR cell. Compared as numbers, so `3`, `03` and `3.0` are
/// the same hour. Blank cells are rejected.
pub fn parse_time_part(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }
    parse_count(value).and_then(|part| u32::try_from(part).ok())
}

pub fn parse_flag(value: &str) -> Option<u64> {
    if value.eq_ignore_ascii_case("true") {
        return Some(1);
    }
    if value.eq_ignore_ascii_case("false") {
        return Some(0);
    }
    match parse_count(value)? {
        flag @ (0 | 1) => Some(flag),
        _ => None,
    }
}

pub fn parse_duration(value: &str) -> Option<f64> {
    if value.is_empty() {
        return Some(0.0);
    }
    value.parse::<f64>().ok().filter(|duration| duration.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_ignores_order_and_extras() {
        let headers = StringRecord::from(vec![
            "",
            "WRITE_TIME",
            "READ_TIME",
            "IS_WRITE",
            "IS_READ",
            "QUERY_COUNT",
            "UNIQUE_WH_NAME",
            "WAREHOUSE_SIZE",
            "HR",
            "DAY",
            "MONTH",
            "EXTRA",
        ]);
        let index = ColumnIndex::from_headers(&headers).expect("index");
        assert_eq!(index.write_time, 1);
        assert_eq!(index.month, 10);
        assert_eq!(ignored_columns(&headers), vec!["", "EXTRA"]);
    }

    #[test]
    fn column_index_reports_first_missing_column() {
        let headers = StringRecord::from(vec!["MONTH", "DAY", "WAREHOUSE_SIZE"]);
        let err = ColumnIndex::from_headers(&headers).expect_err("missing");
        assert!(matches!(err, IngestError::MissingColumn(column) if column == "HR"));
    }

    #[test]
    fn flags_accept_booleans_and_bits() {
        assert_eq!(parse_flag("TRUE"), Some(1));
        assert_eq!(parse_flag("false"), Some(0));
        assert_eq!(parse_flag("1"), Some(1));
        assert_eq!(parse_flag("0.0"), Some(0));
        assert_eq!(parse_flag(""), Some(0));
        assert_eq!(parse_flag("2"), None);
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn time_parts_compare_numerically() {
        assert_eq!(parse_time_part("3"), Some(3));
        assert_eq!(parse_time_part("03"), Some(3));
        assert_eq!(parse_time_part("3.0"), Some(3));
        assert_eq!(parse_time_part(""), None);
        assert_eq!(parse_time_part("3.5"), None);
        assert_eq!(parse_time_part("noon"), None);
        assert_eq!(parse_time_part("4294967296"), None);
    }

    #[test]
    fn counts_accept_integral_floats() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count("42.0"), Some(42));
        assert_eq!(parse_count("4.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn durations_reject_non_finite() {
        assert_eq!(parse_duration("1.25"), Some(1.25));
        assert_eq!(parse_duration(""), Some(0.0));
        assert_eq!(parse_duration("inf"), None);
        assert_eq!(parse_duration("NaN"), None);
        assert_eq!(parse_duration("abc"), None);
    }
}
