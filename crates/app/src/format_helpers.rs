//! Shared formatting and form-parsing utilities for the UI layer.

use chrono::{NaiveDate, NaiveTime};

/// Whether a form creates a record or edits the one with this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn is_edit(self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// Value for an `<input type="date">`.
pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date the Swiss way: "17.05.2024".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Like [`format_date`], with a dash for missing dates.
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "–".to_string())
}

/// Parse a date typed into an `<input type="date">` (ISO "2024-05-17").
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Parse a time typed into an `<input type="time">` ("14:30" or "14:30:00").
pub fn parse_input_time(input: &str) -> Option<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

/// Parse a money or decimal amount. Accepts a comma as decimal separator
/// and apostrophes as thousands separators ("1'250,50").
pub fn parse_amount(input: &str) -> Option<f64> {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|c| *c != '\'' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a positive whole number, e.g. a capacity.
pub fn parse_count(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

/// Result count for a filter row, e.g. "1 student" or "24 students".
pub fn count_label(total: i64, one: &str, many: &str) -> String {
    if total == 1 {
        format!("1 {one}")
    } else {
        format!("{total} {many}")
    }
}
