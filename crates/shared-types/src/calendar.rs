use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Earliest year accepted for an attendance sheet.
pub const MIN_SHEET_YEAR: i32 = 2000;

/// A calendar month (1..=12).
///
/// On the wire the school backend uses a zero-padded two character string
/// (`"01"` .. `"12"`), so that is how this type serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u32);

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    /// Parse `"3"`, `"03"` or `" 03 "`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u32>().ok().and_then(Self::new)
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Zero-padded form used by the school backend.
    pub fn as_wire(self) -> String {
        format!("{:02}", self.0)
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }

    /// All twelve months in order, for pickers.
    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Month::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid month: {raw:?}")))
    }
}

/// Number of days in `month` of `year` (28, 29, 30 or 31).
pub fn days_in_month(year: i32, month: Month) -> u32 {
    let (next_year, next_month) = if month.0 == 12 {
        (year + 1, 1)
    } else {
        (year, month.0 + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Parse a record date as sent by the backend.
///
/// Plain `YYYY-MM-DD` dates are taken as-is. Full timestamps are converted
/// to UTC before the calendar day is taken; a timestamp without an offset is
/// read as UTC.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Every date of the month, first to last.
pub fn dates_of_month(year: i32, month: Month) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month.0, day))
        .collect()
}
