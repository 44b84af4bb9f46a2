use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

use crate::error::FormatError;

/// A statement date validated against the calendar, carrying its canonical
/// `DD/MM/YYYY` spelling.
///
/// Ordering is chronological; the canonical text plays no part in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDate {
    date: NaiveDate,
    canonical: String,
}

impl EntryDate {
    /// Parse a `day/month/year` string whose day and month may lack leading
    /// zeros (`"2/1/2017"`).
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let malformed = || FormatError::MalformedDate(raw.to_string());

        let parts: Vec<&str> = raw.trim().split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(malformed());
        };
        if [day, month, year]
            .iter()
            .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(malformed());
        }

        let d: u32 = day.parse().map_err(|_| malformed())?;
        let m: u32 = month.parse().map_err(|_| malformed())?;
        let y: i32 = year.parse().map_err(|_| malformed())?;

        let date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| FormatError::InvalidDate(raw.to_string()))?;

        Ok(EntryDate {
            date,
            canonical: format!("{d:02}/{m:02}/{year}"),
        })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.date
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl Ord for EntryDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl PartialOrd for EntryDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Canonical zero-padded form of a statement date.
pub fn normalize_date(raw: &str) -> Result<String, FormatError> {
    EntryDate::parse(raw).map(|d| d.canonical)
}
