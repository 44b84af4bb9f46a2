use serde::{Deserialize, Serialize};

use super::date::EntryDate;
use super::error::FormatError;
use super::money::{to_magnitude, Money};

/// One debit line as extracted from a bank statement.
///
/// Field values are kept exactly as extracted; only the date is ever
/// rewritten, and only into a new record (see [`StatementEntry::with_date`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementEntry {
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub doc: String,
    pub value: String,
}

impl StatementEntry {
    pub fn new(date: &str, name: &str, subtitle: Option<&str>, doc: &str, value: &str) -> Self {
        StatementEntry {
            date: date.to_string(),
            name: name.to_string(),
            subtitle: subtitle.map(str::to_string),
            doc: doc.to_string(),
            value: value.to_string(),
        }
    }

    pub fn entry_date(&self) -> Result<EntryDate, FormatError> {
        EntryDate::parse(&self.date)
    }

    pub fn magnitude(&self) -> Result<Money, FormatError> {
        to_magnitude(&self.value)
    }

    /// Copy of this entry with its date replaced by the canonical form.
    pub fn with_date(&self, date: &EntryDate) -> StatementEntry {
        StatementEntry {
            date: date.as_str().to_string(),
            ..self.clone()
        }
    }
}
