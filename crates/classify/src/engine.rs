use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tarifa_core::{EntryDate, FormatError, Money, StatementEntry};

use crate::config::KeywordConfig;
use crate::matcher::{KeywordSet, MatchText};

/// Name of the bucket fed by the collapsed keyword list.
pub const COLLAPSE: &str = "collapse";

/// One category's entries, in processing order, with their running total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    pub name: String,
    pub entries: Vec<StatementEntry>,
    pub total: Money,
}

impl CategoryTable {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            total: Money::zero(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An entry left out of every table because its date or amount could not
/// be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    pub entry: StatementEntry,
    #[serde(rename = "reason", serialize_with = "serialize_error")]
    pub error: FormatError,
}

fn serialize_error<S: Serializer>(error: &FormatError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of classifying one statement.
///
/// The collapse bucket is always present and listed first; other tables
/// follow in the order their category was first hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    tables: Vec<CategoryTable>,
    unmatched: Vec<StatementEntry>,
    rejected: Vec<RejectedEntry>,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            tables: vec![CategoryTable::new(COLLAPSE)],
            unmatched: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl Classification {
    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&CategoryTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn collapse(&self) -> &CategoryTable {
        &self.tables[0]
    }

    /// Category tables other than the collapse bucket.
    pub fn categories(&self) -> &[CategoryTable] {
        &self.tables[1..]
    }

    pub fn total(&self, name: &str) -> Option<Money> {
        self.table(name).map(|t| t.total)
    }

    pub fn classified_count(&self) -> usize {
        self.tables.iter().map(CategoryTable::len).sum()
    }

    pub fn unmatched(&self) -> &[StatementEntry] {
        &self.unmatched
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched.len()
    }

    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Append to `category`, creating its table on first use. The table is
    /// left untouched when its total would overflow.
    fn push(
        &mut self,
        category: &str,
        entry: StatementEntry,
        magnitude: Money,
    ) -> Result<(), FormatError> {
        let position = self.tables.iter().position(|t| t.name == category);
        let current = position.map_or(Money::zero(), |idx| self.tables[idx].total);
        let total = current
            .checked_add(magnitude)
            .ok_or_else(|| FormatError::AmountOverflow(entry.value.clone()))?;

        let idx = match position {
            Some(idx) => idx,
            None => {
                self.tables.push(CategoryTable::new(category));
                self.tables.len() - 1
            }
        };
        let table = &mut self.tables[idx];
        table.entries.push(entry);
        table.total = total;
        Ok(())
    }

    fn reject(&mut self, entry: &StatementEntry, error: FormatError) {
        tracing::warn!("Skipping entry {:?}: {error}", entry.name);
        self.rejected.push(RejectedEntry {
            entry: entry.clone(),
            error,
        });
    }
}

struct TablesView<'a>(&'a [CategoryTable]);

impl Serialize for TablesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|t| (&t.name, &t.entries)))
    }
}

struct TotalsView<'a>(&'a [CategoryTable]);

impl Serialize for TotalsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|t| (&t.name, t.total)))
    }
}

/// `{"tables": {name: [entry]}, "totals": {name: number}, "unmatched": [...], "rejected": [...]}`
impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("tables", &TablesView(&self.tables))?;
        map.serialize_entry("totals", &TotalsView(&self.tables))?;
        map.serialize_entry("unmatched", &self.unmatched)?;
        map.serialize_entry("rejected", &self.rejected)?;
        map.end()
    }
}

/// Sorts statement entries into the collapse bucket or a keyword category.
///
/// Holds only the compiled keyword lists; every call to
/// [`Classifier::classify`] builds its result from scratch.
#[derive(Debug, Clone)]
pub struct Classifier {
    collapsed: KeywordSet,
    categories: KeywordSet,
}

impl Classifier {
    pub fn new(config: &KeywordConfig) -> Self {
        let categories = config.categories.iter().filter(|name| {
            if name.as_str() == COLLAPSE {
                tracing::warn!("Ignoring category {COLLAPSE:?}: the name is reserved");
                return false;
            }
            true
        });
        Self {
            collapsed: KeywordSet::new(&config.collapsed),
            categories: KeywordSet::new(categories),
        }
    }

    pub fn classify(&self, entries: &[StatementEntry]) -> Classification {
        tracing::info!("Classifying {} statement entries", entries.len());
        let mut result = Classification::default();

        let mut accepted: Vec<(EntryDate, Money, &StatementEntry)> =
            Vec::with_capacity(entries.len());
        for entry in entries {
            match validate(entry) {
                Ok((date, magnitude)) => accepted.push((date, magnitude, entry)),
                Err(error) => result.reject(entry, error),
            }
        }

        // Stable: same-day entries keep their statement order.
        accepted.sort_by(|a, b| a.0.cmp(&b.0));

        for (date, magnitude, entry) in accepted {
            let normalized = entry.with_date(&date);
            let text = MatchText::of(&normalized);

            if self.collapsed.is_included(&text) {
                tracing::debug!("Collapsed: {:?} ({:?})", normalized.name, normalized.subtitle);
                if let Err(error) = result.push(COLLAPSE, normalized, magnitude) {
                    result.reject(entry, error);
                }
                continue;
            }

            match self.categories.find_match(&text) {
                Some(category) => {
                    tracing::debug!("Matched {:?} to {category:?}", normalized.name);
                    if let Err(error) = result.push(category, normalized, magnitude) {
                        result.reject(entry, error);
                    }
                }
                None => {
                    tracing::warn!(
                        "No category for {:?} ({:?})",
                        normalized.name,
                        normalized.subtitle
                    );
                    result.unmatched.push(normalized);
                }
            }
        }

        tracing::info!(
            "Classification complete: {} collapsed, {} categories, {} unmatched, {} rejected",
            result.collapse().len(),
            result.categories().len(),
            result.unmatched_count(),
            result.rejected_count()
        );
        result
    }
}

fn validate(entry: &StatementEntry) -> Result<(EntryDate, Money), FormatError> {
    Ok((entry.entry_date()?, entry.magnitude()?))
}

/// One-shot classification against a keyword configuration.
pub fn classify(entries: &[StatementEntry], config: &KeywordConfig) -> Classification {
    Classifier::new(config).classify(entries)
}
